//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Workdeck
///
/// Cell-level parse failures are deliberately NOT represented here: a cell
/// that fails to convert degrades to a missing value during normalization,
/// and an aggregation over zero rows yields a no-data outcome. Only
/// process-level failures (bad configuration, unreadable input files)
/// surface as errors.
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum WorkdeckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Workdeck operations
pub type Result<T> = std::result::Result<T, WorkdeckError>;

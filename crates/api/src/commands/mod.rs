//! Report-building command layer
//!
//! One module per dashboard. Commands read the immutable datasets held by
//! [`crate::context::AppContext`] and return serializable payloads for the
//! rendering front end.

pub mod sales;
pub mod tasks;

//! Configuration loader
//!
//! Loads application configuration from a file chosen by environment
//! variable or path probing.
//!
//! ## Loading Strategy
//! 1. If `WORKDECK_CONFIG` is set, that file is loaded (and must exist)
//! 2. Otherwise, probes multiple paths for config files
//! 3. If nothing is found, the built-in defaults apply (the default
//!    column maps match the production sheets; the roster is empty)
//!
//! Supports JSON and TOML formats, detected by file extension.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./workdeck.toml` / `./workdeck.json` (current working directory)
//! 2. `./config.toml` / `./config.json` (current working directory)
//! 3. `../workdeck.toml` / `../workdeck.json` (parent directory)

use std::path::{Path, PathBuf};

use workdeck_domain::{Result, WorkdeckConfig, WorkdeckError};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "WORKDECK_CONFIG";

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `WorkdeckError::Config` if an explicitly named or probed file
/// exists but cannot be read or parsed. A missing file is not an error:
/// the defaults apply.
pub fn load() -> Result<WorkdeckConfig> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return load_from_file(Some(PathBuf::from(path)));
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No config file found, using built-in defaults");
            Ok(WorkdeckConfig::default())
        }
    }
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations and falls back to
/// defaults when nothing is found.
///
/// # Errors
/// Returns `WorkdeckError::Config` if:
/// - File not found (when path is specified)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<WorkdeckConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(WorkdeckError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => match probe_config_paths() {
            Some(p) => p,
            None => {
                tracing::info!("No config file found, using built-in defaults");
                return Ok(WorkdeckConfig::default());
            }
        },
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| WorkdeckError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<WorkdeckConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| WorkdeckError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| WorkdeckError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(WorkdeckError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("workdeck.toml"),
            cwd.join("workdeck.json"),
            cwd.join("config.toml"),
            cwd.join("config.json"),
            cwd.join("../workdeck.toml"),
            cwd.join("../workdeck.json"),
        ]);
    }

    candidates.into_iter().find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
[report]
top_n = 10
done_status = "Concluída"

[roster]
"Compras" = ["Viviane Domingues", "Cintia Olívia"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).unwrap();
        assert_eq!(config.report.top_n, 10);
        assert_eq!(config.report.done_status, "Concluída");
        assert_eq!(config.roster.members("Compras").map(<[String]>::len), Some(2));
        // Unspecified sections keep their defaults
        assert_eq!(config.task_columns.completed_at, "Data de Conclusão");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "sale_columns": { "amount": "Valor" },
            "report": { "overload_threshold_pct": 110.0 }
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).unwrap();
        assert_eq!(config.sale_columns.amount, "Valor");
        assert_eq!(config.report.overload_threshold_pct, 110.0);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/workdeck.toml")));
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, WorkdeckError::Config(_)));
    }

    #[test]
    fn test_load_from_file_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"report = {{{{").unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        assert!(load_from_file(Some(path.clone())).is_err());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("anything", &PathBuf::from("config.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_env_var_points_at_file() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[report]\ntop_n = 3\n").unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        std::env::set_var(CONFIG_ENV_VAR, &path);
        let config = load().unwrap();
        assert_eq!(config.report.top_n, 3);

        std::env::remove_var(CONFIG_ENV_VAR);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_env_var_missing_file_is_an_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var(CONFIG_ENV_VAR, "/nonexistent/workdeck.toml");
        assert!(load().is_err());
        std::env::remove_var(CONFIG_ENV_VAR);
    }
}

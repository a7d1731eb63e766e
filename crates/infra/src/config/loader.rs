//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ROUTINELOG_DB_PATH`: Database file path (required)
//! - `ROUTINELOG_DB_POOL_SIZE`: Connection pool size (required)
//! - `ROUTINELOG_API_KEY`: Advisor API key (optional; advisor disabled when
//!   absent)
//! - `ROUTINELOG_ADVISOR_MODEL`: Chat model for advice and feedback (optional)
//! - `ROUTINELOG_SUGGESTION_MODEL`: Chat model for category suggestions
//!   (optional)
//! - `ROUTINELOG_ADVISOR_URL`: Chat-completions endpoint URL (optional)
//! - `ROUTINELOG_ADVISOR_TIMEOUT`: Request timeout in seconds (optional)
//! - `ROUTINELOG_LEGACY_JSON`: Path of a legacy flat-file JSON store to
//!   migrate on startup (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./routinelog.json` or `./routinelog.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use routinelog_domain::{
    AdvisorConfig, Config, DatabaseConfig, ImportConfig, Result, RoutineLogError,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `RoutineLogError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The database variables are required; advisor and import variables fall
/// back to their defaults when unset.
///
/// # Errors
/// Returns `RoutineLogError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("ROUTINELOG_DB_PATH")?;
    let db_pool_size = env_var("ROUTINELOG_DB_POOL_SIZE").and_then(|s| {
        s.parse::<u32>().map_err(|e| RoutineLogError::Config(format!("Invalid pool size: {}", e)))
    })?;

    let advisor_defaults = AdvisorConfig::default();
    let timeout_seconds = match std::env::var("ROUTINELOG_ADVISOR_TIMEOUT").ok() {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| RoutineLogError::Config(format!("Invalid advisor timeout: {}", e)))?,
        None => advisor_defaults.timeout_seconds,
    };

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size: db_pool_size },
        advisor: AdvisorConfig {
            api_key: std::env::var("ROUTINELOG_API_KEY").ok(),
            model: std::env::var("ROUTINELOG_ADVISOR_MODEL")
                .unwrap_or(advisor_defaults.model),
            suggestion_model: std::env::var("ROUTINELOG_SUGGESTION_MODEL")
                .unwrap_or(advisor_defaults.suggestion_model),
            api_url: std::env::var("ROUTINELOG_ADVISOR_URL")
                .unwrap_or(advisor_defaults.api_url),
            timeout_seconds,
        },
        import: ImportConfig { legacy_json_path: std::env::var("ROUTINELOG_LEGACY_JSON").ok() },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `RoutineLogError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(RoutineLogError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            RoutineLogError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| RoutineLogError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| RoutineLogError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| RoutineLogError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(RoutineLogError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("routinelog.json"),
            cwd.join("routinelog.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("routinelog.json"),
                exe_dir.join("routinelog.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        RoutineLogError::Config(format!("Missing required environment variable: {}", key))
    })
}

//! Application configuration structures
//!
//! Populated by the infra config loader from environment variables or a
//! JSON/TOML file.

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub advisor: AdvisorConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

/// SQLite database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the database file
    pub path: String,
    /// Connection pool size
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

/// External LLM advisor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// API key for the chat-completions endpoint. `None` disables the
    /// advisor; calls then resolve to fallback responses.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model used for advice and feedback
    #[serde(default = "default_model")]
    pub model: String,
    /// Cheaper model used for category suggestions
    #[serde(default = "default_suggestion_model")]
    pub suggestion_model: String,
    /// Chat-completions endpoint URL
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Legacy data import settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Path of the legacy flat-file JSON store, migrated once on startup
    /// when present.
    #[serde(default)]
    pub legacy_json_path: Option<String>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            suggestion_model: default_suggestion_model(),
            api_url: default_api_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_pool_size() -> u32 {
    4
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_suggestion_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

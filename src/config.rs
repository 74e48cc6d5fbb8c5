//! Library configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$SHAREBRIDGE_CONFIG` (environment variable)
//! 2. `~/.config/sharebridge/config.toml` (Linux/macOS)
//!    `%APPDATA%\sharebridge\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Batch validation limits.
    pub validation: ValidationConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
}

/// Limits applied to every batch before delivery.
///
/// These are transport sanity bounds, not business rules: the bridge refuses
/// payloads no reasonable share submission produces, and everything below
/// the limits passes through uninterpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum entries per collection (files, texts, Wi-Fi credentials).
    pub max_collection_entries: usize,
    /// Maximum size in bytes for any string field except `text_body`.
    pub max_string_bytes: usize,
    /// Maximum size in bytes for a text attachment body.
    pub max_text_body_bytes: usize,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            cache_dir: None,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_collection_entries: 1024,
            max_string_bytes: 64 * 1024,          // 64 KB
            max_text_body_bytes: 4 * 1024 * 1024, // 4 MB
        }
    }
}

// ── Load / save ─────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Save configuration to the standard location.
pub fn save_config(config: &Config) -> anyhow::Result<()> {
    let path = config_file_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config file path"))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(&path, contents)?;
    tracing::info!(path = %path.display(), "Saved config");
    Ok(())
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    // 1. Environment variable override
    if let Ok(env_path) = std::env::var("SHAREBRIDGE_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    // 2. Standard config directory
    dirs::config_dir().map(|d| d.join("sharebridge").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sharebridge")
}

/// Return the log file path.
pub fn log_file_path(config: &Config) -> PathBuf {
    cache_dir(config).join("sharebridge.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.general.log_level, "warn");
        assert_eq!(cfg.validation.max_collection_entries, 1024);
        assert_eq!(cfg.validation.max_string_bytes, 64 * 1024);
        assert_eq!(cfg.validation.max_text_body_bytes, 4 * 1024 * 1024);
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.general.log_level, cfg.general.log_level);
        assert_eq!(
            parsed.validation.max_collection_entries,
            cfg.validation.max_collection_entries
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial = r#"
[validation]
max_collection_entries = 16
"#;
        let cfg: Config = toml::from_str(partial).expect("parse partial");
        assert_eq!(cfg.validation.max_collection_entries, 16);
        // Other fields use defaults
        assert_eq!(cfg.general.log_level, "warn");
        assert_eq!(cfg.validation.max_string_bytes, 64 * 1024);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\nlog_level = \"debug\"\n").expect("write");

        let contents = std::fs::read_to_string(&path).expect("read");
        let cfg: Config = toml::from_str(&contents).expect("parse");
        assert_eq!(cfg.general.log_level, "debug");
    }
}

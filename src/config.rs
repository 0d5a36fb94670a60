//! Configuration for shelf.
//!
//! Configuration sources (highest priority first):
//! 1. `--data-file` flag / SHELF_DATA_FILE (applied by the CLI)
//! 2. Config file (.shelf/config.yaml)
//! 3. Defaults (./library.json, log level "warn")
//!
//! Config file discovery:
//! - Searches current directory and parents for .shelf/config.yaml
//! - The data file path is relative to the parent of the .shelf/ directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Directory holding the config file
pub const CONFIG_DIR: &str = ".shelf";

/// Config file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.yaml";

/// Data file used when nothing else is configured
pub const DEFAULT_DATA_FILE: &str = "library.json";

/// Default tracing filter directive
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Data file (relative to the project root)
    pub data_file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Tracing filter directive, e.g. "info" or "shelf=debug"
    pub level: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Path to the library data file
    pub data_file: PathBuf,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            config_file: None,
        }
    }
}

/// Find config file by searching `start` and its parents
fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Merge a parsed config file over the defaults
fn resolve(config_path: &Path, file: ConfigFile) -> ResolvedConfig {
    // Base directory is the parent of .shelf/ (i.e., grandparent of config.yaml)
    let base_dir = config_path
        .parent()
        .and_then(|p| p.parent())
        .unwrap_or(Path::new("."));

    let defaults = ResolvedConfig::default();

    ResolvedConfig {
        data_file: file
            .storage
            .data_file
            .as_deref()
            .map(|p| resolve_path(base_dir, p))
            .unwrap_or_else(|| base_dir.join(DEFAULT_DATA_FILE)),
        log_level: file.logging.level.unwrap_or(defaults.log_level),
        config_file: Some(config_path.to_path_buf()),
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    match find_config_file_from(&cwd) {
        Some(config_path) => {
            let file = load_config_file(&config_path)?;
            Ok(resolve(&config_path, file))
        }
        None => Ok(ResolvedConfig::default()),
    }
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

//! Configuration management for check-process.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::{Args, ConfigFormat, LogLevel};
use check_process::process::PROC_ROOT_DIR;

// Default configuration constants
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log level names accepted in configuration files.
pub const SUPPORTED_LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

const DEFAULT_CONFIG_PATHS: [&str; 8] = [
    "/etc/check-process/check-process.yaml",
    "/etc/check-process/check-process.yml",
    "/etc/check-process/check-process.json",
    "/etc/check-process/check-process.toml",
    "./check-process.yaml",
    "./check-process.yml",
    "./check-process.json",
    "./check-process.toml",
];

/// Validation failures of an otherwise well-formed configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid logging level {value:?}, expected one of {:?}", SUPPORTED_LOG_LEVELS)]
    InvalidLogLevel { value: String },

    #[error("proc_root must not be empty")]
    EmptyProcRoot,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Logging
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,

    // Process source
    #[serde(alias = "proc-root")]
    pub proc_root: Option<PathBuf>,

    // Plugin output
    /// Append "Notification generated by ..." to plugin output
    #[serde(alias = "emit-branding")]
    pub emit_branding: Option<bool>,

    // Inspector output
    /// List every process grouped by state in `list`
    #[serde(alias = "show-all")]
    pub show_all: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some(DEFAULT_LOG_LEVEL.into()),
            proc_root: Some(PathBuf::from(PROC_ROOT_DIR)),
            emit_branding: Some(false),
            show_all: Some(false),
        }
    }
}

impl Config {
    /// Effective log level; unknown names fall back to the default.
    pub fn log_level(&self) -> LogLevel {
        self.log_level
            .as_deref()
            .and_then(|s| LogLevel::from_str(s, true).ok())
            .unwrap_or(LogLevel::Info)
    }

    pub fn proc_root(&self) -> PathBuf {
        self.proc_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(PROC_ROOT_DIR))
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(level) = cfg.log_level.as_deref() {
        let known = SUPPORTED_LOG_LEVELS
            .iter()
            .any(|l| l.eq_ignore_ascii_case(level));
        if !known {
            return Err(ConfigError::InvalidLogLevel {
                value: level.to_string(),
            });
        }
    }

    if cfg
        .proc_root
        .as_ref()
        .is_some_and(|p| p.as_os_str().is_empty())
    {
        return Err(ConfigError::EmptyProcRoot);
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(level) = args.log_level {
        if let Some(value) = level.to_possible_value() {
            config.log_level = Some(value.get_name().to_string());
        }
    }

    if let Some(root) = &args.proc_root {
        config.proc_root = Some(root.clone());
    }

    if args.branding {
        config.emit_branding = Some(true);
    }

    Ok(config)
}

/// Configuration loading with multiple format support
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("config file not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => match DEFAULT_CONFIG_PATHS.iter().find(|p| Path::new(p).exists()) {
            Some(p) => PathBuf::from(p),
            None => return Ok(Config::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    let config = parse_config(&content, &path)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    info!("Loaded configuration from: {}", path.display());
    Ok(config)
}

/// Parses config text, choosing the format by file extension (YAML by default).
pub fn parse_config(content: &str, path: &Path) -> anyhow::Result<Config> {
    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(content)?,
        Some("toml") => toml::from_str(content)?,
        _ => serde_yaml::from_str(content)?,
    };
    Ok(config)
}

/// Renders configuration in the requested format
pub fn render_config(config: &Config, format: &ConfigFormat) -> anyhow::Result<String> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: ConfigFormat) -> anyhow::Result<()> {
    println!("{}", render_config(config, &format)?);
    Ok(())
}

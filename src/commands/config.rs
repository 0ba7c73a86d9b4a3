//! Config command implementation.
//!
//! Generates configuration files in various formats.

use std::fs;
use std::path::PathBuf;

use crate::cli::ConfigFormat;
use crate::config::{render_config, Config};

/// Generates configuration files.
pub fn command_config(
    output: Option<PathBuf>,
    format: ConfigFormat,
    commented: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = match output {
        Some(path) => path,
        None => PathBuf::from("check-process.yaml"),
    };

    let content = generate_config(&format, commented)?;

    if output.to_string_lossy() == "-" {
        print!("{}", content);
    } else {
        fs::write(&output, content)?;
        println!("Configuration written to: {}", output.display());
    }

    Ok(())
}

/// Default configuration text. Comments are only added to YAML.
fn generate_config(format: &ConfigFormat, commented: bool) -> anyhow::Result<String> {
    let content = render_config(&Config::default(), format)?;
    Ok(match format {
        ConfigFormat::Yaml if commented => add_config_comments(content),
        _ => content,
    })
}

/// Adds comments to YAML configuration.
fn add_config_comments(yaml: String) -> String {
    let comments = r#"# check-process Configuration
# ===========================
#
# Logging
# -------
# log_level: "info"            # off, error, warn, info, debug, trace (written to stderr)
#
# Process Source
# --------------
# proc_root: "/proc"           # Root of the proc filesystem to evaluate
#
# Plugin Output
# -------------
# emit_branding: false         # Append "Notification generated by ..." line
#
# Inspector Output
# ----------------
# show_all: false              # `list`: show every process grouped by state
"#;

    format!("{comments}\n{yaml}")
}

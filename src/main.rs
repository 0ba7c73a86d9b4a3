//! check-process
//!
//! Nagios plugin reporting processes in problematic scheduling states.
//! Without a subcommand the binary runs as a plugin: it prints the plugin
//! output on stdout and exits with the Nagios state code.

use clap::Parser;
use tracing::{debug, Level};

mod cli;
mod commands;
mod config;

use cli::{Args, Commands, LogLevel};
use commands::{command_check, command_config, command_list, init_failure};
use config::{resolve_config, show_config, validate_effective_config, Config};

/// Installs the stderr log subscriber. Stdout is reserved for plugin output.
fn setup_logging(level: LogLevel) {
    let log_level = match level {
        LogLevel::Off => return,
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return;
    }

    debug!("Logging initialized with level: {:?}", level);
}

/// Helper function to load and validate configuration.
fn load_validated_config(args: &Args) -> anyhow::Result<Config> {
    let config = resolve_config(args)?;
    validate_effective_config(&config)?;
    Ok(config)
}

fn run_plugin(args: &Args) -> i32 {
    let result = match load_validated_config(args) {
        Ok(config) => {
            setup_logging(config.log_level());
            command_check(&config)
        }
        Err(e) => init_failure(format!("{:#}", e)),
    };

    print!("{}", result.render());
    result.exit_code()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Early config resolution for show/check modes
    if args.show_config || args.check_config {
        let config = resolve_config(&args)?;

        if args.check_config {
            if let Err(e) = validate_effective_config(&config) {
                eprintln!("Configuration invalid: {}", e);
                std::process::exit(1);
            }
            println!("Configuration is valid");
            return Ok(());
        }

        return Ok(show_config(&config, args.config_format)?);
    }

    match &args.command {
        Some(Commands::Config {
            output,
            format,
            commented,
        }) => command_config(output.clone(), format.clone(), *commented),

        Some(Commands::List { show_all }) => {
            let config = match load_validated_config(&args) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error initializing application: {:#}", e);
                    std::process::exit(1);
                }
            };
            setup_logging(config.log_level());

            if let Err(e) = command_list(*show_all, &config) {
                eprintln!("Failed to list processes: {:#}", e);
                std::process::exit(1);
            }
            Ok(())
        }

        None => std::process::exit(run_plugin(&args)),
    }
}

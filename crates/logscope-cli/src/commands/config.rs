//! Configuration file commands

use clap::{Args, Subcommand};
use logscope_core::{HarnessConfig, LoggerRegistry};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Validate a configuration file and print the loggers it defines
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Configuration file; defaults to $LOGSCOPE_CONFIG
    pub file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct LoggerSummary {
    name: String,
    level: Option<String>,
    console_sinks: usize,
}

#[derive(Debug, Serialize)]
struct ConfigSummary {
    quiet_level: String,
    report_failures: bool,
    loggers: Vec<LoggerSummary>,
}

pub fn execute(args: ConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        ConfigCommand::Check(check_args) => execute_check(check_args),
    }
}

fn execute_check(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = args
        .file
        .or_else(logscope_core::config::config_path_from_env)
        .ok_or("No configuration file given and LOGSCOPE_CONFIG is not set")?;

    let config = HarnessConfig::load(&path)?;
    let registry = LoggerRegistry::from_config(&config);

    let loggers = registry
        .logger_names()
        .into_iter()
        .filter_map(|name| registry.get(&name))
        .map(|logger| LoggerSummary {
            name: logger.name().to_string(),
            level: logger.level().map(|l| l.to_string()),
            console_sinks: logger.sinks().iter().filter(|s| s.is_console()).count(),
        })
        .collect();

    let summary = ConfigSummary {
        quiet_level: config.quiet_level.to_string(),
        report_failures: config.report_failures,
        loggers,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

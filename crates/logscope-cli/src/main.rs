//! logscope CLI
//!
//! Command-line companion for the logscope harness

use clap::{Parser, Subcommand};
use logscope_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "logscope")]
#[command(about = "logscope - scoped log capture harness tools", long_about = None)]
struct Cli {
    /// Emit diagnostic logs
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a shell command and report exit code, stdout and stderr
    Exec(commands::exec::ExecArgs),
    /// Configuration file operations
    Config(commands::config::ConfigArgs),
}

fn main() {
    let cli = Cli::parse();
    if cli.verbose {
        init(Profile::Development);
    }

    let result = match cli.command {
        Commands::Exec(args) => commands::exec::execute(args),
        Commands::Config(args) => commands::config::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! Shell command execution

use clap::Args;
use serde::Serialize;
use std::process::Command;

#[derive(Debug, Args)]
pub struct ExecArgs {
    /// Command line, run through `sh -c`
    pub command_line: String,

    /// Fail with the command's stderr when it exits non-zero
    #[arg(long)]
    pub check: bool,

    /// Print only the trimmed stdout instead of the JSON result
    #[arg(long)]
    pub stdout_only: bool,
}

/// Outcome of one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run `command_line` to completion and collect its output
///
/// A process killed by a signal reports exit code -1.
pub fn run(command_line: &str) -> std::io::Result<ExecResult> {
    let output = Command::new("sh").arg("-c").arg(command_line).output()?;
    let result = ExecResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    tracing::debug!(
        component = module_path!(),
        command = command_line,
        exit_code = result.exit_code,
        "command finished"
    );
    Ok(result)
}

pub fn execute(args: ExecArgs) -> Result<(), Box<dyn std::error::Error>> {
    let result = run(&args.command_line)?;

    if args.check && !result.success() {
        return Err(format!(
            "command `{}` failed with exit code {}: {}",
            args.command_line,
            result.exit_code,
            result.stderr.trim()
        )
        .into());
    }

    if args.stdout_only {
        println!("{}", result.stdout.trim());
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    Ok(())
}

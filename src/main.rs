// src/main.rs

mod cli;
mod commands;

use apt_container::{CancelToken, WorkflowKind, cancel_on_interrupt};
use clap::Parser;
use cli::{Cli, Commands};
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::warn;

fn main() -> ExitCode {
    // Logs go to stderr so apt-get output and echoed commands stay clean on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let cancel = CancelToken::new();
    if let Err(e) = cancel_on_interrupt(cancel.clone()) {
        warn!("Interrupts will not stop apt-get gracefully: {}", e);
    }

    let result = match cli.command {
        Commands::Install {
            packages,
            requirements,
            common,
        } => {
            let opts = commands::workflow_options(packages, requirements, common);
            commands::cmd_workflow(WorkflowKind::Install, &cli.apt_get, &opts, &cancel)
        }
        Commands::Satisfy {
            dependencies,
            requirements,
            common,
        } => {
            let opts = commands::workflow_options(dependencies, requirements, common);
            commands::cmd_workflow(WorkflowKind::Satisfy, &cli.apt_get, &opts, &cancel)
        }
        Commands::Completions { shell } => commands::cmd_completions(shell),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            let code = e
                .downcast_ref::<apt_container::Error>()
                .map_or(1, apt_container::Error::exit_code);
            ExitCode::from(exit_status_byte(code))
        }
    }
}

/// Truncate to the byte the OS reports, never turning a failure into success
fn exit_status_byte(code: i32) -> u8 {
    match (code & 0xff) as u8 {
        0 => 1,
        byte => byte,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_byte() {
        assert_eq!(exit_status_byte(100), 100);
        assert_eq!(exit_status_byte(1), 1);
        assert_eq!(exit_status_byte(137), 137);
        assert_eq!(exit_status_byte(256), 1);
        assert_eq!(exit_status_byte(-1), 255);
    }
}

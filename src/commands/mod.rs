// src/commands/mod.rs
//! Command handlers for the apt-container CLI

use crate::cli::{Cli, CommonArgs};
use anyhow::Result;
use apt_container::{
    AptGet, CancelToken, InvocationOptions, WorkflowKind, WorkflowOptions, run_workflow,
};
use clap::CommandFactory;
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::debug;

/// Map parsed flags onto workflow options
pub fn workflow_options(
    requirements: Vec<String>,
    requirements_file: Option<PathBuf>,
    common: CommonArgs,
) -> WorkflowOptions {
    WorkflowOptions {
        requirements,
        requirements_file: requirements_file.filter(|path| !path.as_os_str().is_empty()),
        invocation: InvocationOptions {
            simulate: common.simulate,
            interactive: common.interactive,
            quiet_level: common.quiet,
            extra_options: common.extra_options,
        },
        update: !common.no_update,
        clean_package_cache: !common.keep_cache,
        clean_lists: !common.keep_lists,
        apt_lists_dir: common.apt_lists_dir,
    }
}

/// Run the install or satisfy workflow
///
/// Validation failures print the subcommand's help before the error is returned.
pub fn cmd_workflow(
    kind: WorkflowKind,
    apt_get: &str,
    opts: &WorkflowOptions,
    cancel: &CancelToken,
) -> Result<()> {
    debug!("Dispatching {:?} with apt-get {}", kind, apt_get);

    let runner = AptGet::new(apt_get);
    if let Err(e) = run_workflow(kind, &runner, opts, cancel) {
        if e.is_invalid_options() {
            if let Some(help) = subcommand_help(kind) {
                print!("{}", help);
            }
        }
        return Err(e.into());
    }
    Ok(())
}

/// Write shell completions to stdout
pub fn cmd_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}

/// Help text of the workflow's subcommand, as `apt-container <sub> --help` shows it
fn subcommand_help(kind: WorkflowKind) -> Option<String> {
    let mut cmd = Cli::command();
    // Building resolves bin names and propagates global args into subcommands
    cmd.build();
    cmd.find_subcommand_mut(kind.action().as_str())
        .map(|sub| sub.render_help().to_string())
}

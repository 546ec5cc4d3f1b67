// src/workflow.rs

//! Install and satisfy workflows
//!
//! Both workflows run the same linear sequence, stopping at the first
//! propagated error:
//!
//! 1. Merge requirements (arguments, then the requirements file)
//! 2. `apt-get update` (skipped when simulating)
//! 3. `apt-get install` or `apt-get satisfy`
//! 4. `apt-get clean` (best effort: failures, interrupts included, are logged and ignored)
//! 5. Remove the index lists directory (skipped when simulating; failures propagate)
//!
//! Steps 4 and 5 intentionally treat failure differently.

use crate::apt::{Action, AptCommand, AptGet, CommandRunner, InvocationOptions};
use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::requirements::read_requirements_file;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where apt keeps downloaded package index lists
pub const DEFAULT_APT_LISTS_DIR: &str = "/var/lib/apt/lists";

/// Which main action a workflow runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    /// Install packages by name
    Install,
    /// Satisfy dependency expressions
    Satisfy,
}

impl WorkflowKind {
    pub fn action(self) -> Action {
        match self {
            Self::Install => Action::Install,
            Self::Satisfy => Action::Satisfy,
        }
    }
}

/// Options for one install/satisfy run
#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    /// Packages or dependency expressions given inline
    pub requirements: Vec<String>,
    /// File to read requirements from; exclusive with `requirements`
    pub requirements_file: Option<PathBuf>,
    /// Flags for every apt-get invocation
    pub invocation: InvocationOptions,
    /// Run `apt-get update` first
    pub update: bool,
    /// Run `apt-get clean` afterwards
    pub clean_package_cache: bool,
    /// Remove the index lists afterwards
    pub clean_lists: bool,
    /// Index lists directory; empty means [`DEFAULT_APT_LISTS_DIR`]
    pub apt_lists_dir: PathBuf,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            requirements: Vec::new(),
            requirements_file: None,
            invocation: InvocationOptions {
                quiet_level: 1,
                ..Default::default()
            },
            update: true,
            clean_package_cache: true,
            clean_lists: true,
            apt_lists_dir: PathBuf::from(DEFAULT_APT_LISTS_DIR),
        }
    }
}

impl WorkflowOptions {
    /// Reject option combinations that cannot be run
    pub fn validate(&self) -> Result<()> {
        if self.requirements_file.is_some() && !self.requirements.is_empty() {
            return Err(Error::InvalidOptions(
                "cannot specify packages through both file and arguments".to_string(),
            ));
        }
        Ok(())
    }

    /// Inline requirements followed by the ones read from the file
    pub fn merged_requirements(&self) -> Result<Vec<String>> {
        let mut reqs = self.requirements.clone();
        if let Some(path) = &self.requirements_file {
            reqs.extend(read_requirements_file(path)?);
        }
        Ok(reqs)
    }

    fn lists_dir(&self) -> &Path {
        if self.apt_lists_dir.as_os_str().is_empty() {
            Path::new(DEFAULT_APT_LISTS_DIR)
        } else {
            &self.apt_lists_dir
        }
    }
}

/// Install packages with the system apt-get, without cancellation
pub fn apt_install(opts: &WorkflowOptions) -> Result<()> {
    apt_install_with_cancel(&AptGet::default(), opts, &CancelToken::new())
}

/// Install packages using `runner`, stopping when `cancel` fires
pub fn apt_install_with_cancel(
    runner: &dyn CommandRunner,
    opts: &WorkflowOptions,
    cancel: &CancelToken,
) -> Result<()> {
    run_workflow(WorkflowKind::Install, runner, opts, cancel)
}

/// Satisfy dependency expressions with the system apt-get, without cancellation
pub fn apt_satisfy(opts: &WorkflowOptions) -> Result<()> {
    apt_satisfy_with_cancel(&AptGet::default(), opts, &CancelToken::new())
}

/// Satisfy dependency expressions using `runner`, stopping when `cancel` fires
pub fn apt_satisfy_with_cancel(
    runner: &dyn CommandRunner,
    opts: &WorkflowOptions,
    cancel: &CancelToken,
) -> Result<()> {
    run_workflow(WorkflowKind::Satisfy, runner, opts, cancel)
}

/// Run a complete workflow
pub fn run_workflow(
    kind: WorkflowKind,
    runner: &dyn CommandRunner,
    opts: &WorkflowOptions,
    cancel: &CancelToken,
) -> Result<()> {
    opts.validate()?;

    let reqs = opts.merged_requirements()?;
    if reqs.is_empty() {
        return Err(Error::NoInput);
    }
    debug!("{} workflow with {} requirements", kind.action(), reqs.len());

    let plain = opts.invocation.without_extra_options();

    if opts.update {
        if opts.invocation.simulate {
            eprintln!("NOTE: simulated mode; not updating lists");
        } else {
            info!("Updating package lists");
            execute(runner, Action::Update, &[], &plain, cancel)?;
        }
    }

    info!("Running apt-get {}", kind.action());
    execute(runner, kind.action(), &reqs, &opts.invocation, cancel)?;

    if opts.clean_package_cache {
        if let Err(e) = execute(runner, Action::Clean, &[], &plain, cancel) {
            warn!("Package cache cleanup failed, continuing: {}", e);
        }
    }

    if opts.clean_lists {
        if opts.invocation.simulate {
            eprintln!("NOTE: simulated mode; not cleaning apt lists");
        } else {
            clean_lists(opts.lists_dir(), &opts.invocation)?;
        }
    }

    Ok(())
}

fn execute(
    runner: &dyn CommandRunner,
    action: Action,
    targets: &[String],
    opts: &InvocationOptions,
    cancel: &CancelToken,
) -> Result<()> {
    let command = AptCommand::build(action, targets, opts)?;
    if !opts.is_super_quiet() {
        println!(" + {}", command.render(runner.program()));
    }
    runner.run(&command, cancel)
}

/// Remove the index lists directory; a missing directory counts as removed
fn clean_lists(dir: &Path, opts: &InvocationOptions) -> Result<()> {
    if !opts.is_super_quiet() {
        println!(" + removing lists: {}", dir.display());
    }
    match std::fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Lists directory {} already absent", dir.display());
            Ok(())
        }
        Err(source) => Err(Error::ListsCleanup {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

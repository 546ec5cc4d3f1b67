// src/apt/runner.rs

//! apt-get subprocess execution
//!
//! apt-get inherits this process's standard streams so its prompts and
//! progress reach the real terminal. The child is polled while the shared
//! [`CancelToken`] is watched; on cancellation it gets SIGTERM, a short grace
//! period, then SIGKILL.

use super::command::AptCommand;
use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use std::io::ErrorKind;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::Duration;
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// Default package-manager executable
pub const DEFAULT_APT_GET: &str = "apt-get";

/// How often a running child is checked against the cancellation token
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Time a cancelled child gets to exit after SIGTERM before SIGKILL
const TERMINATE_GRACE: Duration = Duration::from_secs(5);

/// Something that can execute an assembled apt-get command
pub trait CommandRunner {
    /// Program name shown when echoing commands
    fn program(&self) -> &str;

    /// Run `command` to completion, or until `cancel` fires
    fn run(&self, command: &AptCommand, cancel: &CancelToken) -> Result<()>;
}

/// Runs the real apt-get binary
#[derive(Debug, Clone)]
pub struct AptGet {
    program: String,
    cwd: Option<PathBuf>,
}

impl Default for AptGet {
    fn default() -> Self {
        Self::new(DEFAULT_APT_GET)
    }
}

impl AptGet {
    /// Use `program` as the package manager; bare names are looked up on PATH
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            cwd: None,
        }
    }

    /// Run apt-get from `dir` instead of the current directory
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    fn not_found(&self) -> Error {
        Error::PackageManagerNotFound {
            program: self.program.clone(),
        }
    }

    /// Resolve the executable, failing early when it is missing
    fn resolve(&self) -> Result<PathBuf> {
        if self.program.contains('/') {
            let path = Path::new(&self.program);
            if path.is_file() {
                Ok(path.to_path_buf())
            } else {
                Err(self.not_found())
            }
        } else {
            which::which(&self.program).map_err(|e| {
                debug!("{} not found on PATH: {}", self.program, e);
                self.not_found()
            })
        }
    }

    fn supervise(&self, child: &mut Child, action: &str, cancel: &CancelToken) -> Result<ExitStatus> {
        loop {
            if cancel.is_cancelled() {
                terminate(child);
                return Err(Error::Canceled {
                    action: action.to_string(),
                });
            }
            if let Some(status) = child.wait_timeout(POLL_INTERVAL)? {
                return Ok(status);
            }
        }
    }
}

impl CommandRunner for AptGet {
    fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, command: &AptCommand, cancel: &CancelToken) -> Result<()> {
        let action = command.action().as_str();
        if cancel.is_cancelled() {
            return Err(Error::Canceled {
                action: action.to_string(),
            });
        }

        let executable = self.resolve()?;
        debug!("Spawning {} {:?}", executable.display(), command.args());

        let mut cmd = Command::new(&executable);
        cmd.args(command.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => self.not_found(),
            _ => Error::Io(e),
        })?;

        let status = self.supervise(&mut child, action, cancel)?;
        if status.success() {
            return Ok(());
        }
        if cancel.is_cancelled() {
            return Err(Error::Canceled {
                action: action.to_string(),
            });
        }
        Err(Error::CommandFailed {
            action: action.to_string(),
            code: exit_code(status),
        })
    }
}

/// Numeric exit code, using the shell's `128 + signal` for killed children
fn exit_code(status: ExitStatus) -> i32 {
    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

fn terminate(child: &mut Child) {
    let Ok(raw_pid) = i32::try_from(child.id()) else {
        let _ = child.kill();
        let _ = child.wait();
        return;
    };

    warn!("Stopping apt-get (pid {})", raw_pid);
    if kill(Pid::from_raw(raw_pid), Signal::SIGTERM).is_ok() {
        match child.wait_timeout(TERMINATE_GRACE) {
            Ok(Some(_)) => return,
            Ok(None) => debug!("apt-get ignored SIGTERM; killing"),
            Err(e) => debug!("Failed waiting for apt-get after SIGTERM: {}", e),
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

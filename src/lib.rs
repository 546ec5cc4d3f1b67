// src/lib.rs

//! apt-container
//!
//! Wrapper around `apt-get install` and `apt-get satisfy` for container
//! builds. A run merges the requested packages, optionally refreshes the
//! package index, installs, then cleans the package cache and the downloaded
//! index lists so they do not end up in an image layer.
//!
//! Package resolution is left entirely to apt-get; this crate only assembles
//! and supervises its invocations.

pub mod apt;
pub mod cancel;
mod error;
pub mod requirements;
pub mod workflow;

pub use apt::{Action, AptCommand, AptGet, CommandRunner, DEFAULT_APT_GET, InvocationOptions};
pub use cancel::{CancelToken, cancel_on_interrupt};
pub use error::{Error, Result};
pub use requirements::{parse_requirements, read_requirements_file};
pub use workflow::{
    DEFAULT_APT_LISTS_DIR, WorkflowKind, WorkflowOptions, apt_install, apt_install_with_cancel,
    apt_satisfy, apt_satisfy_with_cancel, run_workflow,
};

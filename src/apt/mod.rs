// src/apt/mod.rs

//! apt-get command assembly and execution

mod command;
mod runner;

pub use command::{Action, AptCommand, InvocationOptions};
pub use runner::{AptGet, CommandRunner, DEFAULT_APT_GET};

// src/cli/mod.rs
//! CLI definitions for apt-container
//!
//! This module contains the command-line interface definitions using clap.
//! The command implementations are in the `commands` module.

use apt_container::{DEFAULT_APT_GET, DEFAULT_APT_LISTS_DIR};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apt-container")]
#[command(version)]
#[command(about = "wrapper around apt-get tools, better suited for use in container building", long_about = None)]
pub struct Cli {
    /// apt-get executable to run
    #[arg(
        long = "apt-get",
        global = true,
        env = "APT_CONTAINER_APT_GET",
        default_value = DEFAULT_APT_GET,
        value_name = "PATH"
    )]
    pub apt_get: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Container-friendly version of 'apt-get install' (see apt-get man pages)
    #[command(visible_alias = "i")]
    Install {
        /// Packages to install
        #[arg(value_name = "PACKAGES")]
        packages: Vec<String>,

        /// Read package list from FILE (one per line, # is a comment); mutually exclusive with packages as arguments
        #[arg(short, long, value_name = "FILE", value_parser = path_value)]
        requirements: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Container-friendly version of 'apt-get satisfy'; uses dependency strings (see apt-get man pages)
    #[command(visible_alias = "s")]
    Satisfy {
        /// Dependency expressions to satisfy
        #[arg(value_name = "DEPENDENCIES")]
        dependencies: Vec<String>,

        /// Read dependency list from FILE (one per line, # is a comment); mutually exclusive with dependencies as arguments
        #[arg(short, long, value_name = "FILE", value_parser = path_value)]
        requirements: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Path parser that lets an empty value through ("no file")
fn path_value(value: &str) -> Result<PathBuf, std::convert::Infallible> {
    Ok(PathBuf::from(value))
}

/// Flags shared by install and satisfy
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Run interactively (omit -y from apt-get commands)
    #[arg(long)]
    pub interactive: bool,

    /// Run in simulated mode (include -s in apt-get commands)
    #[arg(short, long)]
    pub simulate: bool,

    /// Skip running 'apt-get update' before installing
    #[arg(short = 'U', long)]
    pub no_update: bool,

    /// Keep package cache after install; don't run 'apt-get clean'
    #[arg(short = 'C', long)]
    pub keep_cache: bool,

    /// Keep package lists used for install
    #[arg(short = 'L', long)]
    pub keep_lists: bool,

    /// Directory that apt keeps its package lists in
    #[arg(
        long,
        env = "APT_CONTAINER_LISTS_DIR",
        default_value = DEFAULT_APT_LISTS_DIR,
        value_name = "DIR"
    )]
    pub apt_lists_dir: PathBuf,

    /// Options to pass through to the apt-get command
    #[arg(short = 'o', long, default_value = "", hide_default_value = true, allow_hyphen_values = true)]
    pub extra_options: String,

    /// How many extra 'q's to pass to apt-get (-q is always passed)
    #[arg(short, long, default_value_t = 1)]
    pub quiet: u32,
}

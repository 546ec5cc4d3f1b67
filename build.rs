// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Flags shared by install and satisfy
fn common_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("requirements")
            .short('r')
            .long("requirements")
            .value_name("FILE")
            .help("Read list from FILE (one per line, # is a comment); mutually exclusive with arguments"),
    )
    .arg(
        Arg::new("interactive")
            .long("interactive")
            .action(ArgAction::SetTrue)
            .help("Run interactively (omit -y from apt-get commands)"),
    )
    .arg(
        Arg::new("simulate")
            .short('s')
            .long("simulate")
            .action(ArgAction::SetTrue)
            .help("Run in simulated mode (include -s in apt-get commands)"),
    )
    .arg(
        Arg::new("no_update")
            .short('U')
            .long("no-update")
            .action(ArgAction::SetTrue)
            .help("Skip running 'apt-get update' before installing"),
    )
    .arg(
        Arg::new("keep_cache")
            .short('C')
            .long("keep-cache")
            .action(ArgAction::SetTrue)
            .help("Keep package cache after install; don't run 'apt-get clean'"),
    )
    .arg(
        Arg::new("keep_lists")
            .short('L')
            .long("keep-lists")
            .action(ArgAction::SetTrue)
            .help("Keep package lists used for install"),
    )
    .arg(
        Arg::new("apt_lists_dir")
            .long("apt-lists-dir")
            .value_name("DIR")
            .default_value("/var/lib/apt/lists")
            .help("Directory that apt keeps its package lists in"),
    )
    .arg(
        Arg::new("extra_options")
            .short('o')
            .long("extra-options")
            .help("Options to pass through to the apt-get command"),
    )
    .arg(
        Arg::new("quiet")
            .short('q')
            .long("quiet")
            .default_value("1")
            .help("How many extra 'q's to pass to apt-get (-q is always passed)"),
    )
}

fn build_cli() -> Command {
    Command::new("apt-container")
        .version(env!("CARGO_PKG_VERSION"))
        .about("wrapper around apt-get tools, better suited for use in container building")
        .arg(
            Arg::new("apt_get")
                .long("apt-get")
                .value_name("PATH")
                .default_value("apt-get")
                .help("apt-get executable to run (env: APT_CONTAINER_APT_GET)"),
        )
        .subcommand(common_args(
            Command::new("install")
                .visible_alias("i")
                .about("Container-friendly version of 'apt-get install'")
                .arg(Arg::new("packages").num_args(0..).help("Packages to install")),
        ))
        .subcommand(common_args(
            Command::new("satisfy")
                .visible_alias("s")
                .about("Container-friendly version of 'apt-get satisfy'; uses dependency strings")
                .arg(
                    Arg::new("dependencies")
                        .num_args(0..)
                        .help("Dependency expressions to satisfy"),
                ),
        ))
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(Arg::new("shell").required(true).help("Shell to generate completions for")),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=OUT_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = out_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("apt-container.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}

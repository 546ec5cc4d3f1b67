// src/apt/command.rs

//! apt-get argument assembly
//!
//! Arguments are laid out as:
//!
//! ```text
//! <action> [-s] [-y] -q[q...] [extra options...] [targets...]
//! ```
//!
//! Extra options are split with shell rules so quoted values survive as one
//! argument. Targets are passed literally.

use crate::error::{Error, Result};
use std::fmt;

/// apt-get subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Satisfy,
    Update,
    Clean,
}

impl Action {
    /// apt-get verb for this action
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Satisfy => "satisfy",
            Self::Update => "update",
            Self::Clean => "clean",
        }
    }

    /// `update` always touches the real index, so it never takes `-s`
    pub fn supports_simulate(&self) -> bool {
        !matches!(self, Self::Update)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flags shared by every apt-get invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationOptions {
    /// Dry run (`-s`)
    pub simulate: bool,
    /// Leave confirmation prompts to the user (omit `-y`)
    pub interactive: bool,
    /// Number of extra `q`s beyond the first
    pub quiet_level: u32,
    /// Passthrough options, shell-quoted
    pub extra_options: String,
}

impl InvocationOptions {
    /// Same flags without passthrough options
    pub fn without_extra_options(&self) -> Self {
        Self {
            extra_options: String::new(),
            ..self.clone()
        }
    }

    /// Whether echoing of commands is suppressed
    pub fn is_super_quiet(&self) -> bool {
        self.quiet_level >= 2
    }
}

/// A fully assembled apt-get invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AptCommand {
    action: Action,
    args: Vec<String>,
}

impl AptCommand {
    /// Assemble the argument vector for `action` on `targets`
    pub fn build(action: Action, targets: &[String], opts: &InvocationOptions) -> Result<Self> {
        let mut args = vec![action.as_str().to_string()];

        if opts.simulate && action.supports_simulate() {
            args.push("-s".to_string());
        }
        if !opts.interactive {
            args.push("-y".to_string());
        }
        args.push(quiet_flag(opts.quiet_level));

        let extra = shell_words::split(&opts.extra_options)
            .map_err(|e| Error::OptionParse(format!("{}: {}", e, opts.extra_options)))?;
        args.extend(extra);
        args.extend(targets.iter().cloned());

        Ok(Self { action, args })
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Arguments passed to apt-get, starting with the verb
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Shell-quoted command line as it would be typed
    pub fn render(&self, program: &str) -> String {
        shell_words::join(std::iter::once(program).chain(self.args.iter().map(String::as_str)))
    }
}

/// `-q` repeated `quiet_level + 1` times
fn quiet_flag(quiet_level: u32) -> String {
    format!("-{}", "q".repeat(quiet_level as usize + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_install_simulated() {
        let opts = InvocationOptions {
            simulate: true,
            interactive: false,
            quiet_level: 1,
            extra_options: String::new(),
        };
        let cmd = AptCommand::build(Action::Install, &strings(&["curl", "vim"]), &opts).unwrap();
        assert_eq!(cmd.args(), strings(&["install", "-s", "-y", "-qq", "curl", "vim"]).as_slice());
        assert_eq!(cmd.action(), Action::Install);
    }

    #[test]
    fn test_update_never_simulates() {
        let opts = InvocationOptions {
            simulate: true,
            ..Default::default()
        };
        let cmd = AptCommand::build(Action::Update, &[], &opts).unwrap();
        assert!(!cmd.args().contains(&"-s".to_string()));

        for action in [Action::Install, Action::Satisfy, Action::Clean] {
            let cmd = AptCommand::build(action, &[], &opts).unwrap();
            assert_eq!(cmd.args()[1], "-s", "{} should simulate", action);
        }
    }

    #[test]
    fn test_interactive_omits_yes() {
        let opts = InvocationOptions {
            interactive: true,
            ..Default::default()
        };
        let cmd = AptCommand::build(Action::Clean, &[], &opts).unwrap();
        assert_eq!(cmd.args(), strings(&["clean", "-q"]).as_slice());
    }

    #[test]
    fn test_quiet_flag_length() {
        for level in 0..5u32 {
            let flag = quiet_flag(level);
            assert!(flag.starts_with('-'));
            assert_eq!(flag.len() - 1, level as usize + 1);
            assert!(flag[1..].chars().all(|c| c == 'q'));
        }
    }

    #[test]
    fn test_extra_options_before_targets() {
        let opts = InvocationOptions {
            extra_options: r#"--no-install-recommends -o "Dpkg::Options::=--force-confdef --force-confold""#
                .to_string(),
            ..Default::default()
        };
        let cmd = AptCommand::build(Action::Install, &strings(&["curl"]), &opts).unwrap();
        assert_eq!(
            cmd.args(),
            strings(&[
                "install",
                "-y",
                "-q",
                "--no-install-recommends",
                "-o",
                "Dpkg::Options::=--force-confdef --force-confold",
                "curl",
            ])
            .as_slice()
        );
    }

    #[test]
    fn test_targets_are_not_split() {
        let targets = strings(&["libc6 (>= 2.31)", "foo | bar"]);
        let cmd = AptCommand::build(Action::Satisfy, &targets, &InvocationOptions::default()).unwrap();
        assert_eq!(&cmd.args()[3..], targets.as_slice());
    }

    #[test]
    fn test_unbalanced_quotes_rejected() {
        let opts = InvocationOptions {
            extra_options: "--option 'unterminated".to_string(),
            ..Default::default()
        };
        let err = AptCommand::build(Action::Install, &strings(&["curl"]), &opts).unwrap_err();
        assert!(matches!(err, Error::OptionParse(_)));
    }

    #[test]
    fn test_render_quotes_arguments() {
        let cmd = AptCommand::build(
            Action::Satisfy,
            &strings(&["libc6 (>= 2.31)"]),
            &InvocationOptions::default(),
        )
        .unwrap();
        assert_eq!(cmd.render("apt-get"), "apt-get satisfy -y -q 'libc6 (>= 2.31)'");
    }

    #[test]
    fn test_without_extra_options() {
        let opts = InvocationOptions {
            simulate: true,
            interactive: true,
            quiet_level: 3,
            extra_options: "--no-install-recommends".to_string(),
        };
        let stripped = opts.without_extra_options();
        assert!(stripped.extra_options.is_empty());
        assert_eq!(stripped.quiet_level, 3);
        assert!(stripped.simulate && stripped.interactive);
    }
}

// tests/common/mod.rs

//! Shared test utilities: a fake apt-get that records its invocations.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A shell script standing in for apt-get.
///
/// Every invocation appends its arguments as one line to `calls.log`.
/// Keep the struct alive for as long as the script is used.
pub struct FakeAptGet {
    dir: TempDir,
    failures: Vec<(String, i32)>,
    hanging: Vec<String>,
}

impl FakeAptGet {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            failures: Vec::new(),
            hanging: Vec::new(),
        }
    }

    /// Exit with `code` whenever apt-get is invoked with `action`
    pub fn failing(mut self, action: &str, code: i32) -> Self {
        self.failures.push((action.to_string(), code));
        self
    }

    /// Block for a while on `action`, ignoring SIGINT and SIGTERM
    pub fn hanging(mut self, action: &str) -> Self {
        self.hanging.push(action.to_string());
        self
    }

    /// Write the script and return its path
    pub fn install(&self) -> String {
        let mut cases = String::new();
        for (action, code) in &self.failures {
            cases.push_str(&format!("    {}) exit {} ;;\n", action, code));
        }
        for action in &self.hanging {
            cases.push_str(&format!("    {}) trap '' INT TERM; sleep 10 ;;\n", action));
        }
        let script = format!(
            "#!/bin/sh\necho \"$*\" >> '{}'\ncase \"$1\" in\n{}esac\nexit 0\n",
            self.log_path().display(),
            cases
        );

        let path = self.dir.path().join("apt-get");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_str().unwrap().to_string()
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.path().join("calls.log")
    }

    /// Recorded invocations, one argument string per call
    pub fn calls(&self) -> Vec<String> {
        match fs::read_to_string(self.log_path()) {
            Ok(log) => log.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// First word of every recorded invocation
    pub fn verbs(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|c| c.split_whitespace().next().map(str::to_string))
            .collect()
    }
}

/// Create a populated apt lists directory inside `root`
pub fn populated_lists_dir(root: &Path) -> PathBuf {
    let lists = root.join("lists");
    fs::create_dir_all(lists.join("partial")).unwrap();
    fs::write(lists.join("deb.debian.org_debian_dists_stable_InRelease"), "release").unwrap();
    lists
}

/// Write a requirements file inside `root`
pub fn requirements_file(root: &Path, contents: &str) -> PathBuf {
    let path = root.join("requirements.txt");
    fs::write(&path, contents).unwrap();
    path
}

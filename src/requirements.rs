// src/requirements.rs

//! Requirements file parsing
//!
//! A requirements file holds one package name (or dependency expression for
//! `satisfy`) per line. Everything from the first `#` to the end of the line
//! is a comment; blank lines are ignored. Entries are otherwise passed to
//! apt-get untouched, so apt-get remains the only validator of their syntax.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Read requirements from a file, in file order
pub fn read_requirements_file(path: &Path) -> Result<Vec<String>> {
    let file_error = |source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(file_error)?;
    let mut requirements = Vec::new();
    for line in BufReader::new(file).lines() {
        if let Some(req) = parse_line(&line.map_err(file_error)?) {
            requirements.push(req);
        }
    }

    debug!(
        "Read {} requirements from {}",
        requirements.len(),
        path.display()
    );
    Ok(requirements)
}

/// Parse requirements from in-memory text
pub fn parse_requirements(text: &str) -> Vec<String> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<String> {
    let req = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    }
    .trim();

    if req.is_empty() {
        None
    } else {
        Some(req.to_string())
    }
}

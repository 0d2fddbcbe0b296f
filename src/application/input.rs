//! Input capture for tree sketches: file, piped stdin, or interactive paste.

use std::fs;
use std::io::{self, BufRead, IsTerminal, Read};
use std::path::Path;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};

/// Read the sketch from `file`, or from stdin when no file is given.
///
/// A terminal stdin switches to paste mode: lines are collected until the
/// first blank line. Piped stdin is read to end of input, since a piped
/// document may legitimately contain interior blank lines.
#[instrument(level = "debug")]
pub fn capture(file: Option<&Path>) -> ApplicationResult<String> {
    match file {
        Some(path) => fs::read_to_string(path).with_path_context("read tree file", path),
        None => read_stdin(),
    }
}

fn read_stdin() -> ApplicationResult<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("Paste a directory tree. Press Enter on an empty line to finish.\n");
        let mut lines = Vec::new();
        for line in stdin.lock().lines() {
            let line = line.with_context("read stdin")?;
            if line.trim().is_empty() {
                break;
            }
            lines.push(line);
        }
        debug!("captured {} pasted lines", lines.len());
        Ok(lines.join("\n"))
    } else {
        let mut input = String::new();
        stdin
            .lock()
            .read_to_string(&mut input)
            .with_context("read stdin")?;
        debug!("captured {} piped bytes", input.len());
        Ok(input)
    }
}

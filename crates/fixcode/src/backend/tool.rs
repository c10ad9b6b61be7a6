//! External tool invocation
//!
//! Sources are handed to tools through an exclusive temporary file that is
//! removed when the invocation returns, whether it succeeded or not.

use crate::common::{BackendError, BackendResult};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A command line tool run as `<program> [args...] <source file>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTool {
    program: PathBuf,
    args: Vec<String>,
}

impl ExternalTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn display_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Write `source` to a fresh temporary file, run the tool on it and
    /// return its standard output with surrounding whitespace removed.
    ///
    /// Blocks until the tool exits; there is no timeout.
    pub fn run(&self, source: &str) -> BackendResult<String> {
        let mut file = tempfile::Builder::new().prefix("fixcode-").tempfile()?;
        file.write_all(source.as_bytes())?;
        file.flush()?;

        log::debug!(
            "running `{} {} {}`",
            self.display_name(),
            self.args.join(" "),
            file.path().display()
        );
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(file.path())
            .output()
            .map_err(|source| BackendError::Spawn {
                tool: self.display_name(),
                source,
            })?;

        if !output.status.success() {
            return Err(BackendError::ToolFailed {
                tool: self.display_name(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| BackendError::output(self.display_name(), "output is not valid UTF-8"))?;
        Ok(stdout.trim().to_string())
    }
}

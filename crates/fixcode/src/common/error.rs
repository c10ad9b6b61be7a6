//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use std::path::PathBuf;
use thiserror::Error;

/// Maximum number of characters of a code string shown in messages
const SNIPPET_LEN: usize = 50;

/// Shorten a code string for display in error messages.
pub fn snippet(code: &str) -> String {
    match code.char_indices().nth(SNIPPET_LEN) {
        Some((end, _)) => format!("{}..", &code[..end]),
        None => code.to_string(),
    }
}

/// Failure reported by a backend (external tool or contract lookup)
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to run `{tool}`")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{tool}` exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("unexpected output from `{tool}`: {message}")]
    Output { tool: String, message: String },

    #[error("contract `{0}` not found in compiled solidity contracts")]
    ContractNotFound(String),

    #[error("{0} backend is not configured")]
    NotConfigured(&'static str),

    #[error("{0} compilation is only supported on posix systems")]
    UnsupportedPlatform(&'static str),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

impl BackendError {
    pub fn output(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Output {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Code resolution error
///
/// Every variant produced while resolving a code string carries the
/// (truncated) code text it failed on.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("invalid hex `{hex}`: {reason}")]
    InvalidFormat { hex: String, reason: &'static str },

    #[error("only one solidity contract is allowed per code field, got {count}: `{code}`")]
    AmbiguousContract { count: usize, code: String },

    #[error("trying to compile code of unknown type (missing 0x prefix?): `{code}`")]
    UnknownCodeFormat { code: String },

    #[error("bytecode is missing: `{code}`")]
    MissingBytecode { code: String },

    #[error("{feature} compilation is not supported on this platform: `{code}`")]
    UnsupportedPlatform { feature: &'static str, code: String },

    #[error("{backend} backend failed on `{code}`")]
    Backend {
        backend: &'static str,
        code: String,
        #[source]
        source: BackendError,
    },

    #[error("invalid configuration {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read configuration {}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResolveError {
    pub fn invalid_format(hex: &str, reason: &'static str) -> Self {
        Self::InvalidFormat {
            hex: snippet(hex),
            reason,
        }
    }

    pub fn ambiguous_contract(count: usize, code: &str) -> Self {
        Self::AmbiguousContract {
            count,
            code: snippet(code),
        }
    }

    pub fn unknown_code_format(code: &str) -> Self {
        Self::UnknownCodeFormat {
            code: snippet(code),
        }
    }

    pub fn missing_bytecode(code: &str) -> Self {
        Self::MissingBytecode {
            code: snippet(code),
        }
    }

    /// Attach the offending code to a backend failure.
    ///
    /// Platform failures are surfaced as their own kind rather than as a
    /// generic backend error.
    pub fn backend(backend: &'static str, code: &str, source: BackendError) -> Self {
        match source {
            BackendError::UnsupportedPlatform(feature) => Self::UnsupportedPlatform {
                feature,
                code: snippet(code),
            },
            source => Self::Backend {
                backend,
                code: snippet(code),
                source,
            },
        }
    }

    /// Short title used as the diagnostic headline
    fn title(&self) -> &'static str {
        match self {
            ResolveError::InvalidFormat { .. } => "Invalid hex",
            ResolveError::AmbiguousContract { .. } => "Ambiguous solidity contract",
            ResolveError::UnknownCodeFormat { .. } => "Unknown code format",
            ResolveError::MissingBytecode { .. } => "Missing bytecode",
            ResolveError::UnsupportedPlatform { .. } => "Unsupported platform",
            ResolveError::Backend { .. } => "Backend error",
            ResolveError::Config { .. } | ResolveError::ReadConfig { .. } => "Configuration error",
        }
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    /// Build the diagnostic for an error raised while resolving the code
    /// string registered as `file_id`.
    pub fn diagnostic(&self, file_id: usize, error: &ResolveError) -> Diagnostic<usize> {
        let span = self
            .files
            .get(file_id)
            .map(|file| 0..file.source().len())
            .unwrap_or(0..0);

        let causes = std::iter::successors(std::error::Error::source(error), |e| e.source())
            .map(|e| format!("caused by: {e}"));

        let diagnostic = Diagnostic::error().with_message(error.title());
        match error {
            ResolveError::Config { .. } | ResolveError::ReadConfig { .. } => {
                diagnostic.with_notes(std::iter::once(error.to_string()).chain(causes).collect())
            }
            _ => diagnostic
                .with_labels(vec![Label::primary(file_id, span).with_message(error.to_string())])
                .with_notes(causes.collect()),
        }
    }

    pub fn report_error(&self, file_id: usize, error: &ResolveError) {
        let diagnostic = self.diagnostic(file_id, error);
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snippet_short() {
        assert_eq!(snippet(":raw 0x00"), ":raw 0x00");
    }

    #[test]
    fn test_snippet_truncates() {
        let code = "a".repeat(80);
        assert_eq!(snippet(&code), format!("{}..", "a".repeat(50)));
    }

    #[test]
    fn test_unsupported_platform_is_lifted() {
        let err = ResolveError::backend("lll", "{ (STOP) }", BackendError::UnsupportedPlatform("lll"));
        assert!(matches!(err, ResolveError::UnsupportedPlatform { feature: "lll", .. }));
    }

    #[test]
    fn test_backend_error_keeps_source() {
        let err = ResolveError::backend(
            "solidity",
            ":solidity Foo",
            BackendError::ContractNotFound("Foo".into()),
        );
        assert_eq!(err.to_string(), "solidity backend failed on `:solidity Foo`");
        assert_eq!(
            std::error::Error::source(&err).map(ToString::to_string).as_deref(),
            Some("contract `Foo` not found in compiled solidity contracts")
        );
    }

    #[test]
    fn test_diagnostic_labels_code() {
        let mut reporter = DiagnosticReporter::new();
        let file_id = reporter.add_file("code", "hello world");
        let diagnostic = reporter.diagnostic(file_id, &ResolveError::unknown_code_format("hello world"));
        assert_eq!(diagnostic.message, "Unknown code format");
        assert_eq!(diagnostic.labels[0].range, 0..11);
    }

    #[test]
    fn test_diagnostic_notes_cause_chain() {
        let mut reporter = DiagnosticReporter::new();
        let file_id = reporter.add_file("code", ":solidity Foo");
        let err = ResolveError::backend(
            "solidity",
            ":solidity Foo",
            BackendError::ContractNotFound("Foo".into()),
        );
        let diagnostic = reporter.diagnostic(file_id, &err);
        assert_eq!(
            diagnostic.notes,
            vec!["caused by: contract `Foo` not found in compiled solidity contracts".to_string()]
        );
    }

    #[test]
    fn test_read_config_names_path_once() {
        let err = ResolveError::ReadConfig {
            path: PathBuf::from("/etc/fixcode.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to read configuration /etc/fixcode.json");
        assert_eq!(format!("{:#}", anyhow::Error::new(err)), "failed to read configuration /etc/fixcode.json: not found");
    }
}

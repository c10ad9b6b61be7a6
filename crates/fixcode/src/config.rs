//! Resolver configuration
//!
//! Loaded once from a JSON file and handed to the resolver explicitly:
//!
//! ```json
//! {
//!   "customCompilers": [{ "prefix": ":vyper", "path": "/usr/local/bin/vyper-hex" }],
//!   "fillRawBytecode": true,
//!   "solc": "/usr/bin/solc"
//! }
//! ```

use crate::common::{ResolveError, ResolveResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A user-supplied compiler selected by a directive prefix
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomCompiler {
    /// Directive prefix, e.g. `:vyper`
    pub prefix: String,
    /// Tool invoked as `<path> <source file>`
    pub path: PathBuf,
}

impl CustomCompiler {
    pub fn new(prefix: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            path: path.into(),
        }
    }
}

/// Configuration consumed by [`CodeResolver`](crate::CodeResolver)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ResolverConfig {
    /// Custom compilers, tried in order before built-in directives
    pub custom_compilers: Vec<CustomCompiler>,
    /// Fill mode: warn when a fixture carries raw bytecode instead of source
    pub fill_raw_bytecode: bool,
    /// LLL compiler
    pub lllc: PathBuf,
    /// Solidity compiler, also used for Yul
    pub solc: PathBuf,
    /// ABI encoding tool
    pub abi_encoder: Option<PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            custom_compilers: Vec::new(),
            fill_raw_bytecode: false,
            lllc: PathBuf::from("lllc"),
            solc: PathBuf::from("solc"),
            abi_encoder: None,
        }
    }
}

impl ResolverConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_path(path: &Path) -> ResolveResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ResolveError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ResolveError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_custom_compiler(mut self, compiler: CustomCompiler) -> Self {
        self.custom_compilers.push(compiler);
        self
    }

    pub fn with_fill_raw_bytecode(mut self, fill: bool) -> Self {
        self.fill_raw_bytecode = fill;
        self
    }
}

//! Custom compiler registry
//!
//! User-configured compilers are tried before any built-in directive, in
//! configuration order. The first prefix found in the code followed by a
//! space or newline wins.

use crate::backend::ExternalTool;
use crate::common::{ResolveError, ResolveResult};
use crate::config::CustomCompiler;
use crate::directive::find_prefixed;
use crate::hex::check_hex_has_even_length;

struct Entry {
    prefix: String,
    tool: ExternalTool,
}

/// Ordered (prefix, tool) table, read-only once built
pub struct CustomCompilerRegistry {
    entries: Vec<Entry>,
}

impl CustomCompilerRegistry {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn from_config(compilers: &[CustomCompiler]) -> Self {
        let mut registry = Self::new();
        for compiler in compilers {
            registry.register(compiler);
        }
        registry
    }

    pub fn register(&mut self, compiler: &CustomCompiler) {
        self.entries.push(Entry {
            prefix: compiler.prefix.clone(),
            tool: ExternalTool::new(&compiler.path),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compile `code` with the first matching custom compiler.
    ///
    /// Returns `Ok(None)` when no registered prefix matches.
    pub fn try_compile(&self, code: &str) -> ResolveResult<Option<String>> {
        for entry in &self.entries {
            log::trace!("probing custom compiler prefix `{}`", entry.prefix);
            let Some(payload) = find_prefixed(code, &entry.prefix) else {
                continue;
            };

            log::debug!(
                "compiling with custom compiler `{}` ({})",
                entry.prefix,
                entry.tool.program().display()
            );
            let compiled = entry
                .tool
                .run(payload)
                .map_err(|e| ResolveError::backend("custom", code, e))?;
            check_hex_has_even_length(&compiled)?;
            return Ok(Some(compiled));
        }
        Ok(None)
    }
}

impl Default for CustomCompilerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

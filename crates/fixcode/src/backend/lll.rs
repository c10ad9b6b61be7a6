//! LLL compilation through `lllc`

use super::LllCompiler;
use super::tool::ExternalTool;
use crate::common::BackendResult;
use std::path::PathBuf;

pub struct Lllc {
    tool: ExternalTool,
}

impl Lllc {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            tool: ExternalTool::new(program),
        }
    }
}

impl LllCompiler for Lllc {
    #[cfg(unix)]
    fn compile(&self, source: &str) -> BackendResult<String> {
        self.tool.run(source).map(|hex| format!("0x{hex}"))
    }

    #[cfg(not(unix))]
    fn compile(&self, _source: &str) -> BackendResult<String> {
        Err(crate::common::BackendError::UnsupportedPlatform("lll"))
    }
}

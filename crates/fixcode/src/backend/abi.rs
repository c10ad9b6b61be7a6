//! ABI encoding through an external encoder tool

use super::AbiEncoder;
use super::tool::ExternalTool;
use crate::common::{BackendError, BackendResult};
use std::path::PathBuf;

/// Encoder tool invoked as `<program> <spec file>`; unconfigured encoders
/// reject every request.
pub struct AbiTool {
    tool: Option<ExternalTool>,
}

impl AbiTool {
    pub fn new(program: Option<PathBuf>) -> Self {
        Self {
            tool: program.map(ExternalTool::new),
        }
    }
}

impl AbiEncoder for AbiTool {
    fn encode(&self, spec: &str) -> BackendResult<String> {
        let tool = self.tool.as_ref().ok_or(BackendError::NotConfigured("abi"))?;
        tool.run(spec)
    }
}

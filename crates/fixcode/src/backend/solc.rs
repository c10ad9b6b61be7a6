//! Solidity and Yul compilation through `solc`

use super::tool::ExternalTool;
use super::{SolContracts, SolidityCompiler, YulCompiler};
use crate::common::{BackendError, BackendResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// `solc --combined-json bin` output
#[derive(Debug, Deserialize)]
struct CombinedJson {
    contracts: BTreeMap<String, CombinedContract>,
}

#[derive(Debug, Deserialize)]
struct CombinedContract {
    bin: String,
}

/// Marker line preceding the bytecode in `solc --strict-assembly --bin` output
const YUL_BINARY_MARKER: &str = "Binary representation:";

/// The Solidity compiler
pub struct Solc {
    program: PathBuf,
}

impl Solc {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn tool(&self, args: &[&str]) -> ExternalTool {
        ExternalTool::new(&self.program).with_args(args.iter().copied())
    }

    fn name(&self) -> String {
        self.program.display().to_string()
    }
}

/// Extract contracts from combined JSON output. Keys look like
/// `<source path>:<contract name>`.
fn parse_combined_json(tool: &str, json: &str) -> BackendResult<SolContracts> {
    let output: CombinedJson = serde_json::from_str(json)
        .map_err(|e| BackendError::output(tool, format!("invalid combined json: {e}")))?;

    Ok(output
        .contracts
        .into_iter()
        .map(|(key, contract)| {
            let name = key.rsplit(':').next().unwrap_or(&key).to_string();
            (name, format!("0x{}", contract.bin))
        })
        .collect())
}

fn parse_yul_binary(tool: &str, output: &str) -> BackendResult<String> {
    let mut lines = output.lines().skip_while(|line| line.trim() != YUL_BINARY_MARKER);
    lines
        .nth(1)
        .map(|hex| format!("0x{}", hex.trim()))
        .ok_or_else(|| BackendError::output(tool, "no binary representation in output"))
}

impl SolidityCompiler for Solc {
    fn compile(&self, source: &str) -> BackendResult<SolContracts> {
        let output = self.tool(&["--combined-json", "bin"]).run(source)?;
        parse_combined_json(&self.name(), &output)
    }
}

impl YulCompiler for Solc {
    fn compile(&self, source: &str) -> BackendResult<String> {
        let output = self.tool(&["--strict-assembly", "--bin"]).run(source)?;
        parse_yul_binary(&self.name(), &output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_combined_json() {
        let json = r#"{
            "contracts": {
                "/tmp/fixcode-abc:A": { "bin": "6001" },
                "/tmp/fixcode-abc:B": { "bin": "6002" }
            },
            "version": "0.8.24"
        }"#;
        let contracts = parse_combined_json("solc", json).unwrap();
        assert_eq!(contracts.get_code("A").unwrap(), "0x6001");
        assert_eq!(contracts.get_code("B").unwrap(), "0x6002");
    }

    #[test]
    fn test_parse_combined_json_garbage() {
        assert!(matches!(
            parse_combined_json("solc", "Error: bad"),
            Err(BackendError::Output { .. })
        ));
    }

    #[test]
    fn test_parse_yul_binary() {
        let output = "\n======= /tmp/x (EVM) =======\n\nBinary representation:\n600160005500\n\nText representation:\n";
        assert_eq!(parse_yul_binary("solc", output).unwrap(), "0x600160005500");
    }

    #[test]
    fn test_parse_yul_without_binary() {
        assert!(parse_yul_binary("solc", "Text representation:\n").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_solidity_through_tool() {
        use crate::backend::tool::test_support::script;

        let dir = tempfile::tempdir().unwrap();
        let solc = Solc::new(script(
            dir.path(),
            "solc",
            r#"echo '{"contracts":{"x:Only":{"bin":"00"}}}'"#,
        ));
        let contracts = SolidityCompiler::compile(&solc, "pragma solidity ^0.8.0;").unwrap();
        assert_eq!(contracts.get_code("Only").unwrap(), "0x00");
    }
}

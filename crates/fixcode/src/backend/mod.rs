//! Backend traits and implementations
//!
//! Backends turn a directive payload into bytecode. They are external
//! collaborators: the resolver only sees source text going in and hex (or a
//! [`BackendError`](crate::common::BackendError)) coming out.

pub mod abi;
pub mod contracts;
pub mod lll;
pub mod solc;
pub mod tool;

use crate::common::BackendResult;
use crate::config::ResolverConfig;

pub use abi::AbiTool;
pub use contracts::{CompiledContract, SolContracts};
pub use lll::Lllc;
pub use solc::Solc;
pub use tool::ExternalTool;

/// Compiles full Solidity source into its contracts
pub trait SolidityCompiler: Send + Sync {
    fn compile(&self, source: &str) -> BackendResult<SolContracts>;
}

/// Compiles Yul source into `0x`-prefixed bytecode
pub trait YulCompiler: Send + Sync {
    fn compile(&self, source: &str) -> BackendResult<String>;
}

/// Encodes an ABI call description into hex
pub trait AbiEncoder: Send + Sync {
    fn encode(&self, spec: &str) -> BackendResult<String>;
}

/// Compiles LLL source into `0x`-prefixed bytecode
pub trait LllCompiler: Send + Sync {
    fn compile(&self, source: &str) -> BackendResult<String>;
}

/// The set of backends a resolver dispatches to
pub struct Backends {
    pub solidity: Box<dyn SolidityCompiler>,
    pub yul: Box<dyn YulCompiler>,
    pub abi: Box<dyn AbiEncoder>,
    pub lll: Box<dyn LllCompiler>,
}

impl Backends {
    /// Tool-backed backends located through `config`
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            solidity: Box::new(Solc::new(&config.solc)),
            yul: Box::new(Solc::new(&config.solc)),
            abi: Box::new(AbiTool::new(config.abi_encoder.clone())),
            lll: Box::new(Lllc::new(&config.lllc)),
        }
    }
}

impl Default for Backends {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

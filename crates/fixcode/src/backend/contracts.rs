//! Compiled Solidity contract set

use crate::common::{BackendError, BackendResult};

/// A compiled contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledContract {
    pub name: String,
    /// `0x`-prefixed deployment bytecode
    pub code: String,
}

/// Contracts produced by one Solidity compilation, in compiler output order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolContracts {
    contracts: Vec<CompiledContract>,
}

impl SolContracts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, code: impl Into<String>) {
        self.contracts.push(CompiledContract {
            name: name.into(),
            code: code.into(),
        });
    }

    pub fn contracts(&self) -> &[CompiledContract] {
        &self.contracts
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Bytecode of the contract called `name`
    pub fn get_code(&self, name: &str) -> BackendResult<&str> {
        self.contracts
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.code.as_str())
            .ok_or_else(|| BackendError::ContractNotFound(name.to_string()))
    }
}

impl<N: Into<String>, C: Into<String>> FromIterator<(N, C)> for SolContracts {
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        let mut contracts = Self::new();
        for (name, code) in iter {
            contracts.insert(name, code);
        }
        contracts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_code() {
        let contracts: SolContracts = [("Foo", "0x6001"), ("Bar", "0x6002")].into_iter().collect();
        assert_eq!(contracts.get_code("Bar").unwrap(), "0x6002");
        assert_eq!(contracts.len(), 2);
    }

    #[test]
    fn test_missing_contract() {
        let contracts = SolContracts::new();
        assert!(matches!(contracts.get_code("Foo"), Err(BackendError::ContractNotFound(name)) if name == "Foo"));
    }
}

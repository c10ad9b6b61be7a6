//! Filler documents
//!
//! A filler is a JSON object of tests. Each test may carry Solidity source
//! under `solidity`, accounts under `pre` whose `code` needs resolving, and
//! transaction `data` entries written the same way as code.

use crate::backend::SolContracts;
use crate::common::{ResolveError, ResolveResult};
use crate::resolver::CodeResolver;
use serde_json::{Map, Value};
use thiserror::Error;

/// A code field that failed to resolve, with its location in the filler
#[derive(Error, Debug)]
#[error("{test}: failed to resolve {field}")]
pub struct FieldError {
    pub test: String,
    pub field: String,
    /// Full, untruncated code text of the field
    pub code: String,
    #[source]
    pub source: ResolveError,
}

struct TestFiller<'a> {
    name: &'a str,
    resolver: &'a CodeResolver,
    pre_solidity: SolContracts,
}

impl TestFiller<'_> {
    fn field_error(&self, field: String, code: &str, source: ResolveError) -> FieldError {
        FieldError {
            test: self.name.to_string(),
            field,
            code: code.to_string(),
            source,
        }
    }

    /// Resolve the string held in `slot` in place; non-string slots are left alone.
    fn resolve_slot(&self, slot: &mut Value, field: impl FnOnce() -> String) -> Result<bool, FieldError> {
        let Value::String(code) = slot else {
            return Ok(false);
        };
        let compiled = self
            .resolver
            .resolve(code, &self.pre_solidity)
            .map_err(|e| self.field_error(field(), code, e))?;
        *code = compiled;
        Ok(true)
    }

    fn fill(&self, test: &mut Map<String, Value>) -> Result<usize, FieldError> {
        let mut resolved = 0;

        if let Some(Value::Object(pre)) = test.get_mut("pre") {
            for (address, account) in pre.iter_mut() {
                if let Some(code) = account.get_mut("code") {
                    resolved += usize::from(self.resolve_slot(code, || format!("code of account {address}"))?);
                }
            }
        }

        let data = test
            .get_mut("transaction")
            .and_then(|tx| tx.get_mut("data"))
            .and_then(Value::as_array_mut);
        if let Some(data) = data {
            for (index, entry) in data.iter_mut().enumerate() {
                let slot = match entry {
                    Value::Object(object) => match object.get_mut("data") {
                        Some(slot) => slot,
                        None => continue,
                    },
                    other => other,
                };
                resolved += usize::from(self.resolve_slot(slot, || format!("transaction data #{index}"))?);
            }
        }

        Ok(resolved)
    }
}

fn compile_solidity(resolver: &CodeResolver, test: &Map<String, Value>) -> ResolveResult<SolContracts> {
    match test.get("solidity") {
        Some(Value::String(source)) => resolver
            .backends()
            .solidity
            .compile(source)
            .map_err(|e| ResolveError::backend("solidity", source, e)),
        _ => Ok(SolContracts::new()),
    }
}

/// Resolve every code and data field of every test in `filler`, returning
/// the number of fields resolved.
pub fn fill_document(filler: &mut Map<String, Value>, resolver: &CodeResolver) -> Result<usize, FieldError> {
    let mut resolved = 0;
    for (name, test) in filler.iter_mut() {
        let Value::Object(test) = test else {
            log::warn!("skipping `{name}`: test is not an object");
            continue;
        };

        let pre_solidity = compile_solidity(resolver, test).map_err(|source| FieldError {
            test: name.clone(),
            field: "solidity".to_string(),
            code: test.get("solidity").and_then(Value::as_str).unwrap_or_default().to_string(),
            source,
        })?;

        let test_filler = TestFiller {
            name,
            resolver,
            pre_solidity,
        };
        let count = test_filler.fill(test)?;
        log::debug!("{name}: resolved {count} code fields");
        resolved += count;
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AbiEncoder, Backends, LllCompiler, SolidityCompiler, YulCompiler};
    use crate::common::BackendResult;
    use crate::config::ResolverConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct Stub;

    impl SolidityCompiler for Stub {
        fn compile(&self, _source: &str) -> BackendResult<SolContracts> {
            Ok([("Callee", "0x6042")].into_iter().collect())
        }
    }

    impl YulCompiler for Stub {
        fn compile(&self, _source: &str) -> BackendResult<String> {
            Ok("0x00".to_string())
        }
    }

    impl AbiEncoder for Stub {
        fn encode(&self, _spec: &str) -> BackendResult<String> {
            Ok("0xabcd".to_string())
        }
    }

    impl LllCompiler for Stub {
        fn compile(&self, _source: &str) -> BackendResult<String> {
            Ok("0x6001".to_string())
        }
    }

    fn resolver() -> CodeResolver {
        let backends = Backends {
            solidity: Box::new(Stub),
            yul: Box::new(Stub),
            abi: Box::new(Stub),
            lll: Box::new(Stub),
        };
        CodeResolver::with_backends(&ResolverConfig::default(), backends)
    }

    #[test]
    fn test_fill_document() {
        let mut filler = json!({
            "callTest": {
                "solidity": "pragma solidity ^0.8.0; contract Callee {}",
                "pre": {
                    "0x095e7baea6a6c7c4c2dfeb977efac326af552d87": { "balance": "1", "code": "{ (SSTORE 0 1) }" },
                    "0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b": { "balance": "1", "code": ":solidity Callee" },
                    "0xb94f5374fce5edbc8e2a8697c15331677e6ebf0b": { "balance": "1", "code": "" }
                },
                "transaction": {
                    "data": [":abi f(uint) 1", { "data": ":raw 0x01", "accessList": [] }, "0x"]
                }
            }
        });

        let count = fill_document(filler.as_object_mut().unwrap(), &resolver()).unwrap();
        assert_eq!(count, 6);

        let test = &filler["callTest"];
        assert_eq!(test["pre"]["0x095e7baea6a6c7c4c2dfeb977efac326af552d87"]["code"], "0x6001");
        assert_eq!(test["pre"]["0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b"]["code"], "0x6042");
        assert_eq!(test["pre"]["0xb94f5374fce5edbc8e2a8697c15331677e6ebf0b"]["code"], "0x");
        assert_eq!(test["transaction"]["data"], json!(["0xabcd", { "data": "0x01", "accessList": [] }, "0x"]));
    }

    #[test]
    fn test_field_error_location() {
        let mut filler = json!({
            "badTest": { "pre": { "0x01": { "code": "hello world" } } }
        });

        let err = fill_document(filler.as_object_mut().unwrap(), &resolver()).unwrap_err();
        assert_eq!(err.test, "badTest");
        assert_eq!(err.field, "code of account 0x01");
        assert_eq!(err.code, "hello world");
        assert!(matches!(err.source, ResolveError::UnknownCodeFormat { .. }));
    }

    #[test]
    fn test_non_object_tests_skipped() {
        let mut filler = json!({ "_info": "generated", "empty": {} });
        assert_eq!(fill_document(filler.as_object_mut().unwrap(), &resolver()).unwrap(), 0);
    }
}

//! Code resolution entry point
//!
//! `resolve` turns one fixture code string into bytecode:
//! 1. empty input becomes `0x`
//! 2. `0x` input is validated and returned as is
//! 3. custom compilers get the first chance
//! 4. built-in directives dispatch to their backends

use crate::backend::{Backends, SolContracts};
use crate::common::{BackendError, ResolveError, ResolveResult, snippet};
use crate::config::ResolverConfig;
use crate::directive::{self, Directive};
use crate::hex::{EMPTY_CODE, check_hex_has_even_length};
use crate::registry::CustomCompilerRegistry;

/// Resolves fixture code strings into bytecode
///
/// Holds only read-only state, so one resolver can serve any number of
/// code strings.
pub struct CodeResolver {
    fill_raw_bytecode: bool,
    registry: CustomCompilerRegistry,
    backends: Backends,
}

impl CodeResolver {
    /// Resolver using the tools named in `config`
    pub fn new(config: &ResolverConfig) -> Self {
        Self::with_backends(config, Backends::from_config(config))
    }

    pub fn with_backends(config: &ResolverConfig, backends: Backends) -> Self {
        Self {
            fill_raw_bytecode: config.fill_raw_bytecode,
            registry: CustomCompilerRegistry::from_config(&config.custom_compilers),
            backends,
        }
    }

    pub fn registry(&self) -> &CustomCompilerRegistry {
        &self.registry
    }

    pub fn backends(&self) -> &Backends {
        &self.backends
    }

    /// Resolve `code` into `0x`-prefixed (or `:raw`-verbatim) bytecode.
    ///
    /// `pre_solidity` holds contracts compiled ahead of time, used by the
    /// `:solidity <name>` directive.
    pub fn resolve(&self, code: &str, pre_solidity: &SolContracts) -> ResolveResult<String> {
        if code.is_empty() {
            return Ok(EMPTY_CODE.to_string());
        }

        if code.starts_with(EMPTY_CODE) {
            check_hex_has_even_length(code)?;
            if let Some(warning) = self.raw_bytecode_warning(code) {
                log::warn!("{warning}");
            }
            return Ok(code.to_string());
        }

        let compiled = match self.registry.try_compile(code)? {
            Some(compiled) => compiled,
            None => self.try_known_compilers(code, pre_solidity)?,
        };

        if compiled.is_empty() {
            return Err(ResolveError::missing_bytecode(code));
        }
        Ok(compiled)
    }

    /// Fill-mode warning for fixtures carrying bytecode instead of source
    fn raw_bytecode_warning(&self, code: &str) -> Option<String> {
        (self.fill_raw_bytecode && code.len() > EMPTY_CODE.len()).then(|| {
            format!("filling raw bytecode ('{}'), please provide the source!", snippet(code))
        })
    }

    /// Dispatch `code` to the built-in backend its directive selects.
    fn try_known_compilers(&self, code: &str, pre_solidity: &SolContracts) -> ResolveResult<String> {
        let Some(found) = directive::detect(code) else {
            return Err(ResolveError::unknown_code_format(code));
        };
        log::debug!("resolving `{}` as {:?}", snippet(code), found.directive);

        let backend_err = |e: BackendError| ResolveError::backend(found.directive.name(), code, e);
        let payload = found.payload;

        let compiled = match found.directive {
            Directive::SoliditySource => {
                let contracts = self.backends.solidity.compile(payload).map_err(backend_err)?;
                match contracts.contracts() {
                    [] => return Err(ResolveError::missing_bytecode(code)),
                    [only] => only.code.clone(),
                    many => return Err(ResolveError::ambiguous_contract(many.len(), code)),
                }
            }
            Directive::SolidityContract => {
                return pre_solidity
                    .get_code(payload.trim())
                    .map(str::to_string)
                    .map_err(backend_err);
            }
            Directive::Raw => payload.to_string(),
            Directive::Abi => self.backends.abi.encode(payload).map_err(backend_err)?,
            Directive::Yul => self.backends.yul.compile(payload).map_err(backend_err)?,
            Directive::Lll => self.backends.lll.compile(payload).map_err(|e| {
                log::warn!("error compiling lll code: {}", snippet(code));
                backend_err(e)
            })?,
        };

        check_hex_has_even_length(&compiled)?;
        Ok(compiled)
    }
}

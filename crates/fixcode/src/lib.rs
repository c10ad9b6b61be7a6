//! Fixcode - resolves test-fixture code fields into EVM bytecode
//!
//! Fixture authors write account code and transaction data as raw hex or as
//! source tagged with a directive. This library picks the backend for each
//! code string and validates what comes back.
//!
//! ## Architecture
//!
//! - **Common** (`common/`): errors and diagnostic reporting
//! - **Hex** (`hex`): bytecode shape validation
//! - **Config** (`config`): resolver configuration
//! - **Directives** (`directive`): built-in directive table
//! - **Registry** (`registry`): user-configured custom compilers
//! - **Backends** (`backend/`): Solidity, Yul, ABI and LLL collaborators
//! - **Resolver** (`resolver`): the resolution entry point
//! - **Fixture** (`fixture`): resolving every code field of a filler

pub mod common;
pub mod hex;
pub mod config;
pub mod directive;
pub mod registry;
pub mod backend;
pub mod resolver;
pub mod fixture;

// Re-exports for convenience
pub use common::{BackendError, DiagnosticReporter, ResolveError, ResolveResult};
pub use config::{CustomCompiler, ResolverConfig};
pub use backend::{Backends, SolContracts};
pub use resolver::CodeResolver;

//! Common infrastructure shared by the resolver and its backends

mod error;

pub use error::{
    BackendError, BackendResult, DiagnosticReporter, ResolveError, ResolveResult, snippet,
};

//! Hex string validation
//!
//! Every bytecode produced by a backend, and every raw `0x` input longer
//! than the empty marker, must be hex with a whole number of bytes.

use crate::common::{ResolveError, ResolveResult};

/// Bytecode marker for "no code"
pub const EMPTY_CODE: &str = "0x";

/// Digits of `hex` with an optional leading `0x` removed
fn digits(hex: &str) -> &str {
    hex.strip_prefix("0x").unwrap_or(hex)
}

pub fn is_hex(hex: &str) -> bool {
    digits(hex).bytes().all(|b| b.is_ascii_hexdigit())
}

/// Check that `hex` is a hex string with an even number of digits.
pub fn check_hex_has_even_length(hex: &str) -> ResolveResult<()> {
    if !is_hex(hex) {
        return Err(ResolveError::invalid_format(hex, "not a hex string"));
    }
    if digits(hex).len() % 2 != 0 {
        return Err(ResolveError::invalid_format(hex, "hex field is of odd length"));
    }
    Ok(())
}

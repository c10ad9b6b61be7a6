//! Directive recognition
//!
//! A code string selects its backend through a directive. Built-in
//! directives are kept in a fixed priority table; the first entry whose
//! matcher fires decides the backend and the payload handed to it.

/// Built-in directive kinds, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Full Solidity source (contains `pragma solidity`)
    SoliditySource,
    /// `:solidity <name>`: contract from the pre-compiled set
    SolidityContract,
    /// `:raw <hex>`
    Raw,
    /// `:abi <spec>`
    Abi,
    /// `:yul <source>`
    Yul,
    /// LLL source (contains `{` or `(asm`)
    Lll,
}

impl Directive {
    pub fn name(&self) -> &'static str {
        match self {
            Directive::SoliditySource | Directive::SolidityContract => "solidity",
            Directive::Raw => "raw",
            Directive::Abi => "abi",
            Directive::Yul => "yul",
            Directive::Lll => "lll",
        }
    }
}

/// How a directive is spotted in a code string
#[derive(Debug, Clone, Copy)]
enum Matcher {
    /// Any of the patterns occurs anywhere; the payload is the whole code
    Contains(&'static [&'static str]),
    /// Literal prefix followed by a separator; the payload follows the separator
    Prefixed(&'static str),
}

impl Matcher {
    fn find<'a>(&self, code: &'a str) -> Option<&'a str> {
        match self {
            Matcher::Contains(patterns) => patterns
                .iter()
                .any(|pattern| code.contains(pattern))
                .then_some(code),
            Matcher::Prefixed(prefix) => find_prefixed(code, prefix),
        }
    }
}

const DIRECTIVES: &[(Directive, Matcher)] = &[
    (Directive::SoliditySource, Matcher::Contains(&["pragma solidity"])),
    (Directive::SolidityContract, Matcher::Prefixed(":solidity")),
    (Directive::Raw, Matcher::Prefixed(":raw")),
    (Directive::Abi, Matcher::Prefixed(":abi")),
    (Directive::Yul, Matcher::Prefixed(":yul")),
    (Directive::Lll, Matcher::Contains(&["{", "(asm"])),
];

/// A recognized directive and the payload following it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveMatch<'a> {
    pub directive: Directive,
    pub payload: &'a str,
}

/// Find the highest-priority built-in directive in `code`.
pub fn detect(code: &str) -> Option<DirectiveMatch<'_>> {
    DIRECTIVES.iter().find_map(|(directive, matcher)| {
        matcher.find(code).map(|payload| DirectiveMatch {
            directive: *directive,
            payload,
        })
    })
}

fn is_separator(b: u8) -> bool {
    b == b' ' || b == b'\n'
}

/// Locate `prefix` followed by a space or newline and return the text after
/// that separator.
///
/// Occurrences glued to a longer token (`:rawness`) are skipped.
pub fn find_prefixed<'a>(code: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    code.match_indices(prefix).find_map(|(pos, _)| {
        let end = pos + prefix.len();
        code.as_bytes()
            .get(end)
            .copied()
            .filter(|b| is_separator(*b))
            .map(|_| &code[end + 1..])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn detected(code: &str) -> Option<(Directive, &str)> {
        detect(code).map(|m| (m.directive, m.payload))
    }

    #[test]
    fn test_prefixed_payload() {
        assert_eq!(detected(":raw deadbeef"), Some((Directive::Raw, "deadbeef")));
        assert_eq!(detected(":abi f(uint) 5"), Some((Directive::Abi, "f(uint) 5")));
        assert_eq!(detected(":solidity Foo"), Some((Directive::SolidityContract, "Foo")));
        assert_eq!(detected(":yul\nobject \"c\""), Some((Directive::Yul, "object \"c\"")));
    }

    #[test]
    fn test_separator_required() {
        assert_eq!(find_prefixed(":rawness 00", ":raw"), None);
        assert_eq!(find_prefixed(":raw", ":raw"), None);
        assert_eq!(find_prefixed(":raw\t00", ":raw"), None);
        assert_eq!(detected(":rawness"), None);
    }

    #[test]
    fn test_later_separated_occurrence() {
        assert_eq!(find_prefixed(":rawx :raw 0x00", ":raw"), Some("0x00"));
    }

    #[test]
    fn test_pragma_wins_over_everything() {
        let code = "pragma solidity ^0.8.0; contract A { } // :raw 00";
        assert_eq!(detected(code), Some((Directive::SoliditySource, code)));
    }

    #[test]
    fn test_solidity_name_before_raw() {
        assert_eq!(
            detected(":solidity Foo :raw 00"),
            Some((Directive::SolidityContract, "Foo :raw 00"))
        );
    }

    #[test]
    fn test_lll_is_fallback() {
        assert_eq!(detected("{ (SSTORE 0 1) }"), Some((Directive::Lll, "{ (SSTORE 0 1) }")));
        assert_eq!(detected("(asm 1 2 ADD)"), Some((Directive::Lll, "(asm 1 2 ADD)")));
        assert_eq!(
            detected(":yul { mstore(0, 1) }"),
            Some((Directive::Yul, "{ mstore(0, 1) }"))
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(detected("hello world"), None);
        assert_eq!(detected(""), None);
    }
}

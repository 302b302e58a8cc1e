//! Canonical-string pre-classification.
//!
//! Before parsing, the engine scans the canonical expression once and records
//! coarse traits as a bit set. The short-circuit checks in `engine.rs` read
//! only these traits:
//!
//! - nothing at all                                   -> empty
//! - ends in an operator or `.`                       -> incomplete
//! - digits and `.` only                              -> bare number
//! - no operator, no call                             -> no operator
//!
//! The scan is heuristic in one direction only: it may claim an operator is
//! present when the grammar later rejects the string, never the reverse.

bitflags::bitflags! {
    /// Coarse traits of a canonical expression.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ExprTraits: u8 {
        const HAS_DIGITS      = 1 << 0;
        const HAS_OPERATOR    = 1 << 1;
        const HAS_FUNCTION    = 1 << 2;
        const HAS_PAREN       = 1 << 3;
        const HAS_LETTERS     = 1 << 4;
        const NUMERIC_ONLY    = 1 << 5;
        const TRAILING_OPERATOR = 1 << 6;
    }
}

const OPERATOR_CHARS: &[char] = &['+', '-', '*', '/', '%'];

impl ExprTraits {
    /// Scan `canonical` for its traits. An empty string has no traits.
    pub fn scan(canonical: &str) -> Self {
        let text = canonical.trim();
        let mut traits = ExprTraits::empty();
        if text.is_empty() {
            return traits;
        }

        if text.bytes().any(|b| b.is_ascii_digit()) {
            traits |= ExprTraits::HAS_DIGITS;
        }
        if text.contains(OPERATOR_CHARS) {
            traits |= ExprTraits::HAS_OPERATOR;
        }
        if text.contains(['(', ')']) {
            traits |= ExprTraits::HAS_PAREN;
        }
        if text.bytes().any(|b| b.is_ascii_alphabetic()) {
            traits |= ExprTraits::HAS_LETTERS;
        }
        if text.chars().all(|c| c.is_ascii_digit() || c == '.') {
            traits |= ExprTraits::NUMERIC_ONLY;
        }
        if text.ends_with(OPERATOR_CHARS) || text.ends_with('.') {
            traits |= ExprTraits::TRAILING_OPERATOR;
        }

        // A call is an identifier immediately followed by `(`; the regex
        // only runs when both letters and parentheses are present.
        if traits.contains(ExprTraits::HAS_LETTERS | ExprTraits::HAS_PAREN)
            && regex!(r"[a-zA-Z][a-zA-Z0-9]*\(").is_match(text)
        {
            traits |= ExprTraits::HAS_FUNCTION;
        }

        traits
    }

    pub fn is_empty_expression(self) -> bool {
        self.is_empty()
    }

    pub fn is_incomplete(self) -> bool {
        self.contains(ExprTraits::TRAILING_OPERATOR)
    }

    /// Digits and `.` only, with at least one digit.
    pub fn is_bare_number(self) -> bool {
        self.contains(ExprTraits::NUMERIC_ONLY | ExprTraits::HAS_DIGITS)
    }

    /// Something the grammar could compute: an operator or a function call.
    pub fn has_computation(self) -> bool {
        self.intersects(ExprTraits::HAS_OPERATOR | ExprTraits::HAS_FUNCTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_traits() {
        assert!(ExprTraits::scan("").is_empty_expression());
        assert!(ExprTraits::scan("   ").is_empty_expression());
    }

    #[test]
    fn detects_operators_and_calls() {
        let t = ExprTraits::scan("sqrt(4)");
        assert!(t.contains(ExprTraits::HAS_FUNCTION));
        assert!(!t.contains(ExprTraits::HAS_OPERATOR));
        assert!(t.has_computation());

        let t = ExprTraits::scan("5+3*2");
        assert!(t.contains(ExprTraits::HAS_OPERATOR | ExprTraits::HAS_DIGITS));
        assert!(!t.contains(ExprTraits::HAS_FUNCTION));
    }

    #[test]
    fn log10_counts_as_a_call() {
        assert!(ExprTraits::scan("log10(100)").contains(ExprTraits::HAS_FUNCTION));
    }

    #[test]
    fn parenthesized_number_is_not_a_call() {
        let t = ExprTraits::scan("(5)");
        assert!(t.contains(ExprTraits::HAS_PAREN));
        assert!(!t.has_computation());
        assert!(!t.is_bare_number());
    }

    #[test]
    fn bare_numbers() {
        assert!(ExprTraits::scan("42").is_bare_number());
        assert!(ExprTraits::scan("3.25").is_bare_number());
        assert!(!ExprTraits::scan("20 5").is_bare_number());
        // dots alone are numeric-only but carry no digits
        let dots = ExprTraits::scan("..");
        assert!(dots.contains(ExprTraits::NUMERIC_ONLY));
        assert!(!dots.is_bare_number());
    }

    #[test]
    fn letters_without_parentheses_are_not_calls() {
        let t = ExprTraits::scan("sqrt 4");
        assert!(t.contains(ExprTraits::HAS_LETTERS));
        assert!(!t.contains(ExprTraits::HAS_FUNCTION));
        assert!(!t.has_computation());
    }

    #[test]
    fn trailing_operator_or_point() {
        assert!(ExprTraits::scan("5+").is_incomplete());
        assert!(ExprTraits::scan("2**").is_incomplete());
        assert!(ExprTraits::scan("5.").is_incomplete());
        assert!(!ExprTraits::scan("5+1").is_incomplete());
    }
}

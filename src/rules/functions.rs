//! Function-phrase rules.
//!
//! Each rule rewrites a spoken phrase naming a function into canonical call
//! syntax. Rules run in list order and every rule rewrites all of its matches
//! before the next one starts, so longer phrases must come first ("N squared"
//! before "square of N", base-10 logarithms before plain "log of").
//!
//! Operands are digit literals; number words were already folded.

use crate::PhraseRule;
use regex::Captures;

fn operand<'h>(caps: &Captures<'h>, idx: usize) -> Option<&'h str> {
    caps.get(idx).map(|m| m.as_str())
}

fn call(name: &str, caps: &Captures<'_>) -> Option<String> {
    Some(format!(" {}({}) ", name, operand(caps, 1)?))
}

fn power(exponent: u32, caps: &Captures<'_>) -> Option<String> {
    Some(format!(" ({}**{}) ", operand(caps, 1)?, exponent))
}

fn rule_square_root() -> PhraseRule {
    phrase_rule! {
        name: "square root of <n>",
        pattern: r"\b(?:the\s+)?square\s+root\s+of\s+(\d+(?:\.\d+)?)\b",
        rewrite: |caps| call("sqrt", caps),
    }
}

fn rule_squared() -> PhraseRule {
    phrase_rule! {
        name: "<n> squared",
        pattern: r"\b(\d+(?:\.\d+)?)\s+squared\b",
        rewrite: |caps| power(2, caps),
    }
}

fn rule_square_of() -> PhraseRule {
    phrase_rule! {
        name: "square of <n>",
        pattern: r"\b(?:the\s+)?square\s+of\s+(\d+(?:\.\d+)?)\b",
        rewrite: |caps| power(2, caps),
    }
}

fn rule_cubed() -> PhraseRule {
    phrase_rule! {
        name: "<n> cubed",
        pattern: r"\b(\d+(?:\.\d+)?)\s+cubed\b",
        rewrite: |caps| power(3, caps),
    }
}

fn rule_cube_of() -> PhraseRule {
    phrase_rule! {
        name: "cube of <n>",
        pattern: r"\b(?:the\s+)?cube\s+of\s+(\d+(?:\.\d+)?)\b",
        rewrite: |caps| power(3, caps),
    }
}

fn rule_log10() -> PhraseRule {
    phrase_rule! {
        name: "base 10 logarithm of <n>",
        pattern: r"\b(?:the\s+)?(?:base[\s-]*10\s+(?:logarithm|log)|(?:logarithm|log)\s+(?:to\s+)?base[\s-]*10)\s+of\s+(\d+(?:\.\d+)?)\b",
        rewrite: |caps| call("log10", caps),
    }
}

fn rule_natural_log() -> PhraseRule {
    phrase_rule! {
        name: "natural logarithm of <n>",
        pattern: r"\b(?:the\s+)?(?:natural\s+(?:logarithm|log)|logarithm|log)\s+of\s+(\d+(?:\.\d+)?)\b",
        rewrite: |caps| call("ln", caps),
    }
}

fn rule_sine() -> PhraseRule {
    phrase_rule! {
        name: "sine of <n>",
        pattern: r"\b(?:the\s+)?(?:sine|sin)\s+of\s+(\d+(?:\.\d+)?)\b",
        rewrite: |caps| call("sin", caps),
    }
}

fn rule_cosine() -> PhraseRule {
    phrase_rule! {
        name: "cosine of <n>",
        pattern: r"\b(?:the\s+)?(?:cosine|cos)\s+of\s+(\d+(?:\.\d+)?)\b",
        rewrite: |caps| call("cos", caps),
    }
}

fn rule_tangent() -> PhraseRule {
    phrase_rule! {
        name: "tangent of <n>",
        pattern: r"\b(?:the\s+)?(?:tangent|tan)\s+of\s+(\d+(?:\.\d+)?)\b",
        rewrite: |caps| call("tan", caps),
    }
}

fn rule_percent_of() -> PhraseRule {
    phrase_rule! {
        name: "<n> percent of <m>",
        pattern: r"\b(\d+(?:\.\d+)?)\s*(?:percent|per\s+cent|%)\s+of\s+(\d+(?:\.\d+)?)\b",
        rewrite: |caps| Some(format!(" (({}/100)*{}) ", operand(caps, 1)?, operand(caps, 2)?)),
    }
}

/// All function-phrase rules, in application order.
pub(crate) fn get() -> Vec<PhraseRule> {
    vec![
        rule_square_root(),
        rule_squared(),
        rule_square_of(),
        rule_cubed(),
        rule_cube_of(),
        rule_log10(),
        rule_natural_log(),
        rule_sine(),
        rule_cosine(),
        rule_tangent(),
        rule_percent_of(),
    ]
}

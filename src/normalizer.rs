//! Command normalization.
//!
//! Rewrites a raw spoken-style command into a canonical expression. The steps
//! run in a fixed order; each one only sees the output of the previous one:
//!
//! ```text
//! (0) lower-case, drop sentence punctuation, split words
//! (1) fold number words           rules/numerals.rs   "twenty five" -> "25"
//! (2) function phrases            rules/functions.rs  "square root of 9" -> "sqrt(9)"
//! (3) drop fillers                rules/fillers.rs    "what is" -> ""
//! (4) operator words              rules/operators.rs  "divided by" -> "/"
//! (5) implicit multiplication     "2 (3)" -> "2 * (3)"
//! (6) sanitize + compact          "5 + 3 * 2" -> "5+3*2"
//! ```
//!
//! Word and phrase matching is done on whole tokens, so a rule never fires on
//! part of a longer word. Normalization never fails; the worst case is an empty
//! string, which the engine classifies.

use crate::rules;
use crate::{PhraseRule, Rewrite, Stage, TokenPhrase};
use once_cell::sync::Lazy;

static FUNCTION_RULES: Lazy<Vec<PhraseRule>> = Lazy::new(rules::functions::get);
static FILLERS: Lazy<Vec<TokenPhrase>> = Lazy::new(|| longest_first(rules::fillers::get()));
static OPERATORS: Lazy<Vec<TokenPhrase>> = Lazy::new(|| longest_first(rules::operators::get()));

/// Characters besides ASCII letters, digits and whitespace that survive
/// sanitization.
const SYMBOLS: &[char] = &['.', '(', ')', '+', '-', '*', '/', '%'];

/// Characters trimmed from both ends of a word before matching.
const WORD_PUNCTUATION: &[char] = &[',', '?', '!', ';', ':', '"', '\''];

/// Result of [`normalize_traced`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub canonical: String,
    /// Rewrites that fired, in order.
    pub rewrites: Vec<Rewrite>,
}

fn longest_first(mut table: Vec<TokenPhrase>) -> Vec<TokenPhrase> {
    // stable: equal lengths keep table order
    table.sort_by_key(|p| std::cmp::Reverse(p.word_count()));
    table
}

/// Normalize a raw command to its canonical expression.
///
/// ```
/// use saycalc::normalize;
///
/// assert_eq!(normalize("What is five plus three times two?"), "5+3*2");
/// assert_eq!(normalize("square root of 4"), "sqrt(4)");
/// ```
pub fn normalize(raw: &str) -> String {
    normalize_traced(raw).canonical
}

/// Like [`normalize`], also reporting which rules fired.
pub fn normalize_traced(raw: &str) -> Normalized {
    let debug = std::env::var_os("SAYCALC_DEBUG_RULES").is_some();
    let mut rewrites = Vec::new();

    let words = split_words(raw);

    let (words, folded) = rules::numerals::fold(&words);
    for _ in 0..folded {
        rewrites.push(Rewrite { stage: Stage::Numeral, rule: "number words" });
    }
    if debug {
        eprintln!("[normalize] numerals: {:?}", words);
    }

    let text = apply_function_rules(&format!(" {} ", words.join(" ")), &mut rewrites);
    if debug {
        eprintln!("[normalize] functions: \"{}\"", text);
    }

    let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    let words = replace_phrases(&words, &FILLERS, Stage::Filler, &mut rewrites);
    let words = replace_phrases(&words, &OPERATORS, Stage::Operator, &mut rewrites);
    if debug {
        eprintln!("[normalize] phrases: {:?}", words);
    }

    let (text, inserted) = insert_implicit_multiplication(&words.join(" "));
    for _ in 0..inserted {
        rewrites.push(Rewrite { stage: Stage::ImplicitMultiplication, rule: "implicit multiplication" });
    }

    let canonical = compact(&sanitize(&text));
    if debug {
        eprintln!("[normalize] canonical: \"{}\"", canonical);
    }

    Normalized { canonical, rewrites }
}

/// Lower-case, drop a trailing sentence terminator, keep parentheses as their
/// own words and trim punctuation glued to words.
fn split_words(raw: &str) -> Vec<String> {
    let lower = raw.trim().to_lowercase();
    let lower = lower.trim_end_matches(['.', '?', '!']);
    let spaced = lower.replace('(', " ( ").replace(')', " ) ");

    spaced
        .split_whitespace()
        .map(|w| w.trim_matches(WORD_PUNCTUATION))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn apply_function_rules(text: &str, rewrites: &mut Vec<Rewrite>) -> String {
    let mut text = text.to_string();

    for rule in FUNCTION_RULES.iter() {
        if !rule.pattern.is_match(&text) {
            continue;
        }
        let mut fired = 0;
        let next = rule.pattern.replace_all(&text, |caps: &regex::Captures<'_>| match (rule.rewrite)(caps) {
            Some(replacement) => {
                fired += 1;
                replacement
            }
            None => caps[0].to_string(),
        });
        text = next.into_owned();

        if std::env::var_os("SAYCALC_DEBUG_RULES").is_some() {
            eprintln!("[rule] '{}' fired {}x", rule.name, fired);
        }
        for _ in 0..fired {
            rewrites.push(Rewrite { stage: Stage::Function, rule: rule.name });
        }
    }

    text
}

/// Replace whole-word phrases from `table` (already longest first). Phrases
/// with an empty symbol are dropped.
fn replace_phrases(words: &[String], table: &[TokenPhrase], stage: Stage, rewrites: &mut Vec<Rewrite>) -> Vec<String> {
    let mut out = Vec::with_capacity(words.len());
    let mut i = 0;

    'outer: while i < words.len() {
        for phrase in table {
            let n = phrase.word_count();
            if i + n > words.len() {
                continue;
            }
            if phrase.words.split(' ').zip(&words[i..i + n]).all(|(p, w)| p == w) {
                if !phrase.symbol.is_empty() {
                    out.push(phrase.symbol.to_string());
                }
                rewrites.push(Rewrite { stage, rule: phrase.words });
                i += n;
                continue 'outer;
            }
        }
        out.push(words[i].clone());
        i += 1;
    }

    out
}

/// Insert `*` between a number and `(`, and between `)` and `(`.
///
/// Digits that end an identifier (`log10(`) are part of a call, not a number.
fn insert_implicit_multiplication(text: &str) -> (String, usize) {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut in_identifier = false;
    let mut skip_space = false;
    let mut inserted = 0;

    for (i, &c) in chars.iter().enumerate() {
        if skip_space && c.is_whitespace() {
            continue;
        }
        skip_space = false;
        out.push(c);

        if c.is_ascii_alphabetic() {
            in_identifier = true;
        } else if !c.is_ascii_alphanumeric() {
            in_identifier = false;
        }

        let ends_operand = (c.is_ascii_digit() && !in_identifier) || c == ')';
        if !ends_operand {
            continue;
        }
        let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
        if next == Some(&'(') {
            out.push_str(" * ");
            skip_space = true;
            inserted += 1;
        }
    }

    (out, inserted)
}

/// Drop every character outside the canonical alphabet.
fn sanitize(text: &str) -> String {
    text.chars().filter(|&c| c.is_ascii_alphanumeric() || c.is_whitespace() || SYMBOLS.contains(&c)).collect()
}

/// Collapse whitespace: none next to a symbol, one space between operands.
fn compact(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space && !SYMBOLS.contains(&c) && !out.ends_with(SYMBOLS) {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    out
}

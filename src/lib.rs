//! Rule-based interpreter for spoken-style English arithmetic.
//!
//! A command such as `"what is the square root of nine plus two"` flows
//! through three leaf stages:
//!
//! ```text
//! raw text ── normalize (normalizer.rs + rules/*) ──▶ canonical "sqrt(9)+2"
//!          ── evaluate  (engine.rs + engine/*)    ──▶ Outcome | EvalError
//!          ── respond   (format.rs)               ──▶ ResponsePayload
//! ```
//!
//! No stage keeps state between calls. The rule tables are immutable statics
//! and every call builds its own tokens and AST.

use regex::{Captures, Regex};

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod expr;
mod format;
pub mod logging;
mod normalizer;
mod rules;

pub use api::{Options, ProcessDetails, ProcessVerbose, ResponsePayload, process, process_verbose_with, process_with};
pub use engine::{ExprTraits, Outcome, evaluate, parse};
pub use error::{EvalError, FailureKind, ParseError};
pub use expr::{BinaryOp, Expr, Function};
pub use format::{format_number, render_display, render_speech, respond};
pub use normalizer::{Normalized, normalize, normalize_traced};

// --- Rule types ---------------------------------------------------------------

/// Normalizer stage that produced a [`Rewrite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Numeral,
    Function,
    Filler,
    Operator,
    ImplicitMultiplication,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Numeral => "numeral",
            Stage::Function => "function",
            Stage::Filler => "filler",
            Stage::Operator => "operator",
            Stage::ImplicitMultiplication => "implicit *",
        };
        f.write_str(name)
    }
}

/// One rewrite applied while normalizing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub stage: Stage,
    /// Name of the rule or phrase that fired.
    pub rule: &'static str,
}

/// A function-phrase rule: a regex over the padded, lower-cased command and a
/// rewrite producing the canonical call form for one match.
///
/// Rules live in an ordered `Vec`; order is part of their semantics.
pub(crate) struct PhraseRule {
    pub name: &'static str,
    pub pattern: &'static Regex,
    pub rewrite: fn(&Captures<'_>) -> Option<String>,
}

impl std::fmt::Debug for PhraseRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhraseRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("rewrite", &"<function>")
            .finish()
    }
}

/// A whole-word phrase (space separated `words`) and its symbolic
/// replacement. Fillers use an empty `symbol`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TokenPhrase {
    pub words: &'static str,
    pub symbol: &'static str,
}

impl TokenPhrase {
    pub fn word_count(&self) -> usize {
        self.words.split(' ').count()
    }
}

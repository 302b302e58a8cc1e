//! Expression engine.
//!
//! Takes a canonical expression (the normalizer's output) and either computes
//! a value or classifies why it cannot. Nothing here executes host code: the
//! grammar is a small recursive descent parser and evaluation walks the
//! resulting [`Expr`] tree.
//!
//! ```text
//! canonical ── ExprTraits::scan (scan.rs)
//!                │  empty?          -> EvalError::Empty
//!                │  trailing op?    -> EvalError::Incomplete
//!                │  digits only?    -> Outcome::BareNumber (parser skipped)
//!                │  no op, no call? -> EvalError::NoOperator
//!                v
//!           Parser::parse (lexer.rs + parser.rs) -> Expr | EvalError::Syntax
//!                v
//!           eval (eval.rs) -> f64 | ZeroDivision | Domain | Overflow
//! ```
//!
//! The short-circuits exist for friendlier messages; the parser would reject
//! (or accept) the same strings on its own.
//!
//! ## Debugging
//!
//! Set `SAYCALC_DEBUG_RULES=1` to print the scan and the parsed tree.

#[path = "engine/eval.rs"]
mod eval;
#[path = "engine/lexer.rs"]
mod lexer;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/scan.rs"]
mod scan;

pub use parser::parse;
pub use scan::ExprTraits;

use crate::error::EvalError;
use crate::expr::Expr;

/// Successful evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A parsed and computed expression.
    Value { expr: Expr, value: f64 },
    /// The command reduced to a plain number; `literal` is the canonical text.
    BareNumber { literal: String, value: f64 },
}

impl Outcome {
    pub fn value(&self) -> f64 {
        match self {
            Outcome::Value { value, .. } | Outcome::BareNumber { value, .. } => *value,
        }
    }
}

/// Classify and evaluate a canonical expression.
///
/// # Example
/// ```
/// use saycalc::{evaluate, Outcome};
///
/// let out = evaluate("2**3**2").unwrap();
/// assert_eq!(out.value(), 512.0);
/// assert!(matches!(evaluate("42").unwrap(), Outcome::BareNumber { .. }));
/// ```
pub fn evaluate(canonical: &str) -> Result<Outcome, EvalError> {
    let text = canonical.trim();
    let traits = ExprTraits::scan(text);

    if std::env::var_os("SAYCALC_DEBUG_RULES").is_some() {
        eprintln!("[scan] canonical=\"{}\" traits={:?}", text, traits);
    }

    if traits.is_empty_expression() {
        return Err(EvalError::Empty);
    }
    if traits.is_incomplete() {
        return Err(EvalError::Incomplete);
    }
    if !traits.has_computation() {
        if traits.is_bare_number() {
            if let Ok(value) = text.parse::<f64>() {
                return Ok(Outcome::BareNumber { literal: text.to_string(), value });
            }
        }
        return Err(EvalError::NoOperator);
    }

    let expr = parse(text)?;
    if std::env::var_os("SAYCALC_DEBUG_RULES").is_some() {
        eprintln!("[parse] {:?}", expr);
    }

    let value = eval::eval(&expr)?;
    Ok(Outcome::Value { expr, value })
}

//! Response rendering.
//!
//! One traversal ([`walk`]) decides where grouping is needed from operator
//! precedence; two [`Renderer`]s decide what each node looks like. The display
//! renderer writes conventional notation, the speech renderer writes the
//! phrase a text-to-speech engine should read.
//!
//! ```text
//! Binary(Add, 5, Binary(Mul, 3, 2))
//!   display -> "5 + 3 x 2"
//!   speech  -> "5 plus 3 times 2"
//!
//! Call(Sqrt, 4)
//!   display -> "√(4)"
//!   speech  -> "4"
//! ```

use crate::api::{Options, ResponsePayload};
use crate::engine::Outcome;
use crate::error::{EvalError, FailureKind};
use crate::expr::{BinaryOp, Expr, Function};

/// Binding strength of a negation, between `*` and `**`.
const NEGATE_PRECEDENCE: u8 = 3;
/// Literals and calls never need grouping.
const ATOM_PRECEDENCE: u8 = u8::MAX;

/// Render `value` for humans: integral values without a decimal point, other
/// values rounded to `precision` decimal places.
///
/// ```
/// use saycalc::format_number;
///
/// assert_eq!(format_number(7.0, 4), "7");
/// assert_eq!(format_number(1.0 / 3.0, 4), "0.3333");
/// ```
pub fn format_number(value: f64, precision: usize) -> String {
    if value == 0.0 {
        // also folds -0.0
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{}", value);
    }

    let factor = 10f64.powi(precision.min(15) as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 { "0".to_string() } else { format!("{}", rounded) }
}

/// How each node kind is written. Children arrive already rendered.
trait Renderer {
    fn number(&self, value: f64) -> String;
    fn binary(&self, op: BinaryOp, left: String, right: String) -> String;
    /// `compound` is set when the argument is not a literal or a call.
    fn call(&self, function: Function, argument: String, compound: bool) -> String;
    fn negate(&self, inner: String) -> String;
    fn group(&self, inner: String) -> String;
}

struct DisplayRenderer {
    precision: usize,
}

impl Renderer for DisplayRenderer {
    fn number(&self, value: f64) -> String {
        format_number(value, self.precision)
    }

    fn binary(&self, op: BinaryOp, left: String, right: String) -> String {
        let symbol = match op {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "x",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
        };
        format!("{} {} {}", left, symbol, right)
    }

    fn call(&self, function: Function, argument: String, _compound: bool) -> String {
        match function {
            Function::Sqrt => format!("√({})", argument),
            Function::Ln => format!("ln({})", argument),
            Function::Log10 => format!("log10({})", argument),
            Function::SinDeg => format!("sin({})", argument),
            Function::CosDeg => format!("cos({})", argument),
            Function::TanDeg => format!("tan({})", argument),
        }
    }

    fn negate(&self, inner: String) -> String {
        format!("-{}", inner)
    }

    fn group(&self, inner: String) -> String {
        format!("({})", inner)
    }
}

struct SpeechRenderer {
    precision: usize,
}

impl Renderer for SpeechRenderer {
    fn number(&self, value: f64) -> String {
        format_number(value, self.precision)
    }

    fn binary(&self, op: BinaryOp, left: String, right: String) -> String {
        let word = match op {
            BinaryOp::Add => "plus",
            BinaryOp::Sub => "minus",
            BinaryOp::Mul => "times",
            BinaryOp::Div => "divided by",
            BinaryOp::Mod => "modulo",
            BinaryOp::Pow => "to the power of",
        };
        format!("{} {} {}", left, word, right)
    }

    // The function itself is not spoken, only its argument, grouped when it
    // would otherwise run into the surrounding words.
    fn call(&self, _function: Function, argument: String, compound: bool) -> String {
        if compound { self.group(argument) } else { argument }
    }

    fn negate(&self, inner: String) -> String {
        format!("minus {}", inner)
    }

    fn group(&self, inner: String) -> String {
        format!("({})", inner)
    }
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Binary { op, .. } => op.precedence(),
        Expr::Negate(_) => NEGATE_PRECEDENCE,
        Expr::Number(_) | Expr::Call { .. } => ATOM_PRECEDENCE,
    }
}

/// Side of a binary parent a child sits on.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

fn needs_group(parent: BinaryOp, child: &Expr, side: Side) -> bool {
    let child_prec = precedence(child);
    let parent_prec = parent.precedence();
    if child_prec != parent_prec {
        return child_prec < parent_prec;
    }
    // Equal precedence: group against the associativity.
    if parent.is_right_associative() { side == Side::Left } else { side == Side::Right }
}

fn walk<R: Renderer>(expr: &Expr, renderer: &R) -> String {
    match expr {
        Expr::Number(n) => renderer.number(*n),
        Expr::Negate(inner) => {
            let text = walk(inner, renderer);
            let text = if precedence(inner) < NEGATE_PRECEDENCE { renderer.group(text) } else { text };
            renderer.negate(text)
        }
        Expr::Binary { op, left, right } => {
            let mut l = walk(left, renderer);
            if needs_group(*op, left, Side::Left) {
                l = renderer.group(l);
            }
            let mut r = walk(right, renderer);
            if needs_group(*op, right, Side::Right) {
                r = renderer.group(r);
            }
            renderer.binary(*op, l, r)
        }
        Expr::Call { function, argument } => {
            renderer.call(*function, walk(argument, renderer), precedence(argument) < ATOM_PRECEDENCE)
        }
    }
}

/// On-screen rendering of `expr`.
pub fn render_display(expr: &Expr, precision: usize) -> String {
    walk(expr, &DisplayRenderer { precision })
}

/// Spoken rendering of `expr`.
pub fn render_speech(expr: &Expr, precision: usize) -> String {
    walk(expr, &SpeechRenderer { precision })
}

/// The fixed sentence for a failure category.
pub(crate) fn failure_message(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::EmptyExpression => "I couldn't identify a math operation in your command.",
        FailureKind::IncompleteExpression => "Your expression looks incomplete. Try finishing it.",
        FailureKind::NoOperator => "I couldn't identify a valid math operation.",
        FailureKind::SyntaxFailure | FailureKind::DivisionOrModuloByZero => {
            "I couldn't calculate that expression. Check that it's correct."
        }
        FailureKind::UnexpectedFailure => "An unexpected error occurred while trying to calculate.",
    }
}

/// Build the response for an evaluation result.
pub fn respond(result: &Result<Outcome, EvalError>, options: &Options) -> ResponsePayload {
    match result {
        Ok(Outcome::Value { expr, value }) => {
            let value = format_number(*value, options.precision);
            ResponsePayload::with_speech(
                format!("The result of {} is {}.", render_display(expr, options.precision), value),
                format!("The result of {} is {}.", render_speech(expr, options.precision), value),
            )
        }
        Ok(Outcome::BareNumber { literal, .. }) => ResponsePayload::new(format!("You said the number {}.", literal)),
        Err(err) => ResponsePayload::new(failure_message(err.kind())),
    }
}

use crate::expr::{BinaryOp, Function};
use thiserror::Error;

/// Grammar rejection: what went wrong and the byte offset in the canonical
/// string where it was noticed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("parse error at {position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        ParseError { message: message.into(), position }
    }
}

/// Every way evaluating a canonical expression can fail.
///
/// The `Display` text is diagnostic (it goes to the log). What the user hears
/// is chosen from [`EvalError::kind`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("nothing left to evaluate")]
    Empty,

    #[error("expression ends with a dangling operator or decimal point")]
    Incomplete,

    #[error("no operator or function in expression")]
    NoOperator,

    #[error(transparent)]
    Syntax(#[from] ParseError),

    #[error("zero divisor in '{}'", .op.symbol())]
    ZeroDivision { op: BinaryOp },

    #[error("math domain error: {function}({value})")]
    Domain { function: &'static str, value: f64 },

    #[error("numeric overflow")]
    Overflow,
}

/// User-facing failure categories. Several [`EvalError`]s share one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    EmptyExpression,
    IncompleteExpression,
    NoOperator,
    SyntaxFailure,
    DivisionOrModuloByZero,
    UnexpectedFailure,
}

impl EvalError {
    pub fn kind(&self) -> FailureKind {
        match self {
            EvalError::Empty => FailureKind::EmptyExpression,
            EvalError::Incomplete => FailureKind::IncompleteExpression,
            EvalError::NoOperator => FailureKind::NoOperator,
            EvalError::Syntax(_) => FailureKind::SyntaxFailure,
            EvalError::ZeroDivision { .. } => FailureKind::DivisionOrModuloByZero,
            EvalError::Domain { .. } | EvalError::Overflow => FailureKind::UnexpectedFailure,
        }
    }

    pub(crate) fn domain(function: Function, value: f64) -> Self {
        EvalError::Domain { function: function.name(), value }
    }
}

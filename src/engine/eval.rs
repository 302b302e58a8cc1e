//! Tree-walking evaluation with fixed arithmetic semantics.
//!
//! Zero divisors, domain errors and overflow come back as [`EvalError`]s.
//! Every intermediate result must be finite.

use crate::error::EvalError;
use crate::expr::{BinaryOp, Expr, Function};

/// Evaluate `expr` to a finite `f64`.
pub fn eval(expr: &Expr) -> Result<f64, EvalError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Negate(inner) => Ok(-eval(inner)?),
        Expr::Binary { op, left, right } => {
            let l = eval(left)?;
            let r = eval(right)?;
            apply_binary(*op, l, r)
        }
        Expr::Call { function, argument } => apply_function(*function, eval(argument)?),
    }
}

fn apply_binary(op: BinaryOp, l: f64, r: f64) -> Result<f64, EvalError> {
    let value = match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => {
            if r == 0.0 {
                return Err(EvalError::ZeroDivision { op });
            }
            l / r
        }
        BinaryOp::Mod => {
            if r == 0.0 {
                return Err(EvalError::ZeroDivision { op });
            }
            floored_mod(l, r)
        }
        BinaryOp::Pow => {
            if l == 0.0 && r < 0.0 {
                return Err(EvalError::ZeroDivision { op });
            }
            let value = l.powf(r);
            if value.is_nan() {
                // negative base with a fractional exponent
                return Err(EvalError::Domain { function: "pow", value: l });
            }
            value
        }
    };
    finite(value)
}

/// Modulo whose result carries the divisor's sign: `-7 % 3 == 2`.
fn floored_mod(l: f64, r: f64) -> f64 {
    let m = l % r;
    if m != 0.0 && (m < 0.0) != (r < 0.0) { m + r } else { m }
}

fn apply_function(function: Function, x: f64) -> Result<f64, EvalError> {
    let value = match function {
        Function::Sqrt => {
            if x < 0.0 {
                return Err(EvalError::domain(function, x));
            }
            x.sqrt()
        }
        Function::Ln => {
            if x <= 0.0 {
                return Err(EvalError::domain(function, x));
            }
            x.ln()
        }
        Function::Log10 => {
            if x <= 0.0 {
                return Err(EvalError::domain(function, x));
            }
            x.log10()
        }
        Function::SinDeg => x.to_radians().sin(),
        Function::CosDeg => x.to_radians().cos(),
        Function::TanDeg => x.to_radians().tan(),
    };
    finite(value)
}

fn finite(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() { Ok(value) } else { Err(EvalError::Overflow) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parse;

    fn run(input: &str) -> Result<f64, EvalError> {
        eval(&parse(input).unwrap())
    }

    fn approx(input: &str, expected: f64) {
        let got = run(input).unwrap();
        assert!((got - expected).abs() < 1e-9, "{} = {}, expected {}", input, got, expected);
    }

    #[test]
    fn arithmetic() {
        approx("5+3*2", 11.0);
        approx("(5+3)*2", 16.0);
        approx("2**3**2", 512.0);
        approx("7/2", 3.5);
        approx("10%3", 1.0);
        approx("-2**2", -4.0);
        approx("2**-1", 0.5);
    }

    #[test]
    fn modulo_follows_divisor_sign() {
        approx("-7%3", 2.0);
        approx("7%-3", -2.0);
        approx("7.5%2", 1.5);
    }

    #[test]
    fn functions_use_degrees() {
        approx("sqrt(16)", 4.0);
        approx("log10(1000)", 3.0);
        approx("ln(1)", 0.0);
        approx("sin(90)", 1.0);
        approx("cos(60)", 0.5);
        approx("tan(45)", 1.0);
        approx("((50/100)*80)", 40.0);
    }

    #[test]
    fn zero_divisors_are_classified() {
        assert_eq!(run("10/0"), Err(EvalError::ZeroDivision { op: BinaryOp::Div }));
        assert_eq!(run("10%0"), Err(EvalError::ZeroDivision { op: BinaryOp::Mod }));
        assert_eq!(run("0**-1"), Err(EvalError::ZeroDivision { op: BinaryOp::Pow }));
        assert_eq!(run("1/(2-2)"), Err(EvalError::ZeroDivision { op: BinaryOp::Div }));
    }

    #[test]
    fn domain_and_overflow() {
        assert!(matches!(run("sqrt(-4)"), Err(EvalError::Domain { function: "sqrt", .. })));
        assert!(matches!(run("ln(0)"), Err(EvalError::Domain { function: "ln", .. })));
        assert!(matches!(run("(-8)**(1/3)"), Err(EvalError::Domain { function: "pow", .. })));
        assert_eq!(run("10**400"), Err(EvalError::Overflow));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let expr = parse("sqrt(2)*sin(33)+ln(7)/3**0.5").unwrap();
        let first = eval(&expr).unwrap();
        let second = eval(&expr).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }
}

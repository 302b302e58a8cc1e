//! Recursive descent parser over canonical expressions.
//!
//! GRAMMAR:
//!   expression --> term ( ("+" | "-") term )*
//!   term       --> signed ( ("*" | "/" | "%") signed )*
//!   signed     --> ("-" | "+") signed | power
//!   power      --> primary ( "**" signed )?
//!   primary    --> NUMBER | IDENTIFIER "(" expression ")" | "(" expression ")"
//!
//! `**` is right-associative and binds tighter than a sign on its left, so
//! `-2**2` is `-(2**2)` while `2**-1` is accepted.

use super::lexer::{Lexer, Token};
use crate::error::ParseError;
use crate::expr::{BinaryOp, Expr, Function};

pub type ParseResult<T> = Result<T, ParseError>;

/// Nesting bound for parentheses, calls and signs.
const MAX_DEPTH: usize = 64;
/// Bound on binary operators in one expression. Together with `MAX_DEPTH`
/// this bounds the height of the tree, which is walked recursively.
const MAX_OPERATORS: usize = 1024;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    position: usize,
    depth: usize,
    operators: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let (current, position) = lexer.next_token();
        Parser { lexer, current, position, depth: 0, operators: 0 }
    }

    /// Parse the whole input; trailing tokens are an error.
    pub fn parse(&mut self) -> ParseResult<Expr> {
        if self.current == Token::Eof {
            return Err(self.error("empty expression"));
        }

        let expr = self.parse_expression()?;

        if self.current != Token::Eof {
            return Err(self.error(format!("unexpected {} after expression", self.current)));
        }
        Ok(expr)
    }

    fn advance(&mut self) {
        let (token, position) = self.lexer.next_token();
        self.current = token;
        self.position = position;
    }

    fn expect(&mut self, expected: Token) -> ParseResult<()> {
        if self.current == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("expected {}, found {}", expected, self.current)))
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.position)
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error("expression nested too deeply"));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn count_operator(&mut self) -> ParseResult<()> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(self.error("too many operators"));
        }
        Ok(())
    }

    fn parse_expression(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.current {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.count_operator()?;
            self.advance();
            let right = self.parse_term()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_signed()?;

        loop {
            let op = match self.current {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                Token::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.count_operator()?;
            self.advance();
            let right = self.parse_signed()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_signed(&mut self) -> ParseResult<Expr> {
        match self.current {
            Token::Minus => {
                self.advance();
                self.enter()?;
                let inner = self.parse_signed()?;
                self.leave();
                Ok(Expr::negate(inner))
            }
            Token::Plus => {
                self.advance();
                self.enter()?;
                let inner = self.parse_signed()?;
                self.leave();
                Ok(inner)
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> ParseResult<Expr> {
        let base = self.parse_primary()?;

        if self.current == Token::StarStar {
            self.count_operator()?;
            self.advance();
            self.enter()?;
            let exponent = self.parse_signed()?;
            self.leave();
            return Ok(Expr::binary(BinaryOp::Pow, base, exponent));
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        match self.current.clone() {
            Token::Number(n) => {
                self.advance();
                Ok(Expr::Number(n))
            }
            Token::LParen => {
                self.advance();
                let inner = self.parse_group()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::Identifier(name) => {
                let function = Function::from_name(&name)
                    .ok_or_else(|| self.error(format!("unknown function '{}'", name)))?;
                self.advance();
                self.expect(Token::LParen)?;
                let argument = self.parse_group()?;
                self.expect(Token::RParen)?;
                Ok(Expr::call(function, argument))
            }
            Token::RParen => Err(self.error("empty parentheses or unmatched ')'")),
            Token::Eof => Err(self.error("unexpected end of expression")),
            other => Err(self.error(format!("unexpected {}", other))),
        }
    }

    fn parse_group(&mut self) -> ParseResult<Expr> {
        self.enter()?;
        let inner = self.parse_expression()?;
        self.leave();
        Ok(inner)
    }
}

/// Parse a canonical expression into an [`Expr`].
pub fn parse(input: &str) -> ParseResult<Expr> {
    Parser::new(input).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Expr {
        Expr::Number(n)
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parse("5+3*2").unwrap(),
            Expr::binary(BinaryOp::Add, num(5.0), Expr::binary(BinaryOp::Mul, num(3.0), num(2.0)))
        );
    }

    #[test]
    fn same_level_is_left_associative() {
        assert_eq!(
            parse("8/4%3").unwrap(),
            Expr::binary(BinaryOp::Mod, Expr::binary(BinaryOp::Div, num(8.0), num(4.0)), num(3.0))
        );
        assert_eq!(
            parse("10-4-3").unwrap(),
            Expr::binary(BinaryOp::Sub, Expr::binary(BinaryOp::Sub, num(10.0), num(4.0)), num(3.0))
        );
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(
            parse("2**3**2").unwrap(),
            Expr::binary(BinaryOp::Pow, num(2.0), Expr::binary(BinaryOp::Pow, num(3.0), num(2.0)))
        );
    }

    #[test]
    fn sign_binds_looser_than_power() {
        assert_eq!(parse("-2**2").unwrap(), Expr::negate(Expr::binary(BinaryOp::Pow, num(2.0), num(2.0))));
        assert_eq!(parse("2**-1").unwrap(), Expr::binary(BinaryOp::Pow, num(2.0), Expr::negate(num(1.0))));
    }

    #[test]
    fn function_calls() {
        assert_eq!(parse("sqrt(4)").unwrap(), Expr::call(Function::Sqrt, num(4.0)));
        assert_eq!(
            parse("log10(10*10)").unwrap(),
            Expr::call(Function::Log10, Expr::binary(BinaryOp::Mul, num(10.0), num(10.0)))
        );
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["", "(", "()", "(2+3", "2+3)", "5 3", "foo(2)", "sqrt 4", "2+*3", "5 $ 2", "."] {
            assert!(parse(input).is_err(), "expected '{}' to be rejected", input);
        }
    }

    #[test]
    fn unknown_function_is_named() {
        let err = parse("foo(2)").unwrap_err();
        assert!(err.message.contains("foo"));
        assert_eq!(err.position, 0);
    }

    #[test]
    fn deep_nesting_is_an_error_not_a_crash() {
        let deep = format!("{}1{}", "(".repeat(500), ")".repeat(500));
        assert!(parse(&deep).is_err());

        let fine = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        assert_eq!(parse(&fine).unwrap(), num(1.0));
    }

    #[test]
    fn long_operator_chains_are_bounded() {
        let long = vec!["1"; 100_000].join("+");
        let err = parse(&long).unwrap_err();
        assert!(err.message.contains("too many operators"));

        let mixed = vec!["2"; 5_000].join("*").replace("*2*", "*2-");
        assert!(parse(&mixed).is_err());

        let ok = vec!["1"; MAX_OPERATORS + 1].join("+");
        assert!(parse(&ok).is_ok());
    }
}

//! Scans a canonical expression into tokens.
//!
//! The alphabet is small: numbers, identifiers (function names), the five
//! operator characters plus `**`, and parentheses. Anything else becomes
//! `Illegal` and the parser rejects it.

use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    LParen,
    RParen,
    Eof,
    Illegal(char),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Identifier(s) => write!(f, "{}", s),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::StarStar => write!(f, "**"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Eof => write!(f, "end of input"),
            Token::Illegal(c) => write!(f, "'{}'", c),
        }
    }
}

pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, chars: input.char_indices().peekable() }
    }

    /// Advance and return the next token with its starting byte offset.
    pub fn next_token(&mut self) -> (Token, usize) {
        self.skip_whitespace();

        let Some((pos, ch)) = self.chars.next() else {
            return (Token::Eof, self.input.len());
        };

        let token = match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => {
                if self.chars.next_if(|&(_, c)| c == '*').is_some() {
                    Token::StarStar
                } else {
                    Token::Star
                }
            }
            '/' => Token::Slash,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_digit() || c == '.' => self.read_number(pos),
            c if c.is_ascii_alphabetic() => self.read_identifier(pos),
            c => Token::Illegal(c),
        };
        (token, pos)
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}
    }

    fn read_number(&mut self, start: usize) -> Token {
        let mut seen_dot = self.input[start..].starts_with('.');
        let mut end = start + 1;

        while let Some(&(i, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                end = i + 1;
                self.chars.next();
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                end = i + 1;
                self.chars.next();
            } else {
                break;
            }
        }

        match self.input[start..end].parse::<f64>() {
            Ok(n) => Token::Number(n),
            // a lone "."
            Err(_) => Token::Illegal('.'),
        }
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        let mut end = start + 1;
        while let Some(&(i, c)) = self.chars.peek() {
            if c.is_ascii_alphanumeric() {
                end = i + 1;
                self.chars.next();
            } else {
                break;
            }
        }
        Token::Identifier(self.input[start..end].to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let (tok, _) = lexer.next_token();
            if tok == Token::Eof {
                break;
            }
            out.push(tok);
        }
        out
    }

    #[test]
    fn tokenizes_arithmetic() {
        assert_eq!(
            tokens("5+3*2"),
            vec![Token::Number(5.0), Token::Plus, Token::Number(3.0), Token::Star, Token::Number(2.0)]
        );
    }

    #[test]
    fn double_star_is_one_token() {
        assert_eq!(tokens("2**3"), vec![Token::Number(2.0), Token::StarStar, Token::Number(3.0)]);
        assert_eq!(tokens("2* *3"), vec![Token::Number(2.0), Token::Star, Token::Star, Token::Number(3.0)]);
    }

    #[test]
    fn identifiers_keep_trailing_digits() {
        assert_eq!(
            tokens("log10(100)"),
            vec![Token::Identifier("log10".to_string()), Token::LParen, Token::Number(100.0), Token::RParen]
        );
    }

    #[test]
    fn decimals_and_lone_point() {
        assert_eq!(tokens("3.25"), vec![Token::Number(3.25)]);
        assert_eq!(tokens(".5"), vec![Token::Number(0.5)]);
        assert_eq!(tokens("."), vec![Token::Illegal('.')]);
        assert_eq!(tokens("1.2.3"), vec![Token::Number(1.2), Token::Number(0.3)]);
    }

    #[test]
    fn reports_offsets() {
        let mut lexer = Lexer::new("12 + x");
        assert_eq!(lexer.next_token(), (Token::Number(12.0), 0));
        assert_eq!(lexer.next_token(), (Token::Plus, 3));
        assert_eq!(lexer.next_token(), (Token::Identifier("x".to_string()), 5));
        assert_eq!(lexer.next_token(), (Token::Eof, 6));
    }
}

//! Infix expression parser
//!
//! ```text
//! expr    := term  (('+' | '-') term)*
//! term    := unary (('*' | '/') unary | unary)*        juxtaposition multiplies
//! unary   := ('-' | '+') unary | power
//! power   := primary (('^' | '**') unary)?             right associative
//! primary := number | name '(' expr ')' | name | '(' expr ')'
//! ```
//!
//! `e` and `pi` are constants unless used as a call; `e^u` parses as
//! `exp(u)`. A number followed by `e` and a digit is read in scientific
//! notation, so `2e3` is `2000` while `2e` is `2 * e`.
//!
//! Nesting (parentheses, call arguments, signs, exponents) and operator
//! chains both count toward [`MAX_DEPTH`], which bounds the depth of the
//! resulting tree.

use std::sync::Arc;

use crate::symbolic::errors::ExprError;
use crate::symbolic::expr::{Expr, Func};


#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Token {
    fn text(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Ident(s)  => s.clone(),
            Token::Plus      => "+".into(),
            Token::Minus     => "-".into(),
            Token::Star      => "*".into(),
            Token::Slash     => "/".into(),
            Token::Caret     => "^".into(),
            Token::LParen    => "(".into(),
            Token::RParen    => ")".into(),
        }
    }

    fn starts_primary(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Ident(_) | Token::LParen)
    }
}


fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ExprError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        let start = i;

        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
                let mut j = i + 1;
                if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                    j += 1;
                }
                if j < bytes.len() && bytes[j].is_ascii_digit() {
                    i = j;
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }
            let text = &input[start..i];
            let value = text
                .parse::<f64>()
                .map_err(|_| ExprError::InvalidNumber { text: text.to_string() })?;
            tokens.push((Token::Number(value), start));
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            tokens.push((Token::Ident(input[start..i].to_string()), start));
            continue;
        }

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' if bytes.get(i + 1) == Some(&b'*') => {
                i += 1;
                Token::Caret
            }
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => {
                let found = input[start..].chars().next().unwrap_or(other).to_string();
                return Err(ExprError::UnexpectedToken { found, pos: start });
            }
        };
        i += 1;
        tokens.push((token, start));
    }

    Ok(tokens)
}


/// Deepest tree the parser will build.
pub const MAX_DEPTH: usize = 200;

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let out = self.tokens.get(self.pos).cloned();
        if out.is_some() {
            self.pos += 1;
        }
        out
    }

    fn expect_rparen(&mut self) -> Result<(), ExprError> {
        match self.next() {
            Some((Token::RParen, _)) => Ok(()),
            Some((tok, pos)) => Err(ExprError::UnexpectedToken { found: tok.text(), pos }),
            None => Err(ExprError::UnbalancedParens),
        }
    }

    fn enter(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::TooDeep { max: MAX_DEPTH });
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, ExprError> {
        let depth = self.depth;
        let mut lhs = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.enter()?;
                    self.pos += 1;
                    lhs = lhs + self.term()?;
                }
                Some(Token::Minus) => {
                    self.enter()?;
                    self.pos += 1;
                    lhs = lhs - self.term()?;
                }
                _ => {
                    self.depth = depth;
                    return Ok(lhs);
                }
            }
        }
    }

    fn term(&mut self) -> Result<Expr, ExprError> {
        let depth = self.depth;
        let mut lhs = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.enter()?;
                    self.pos += 1;
                    lhs = lhs * self.unary()?;
                }
                Some(Token::Slash) => {
                    self.enter()?;
                    self.pos += 1;
                    lhs = lhs / self.unary()?;
                }
                Some(tok) if tok.starts_primary() => {
                    self.enter()?;
                    lhs = lhs * self.unary()?;
                }
                _ => {
                    self.depth = depth;
                    return Ok(lhs);
                }
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        let depth = self.depth;
        self.enter()?;
        let out = self.signed();
        self.depth = depth;
        out
    }

    fn signed(&mut self) -> Result<Expr, ExprError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, ExprError> {
        let base = self.primary()?;
        if self.peek() != Some(&Token::Caret) {
            return Ok(base);
        }
        self.pos += 1;
        let exponent = self.unary()?;
        if base.as_const() == Some(std::f64::consts::E) {
            return Ok(exponent.exp());
        }
        Ok(Expr::Pow(Arc::new(base), Arc::new(exponent)))
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        let (tok, pos) = self.next().ok_or(ExprError::UnexpectedEnd)?;
        match tok {
            Token::Number(n) => Ok(Expr::Const(n)),
            Token::LParen => {
                let inner = self.expr()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Token::Ident(name) => {
                if self.peek() == Some(&Token::LParen) {
                    let func = Func::from_name(&name)
                        .ok_or(ExprError::UnknownFunction { name })?;
                    self.pos += 1;
                    let arg = self.expr()?;
                    self.expect_rparen()?;
                    return Ok(arg.apply(func));
                }
                Ok(match name.as_str() {
                    "e"  => Expr::Const(std::f64::consts::E),
                    "pi" => Expr::Const(std::f64::consts::PI),
                    _    => Expr::Symbol(name),
                })
            }
            Token::RParen => Err(ExprError::UnbalancedParens),
            other => Err(ExprError::UnexpectedToken { found: other.text(), pos }),
        }
    }
}


/// Parses an infix expression such as `"x^2 - 2"` or `"e^(-x) - ln(x)"`.
///
/// # Errors
/// - [`ExprError::EmptyInput`]      : blank input
/// - [`ExprError::UnbalancedParens`]: a `(` without `)` or a stray `)`
/// - [`ExprError::UnknownFunction`] : `name(...)` with an unsupported name
/// - [`ExprError::TooDeep`]         : the tree would exceed [`MAX_DEPTH`]
/// - [`ExprError::UnexpectedToken`] / [`ExprError::UnexpectedEnd`] otherwise
pub fn parse(input: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ExprError::EmptyInput);
    }

    let mut parser = Parser { tokens, pos: 0, depth: 0 };
    let expr = parser.expr()?;

    match parser.next() {
        None => Ok(expr),
        Some((Token::RParen, _)) => Err(ExprError::UnbalancedParens),
        Some((tok, pos)) => Err(ExprError::UnexpectedToken { found: tok.text(), pos }),
    }
}

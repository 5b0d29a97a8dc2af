//! Integrand expression parsing and LaTeX rendering.
//!
//! The input language matches what users type into the integrand and
//! bound fields: decimal numbers, the integration variable, `pi`,
//! `sin`/`cos`, the operators `+ - * / ^`, parentheses, and implicit
//! multiplication (`3x`, `2sin(x)`, `(x+1)(x-1)`). `^` is
//! exponentiation.
//!
//! Parsing is a hand-rolled recursive descent over a token stream; the
//! grammar, lowest precedence first:
//!
//! ```text
//! sum    := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary | <atom-start> unary)*
//! unary  := '-' unary | power
//! power  := atom ('^' unary)?            right-associative
//! atom   := number | ident | '(' sum ')'
//! ```

use serde::{Deserialize, Serialize};

/// Error produced when an expression fails to lex or parse.
///
/// `position` is a character offset into the original input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parse error at position {position}: {message}")]
pub struct ParseError {
    pub position: usize,
    pub message: String,
}

impl ParseError {
    fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AST
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Func {
    Sin,
    Cos,
}

impl Func {
    fn latex_name(self) -> &'static str {
        match self {
            Func::Sin => "\\sin",
            Func::Cos => "\\cos",
        }
    }
}

/// A parsed expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Pi,
    Neg(Box<Expr>),
    BinOp {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        func: Func,
        arg: Box<Expr>,
    },
}

impl Expr {
    fn binop(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Binding strength, used to decide parenthesization when rendering.
    fn precedence(&self) -> u8 {
        match self {
            Expr::Number(_) | Expr::Variable(_) | Expr::Pi | Expr::Call { .. } => 4,
            Expr::BinOp { op: BinOp::Pow, .. } => 3,
            Expr::Neg(_) => 2,
            Expr::BinOp {
                op: BinOp::Mul | BinOp::Div,
                ..
            } => 2,
            Expr::BinOp {
                op: BinOp::Add | BinOp::Sub,
                ..
            } => 1,
        }
    }

    /// Render the expression as LaTeX.
    ///
    /// Multiplication renders as juxtaposition (`3 x`), matching the
    /// typeset form of the preview, except when the right factor is a
    /// bare number (`3 \cdot 2`).
    pub fn to_latex(&self) -> String {
        match self {
            Expr::Number(n) => format_number(*n),
            Expr::Variable(name) => name.clone(),
            Expr::Pi => "\\pi".to_string(),
            Expr::Neg(inner) => format!("-{}", latex_child(inner, 2)),
            Expr::BinOp { op, lhs, rhs } => match op {
                BinOp::Add => format!("{} + {}", latex_child(lhs, 1), latex_child(rhs, 1)),
                BinOp::Sub => format!("{} - {}", latex_child(lhs, 1), latex_child(rhs, 2)),
                BinOp::Mul => {
                    let sep = if matches!(**rhs, Expr::Number(_)) {
                        " \\cdot "
                    } else {
                        " "
                    };
                    format!("{}{}{}", latex_child(lhs, 2), sep, latex_child(rhs, 3))
                }
                BinOp::Div => format!("\\frac{{{}}}{{{}}}", lhs.to_latex(), rhs.to_latex()),
                BinOp::Pow => format!("{}^{{{}}}", latex_child(lhs, 4), rhs.to_latex()),
            },
            Expr::Call { func, arg } => {
                format!("{}{{\\left({} \\right)}}", func.latex_name(), arg.to_latex())
            }
        }
    }
}

fn latex_child(child: &Expr, min_precedence: u8) -> String {
    if child.precedence() < min_precedence {
        format!("\\left({}\\right)", child.to_latex())
    } else {
        child.to_latex()
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

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

fn lex(input: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '+' | '-' | '*' | '/' | '^' | '(' | ')' => {
                let token = match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '^' => Token::Caret,
                    '(' => Token::LParen,
                    _ => Token::RParen,
                };
                tokens.push((token, i));
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value: f64 = text
                    .parse()
                    .map_err(|_| ParseError::new(start, format!("invalid number `{text}`")))?;
                tokens.push((Token::Number(value), start));
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphabetic() {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                tokens.push((Token::Ident(name), start));
            }
            other => {
                return Err(ParseError::new(i, format!("unexpected character `{other}`")));
            }
        }
    }

    Ok(tokens)
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

struct Parser<'a> {
    variable: &'a str,
    tokens: Vec<(Token, usize)>,
    pos: usize,
    input_len: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    /// Position of the current token, or end-of-input.
    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, p)| *p)
            .unwrap_or(self.input_len)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect_rparen(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Some(Token::RParen) => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(ParseError::new(self.position(), "expected `)`")),
        }
    }

    fn parse_sum(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.parse_term()?;
            lhs = Expr::binop(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    let rhs = self.parse_unary()?;
                    lhs = Expr::binop(BinOp::Mul, lhs, rhs);
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let rhs = self.parse_unary()?;
                    lhs = Expr::binop(BinOp::Div, lhs, rhs);
                }
                // Implicit multiplication: the next token starts an atom.
                Some(Token::Number(_) | Token::Ident(_) | Token::LParen) => {
                    let rhs = self.parse_unary()?;
                    lhs = Expr::binop(BinOp::Mul, lhs, rhs);
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if matches!(self.peek(), Some(Token::Minus)) {
            self.pos += 1;
            let inner = self.parse_unary()?;
            return Ok(Expr::Neg(Box::new(inner)));
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_atom()?;
        if matches!(self.peek(), Some(Token::Caret)) {
            self.pos += 1;
            // Right-associative; allow a signed exponent.
            let exponent = self.parse_unary()?;
            return Ok(Expr::binop(BinOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let position = self.position();
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Ident(name)) => self.resolve_ident(name, position),
            Some(Token::LParen) => {
                let inner = self.parse_sum()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            _ => Err(ParseError::new(position, "expected expression")),
        }
    }

    fn resolve_ident(&mut self, name: String, position: usize) -> Result<Expr, ParseError> {
        if name == self.variable {
            return Ok(Expr::Variable(name));
        }
        match name.as_str() {
            "pi" => Ok(Expr::Pi),
            "sin" | "cos" => {
                let func = if name == "sin" { Func::Sin } else { Func::Cos };
                match self.peek() {
                    Some(Token::LParen) => {
                        self.pos += 1;
                        let arg = self.parse_sum()?;
                        self.expect_rparen()?;
                        Ok(Expr::Call {
                            func,
                            arg: Box::new(arg),
                        })
                    }
                    _ => Err(ParseError::new(
                        self.position(),
                        format!("expected `(` after `{name}`"),
                    )),
                }
            }
            _ => Err(ParseError::new(
                position,
                format!("unknown identifier `{name}`"),
            )),
        }
    }
}

/// Parse `input` as an expression in `variable`.
pub fn parse_expression(input: &str, variable: &str) -> Result<Expr, ParseError> {
    let tokens = lex(input)?;
    let mut parser = Parser {
        variable,
        tokens,
        pos: 0,
        input_len: input.chars().count(),
    };
    let expr = parser.parse_sum()?;
    if parser.peek().is_some() {
        return Err(ParseError::new(parser.position(), "unexpected trailing input"));
    }
    Ok(expr)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

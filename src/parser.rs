//! Tokenizer and recursive-descent parser for word arithmetic expressions.
//!
//! Grammar:
//! ```text
//! input      := assignment | expression
//! assignment := IDENT '=' expression
//! expression := primary ( ('+'|'-') primary )*    left-associative
//! primary    := IDENT | '(' expression ')'
//! ```
//! Identifiers are case-insensitive and folded to lowercase while
//! tokenizing. Assignment is only recognized at the top of the input;
//! `=` anywhere else is a syntax error.

use crate::{EvalError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    Plus,
    Minus,
    Equals,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Ident(name) => format!("'{name}'"),
            Token::Plus => "'+'".into(),
            Token::Minus => "'-'".into(),
            Token::Equals => "'='".into(),
            Token::LParen => "'('".into(),
            Token::RParen => "')'".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    Word(String),
    BinaryOp {
        op: Op,
        left: Box<Ast>,
        right: Box<Ast>,
    },
    Assignment {
        name: String,
        expr: Box<Ast>,
    },
}

pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '=' => {
                chars.next();
                tokens.push(Token::Equals);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        name.push(c.to_ascii_lowercase());
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(name));
            }
            c => return Err(EvalError::UnexpectedCharacter(c)),
        }
    }

    Ok(tokens)
}

/// Parser state - a cursor over the token slice.
struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect_rparen(&mut self) -> Result<()> {
        match self.advance() {
            Some(Token::RParen) => Ok(()),
            Some(tok) => Err(EvalError::UnexpectedToken(tok.describe())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn parse_primary(&mut self) -> Result<Ast> {
        match self.advance() {
            Some(Token::LParen) => {
                let expr = self.parse_expression()?;
                self.expect_rparen()?;
                Ok(expr)
            }
            Some(Token::Ident(name)) => Ok(Ast::Word(name.clone())),
            Some(tok) => Err(EvalError::UnexpectedToken(tok.describe())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn parse_expression(&mut self) -> Result<Ast> {
        let mut left = self.parse_primary()?;

        loop {
            let op = match self.peek() {
                Some(Token::Plus) => Op::Add,
                Some(Token::Minus) => Op::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_primary()?;
            left = Ast::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_input(&mut self) -> Result<Ast> {
        // Assignment only when the stream starts IDENT '='
        if let (Some(Token::Ident(name)), Some(Token::Equals)) =
            (self.tokens.first(), self.tokens.get(1))
        {
            self.pos = 2;
            let expr = self.parse_expression()?;
            return Ok(Ast::Assignment {
                name: name.clone(),
                expr: Box::new(expr),
            });
        }

        self.parse_expression()
    }
}

/// Tokenize and parse `input` into an AST in one pass.
pub fn parse(input: &str) -> Result<Ast> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
    };

    let ast = parser.parse_input()?;

    // A dangling token after a complete parse is a syntax error
    if let Some(tok) = parser.peek() {
        return Err(EvalError::UnexpectedToken(tok.describe()));
    }

    Ok(ast)
}

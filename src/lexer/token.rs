use std::error::Error;
use std::fmt;

use super::chars::Chars;
use crate::error::{Error as SchemeError, ErrorKind};

/**
    Tokenizer

    Integer constants and symbols require no explicit delimiter: a constant
    ends at the first non-digit and a symbol at the first character that
    cannot continue it, so `12ab` reads as `12` followed by `ab`.
*/

/// A Scheme token
#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub ty: TokenType,
    span: (usize, usize),
}

impl Token {
    pub fn fake(ty: TokenType) -> Token {
        Token { ty, span: (0, 0) }
    }

    pub fn span(&self) -> (usize, usize) {
        self.span
    }
}

/// The type of a Scheme token
#[derive(Clone, PartialEq, Debug)]
pub enum TokenType {
    /// End of input, returned again on every further advance
    End,
    Identifier(String),
    Integer(i64),
    Open,
    Close,
    SingleQuote,
    Dot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenizerError {
    error: TokenErrorClass,
    pos: usize,
}

impl TokenizerError {
    pub fn class(&self) -> TokenErrorClass {
        self.error
    }
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self.error {
            TokenErrorClass::UnexpectedCharacter(c) => {
                write!(fmt, "unexpected character '{}' at position {}", c, self.pos)
            }
        }
    }
}

impl Error for TokenizerError {}

impl From<TokenizerError> for SchemeError {
    fn from(err: TokenizerError) -> SchemeError {
        SchemeError::new(ErrorKind::Syntax, err.to_string())
    }
}

/// The possible errors while tokenizing the input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenErrorClass {
    UnexpectedCharacter(char),
}

macro_rules! tok_ret {
    ($value:expr; $lo:expr => $hi:expr) => {{
        return Ok(Token {
            ty: $value,
            span: ($lo, $hi),
        });
    }};

    ($value:expr, on $lo:expr) => {{
        tok_ret!($value; $lo => $lo + 1)
    }};
}

pub fn next_token(stream: &mut Chars) -> Result<Token, TokenizerError> {
    stream.skip_whitespace();
    let starting_pos = stream.pos();

    let c = match stream.peek(0) {
        None => tok_ret!(TokenType::End; starting_pos => starting_pos),
        Some(c) => c,
    };

    match (c, stream.peek(1)) {
        ('+', Some(d)) | ('-', Some(d)) if d.is_ascii_digit() => {
            stream.next();
            let magnitude = parse_digits(stream);
            let value = if c == '-' {
                magnitude.wrapping_neg()
            } else {
                magnitude
            };
            tok_ret!(TokenType::Integer(value); starting_pos => stream.pos())
        }
        ('+', _) | ('-', _) => {
            stream.next();
            tok_ret!(TokenType::Identifier(c.to_string()), on starting_pos)
        }
        (d, _) if d.is_ascii_digit() => {
            let value = parse_digits(stream);
            tok_ret!(TokenType::Integer(value); starting_pos => stream.pos())
        }
        ('(', _) => {
            stream.next();
            tok_ret!(TokenType::Open, on starting_pos)
        }
        (')', _) => {
            stream.next();
            tok_ret!(TokenType::Close, on starting_pos)
        }
        ('\'', _) => {
            stream.next();
            tok_ret!(TokenType::SingleQuote, on starting_pos)
        }
        ('.', _) => {
            stream.next();
            tok_ret!(TokenType::Dot, on starting_pos)
        }
        (d, _) if is_initial(d) => {
            let mut identifier = String::new();
            while let Some(e) = stream.peek(0) {
                if identifier.is_empty() || is_subsequent(e) {
                    identifier.push(e);
                    stream.next();
                } else {
                    break;
                }
            }
            tok_ret!(TokenType::Identifier(identifier); starting_pos => stream.pos())
        }
        (d, _) => Err(TokenizerError {
            error: TokenErrorClass::UnexpectedCharacter(d),
            pos: starting_pos,
        }),
    }
}

// Overflowing literals wrap, matching the arithmetic of the evaluator
fn parse_digits(stream: &mut Chars) -> i64 {
    let mut value: i64 = 0;
    while let Some(d) = stream.peek(0).and_then(|c| c.to_digit(10)) {
        value = value.wrapping_mul(10).wrapping_add(i64::from(d));
        stream.next();
    }
    value
}

#[inline]
fn is_initial(c: char) -> bool {
    c.is_ascii_alphabetic() || is_special_initial(c)
}

#[inline]
fn is_subsequent(c: char) -> bool {
    is_initial(c) || c.is_ascii_digit() || is_special_subsequent(c)
}

#[inline]
fn is_special_initial(c: char) -> bool {
    match c {
        '<' | '=' | '>' | '*' | '/' | '#' => true,
        _ => false,
    }
}

#[inline]
fn is_special_subsequent(c: char) -> bool {
    match c {
        '?' | '!' | '-' => true,
        _ => false,
    }
}

/// Pull-style token stream: `current` is the token under the cursor,
/// `advance` moves past it.
#[derive(Debug)]
pub struct Tokens {
    chars: Chars,
    current: Token,
}

impl Tokens {
    pub fn new(source: &str) -> Result<Tokens, TokenizerError> {
        let mut chars = Chars::from_str(source);
        let current = next_token(&mut chars)?;
        Ok(Tokens { chars, current })
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    pub fn is_end(&self) -> bool {
        self.current.ty == TokenType::End
    }

    pub fn advance(&mut self) -> Result<(), TokenizerError> {
        if !self.is_end() {
            self.current = next_token(&mut self.chars)?;
            trace!("token: {:?}", self.current);
        }
        Ok(())
    }
}

impl Iterator for Tokens {
    type Item = Result<Token, TokenizerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_end() {
            return None;
        }
        let token = self.current.clone();
        match self.advance() {
            Ok(()) => Some(Ok(token)),
            Err(e) => {
                self.current = Token::fake(TokenType::End);
                Some(Err(e))
            }
        }
    }
}

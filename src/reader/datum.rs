use std::error::Error;
use std::fmt;

use crate::error::{Error as SchemeError, ErrorKind};
use crate::lexer::{TokenType, Tokens, TokenizerError};
use crate::vm::Value;

#[derive(Debug, PartialEq)]
pub enum ReaderError {
    Tokenizer(TokenizerError),
    UnexpectedEOF,
    UnexpectedListToken,
    UnexpectedToken,
    InvalidPound(String),
    TrailingTokens,
}

impl fmt::Display for ReaderError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ReaderError::Tokenizer(ref err) => err.fmt(fmt),
            ReaderError::UnexpectedEOF => fmt.write_str("unexpected end of input"),
            ReaderError::UnexpectedListToken => fmt.write_str("misplaced `.` or `)` in list"),
            ReaderError::UnexpectedToken => fmt.write_str("unexpected `.` or `)`"),
            ReaderError::InvalidPound(ref s) => write!(fmt, "illegal symbol `{}`", s),
            ReaderError::TrailingTokens => fmt.write_str("more than one form in input"),
        }
    }
}

impl Error for ReaderError {}

impl From<TokenizerError> for ReaderError {
    fn from(err: TokenizerError) -> ReaderError {
        ReaderError::Tokenizer(err)
    }
}

impl From<ReaderError> for SchemeError {
    fn from(err: ReaderError) -> SchemeError {
        SchemeError::new(ErrorKind::Syntax, err.to_string())
    }
}

/// Reads one datum starting at the current token, leaving the stream on
/// the token right after it.
pub fn parse_datum(stream: &mut Tokens) -> Result<Value, ReaderError> {
    let ty = stream.current().ty.clone();

    match ty {
        TokenType::End => Err(ReaderError::UnexpectedEOF),
        TokenType::Integer(n) => {
            stream.advance()?;
            Ok(Value::Integer(n))
        }
        TokenType::Identifier(name) => {
            let value = if name == "#t" {
                Value::Boolean(true)
            } else if name == "#f" {
                Value::Boolean(false)
            } else if name.starts_with('#') {
                return Err(ReaderError::InvalidPound(name));
            } else {
                Value::symbol(name)
            };
            stream.advance()?;
            Ok(value)
        }
        TokenType::SingleQuote => {
            stream.advance()?;
            let datum = parse_datum(stream)?;
            Ok(Value::list(vec![Value::symbol("quote"), datum]))
        }
        TokenType::Open => {
            stream.advance()?;
            parse_list_datum(stream)
        }
        TokenType::Close | TokenType::Dot => Err(ReaderError::UnexpectedToken),
    }
}

// Assumes a stream without the initial Open
fn parse_list_datum(stream: &mut Tokens) -> Result<Value, ReaderError> {
    let mut datums = vec![];

    loop {
        let ty = stream.current().ty.clone();
        match ty {
            TokenType::End => return Err(ReaderError::UnexpectedEOF),
            TokenType::Close => {
                stream.advance()?;
                return Ok(Value::list(datums));
            }
            TokenType::Dot if !datums.is_empty() => {
                stream.advance()?;
                break;
            }
            TokenType::Dot => return Err(ReaderError::UnexpectedListToken),
            _ => datums.push(parse_datum(stream)?),
        }
    }

    // Exactly one datum, then the closing bracket
    let ty = stream.current().ty.clone();
    let tail = match ty {
        TokenType::End => return Err(ReaderError::UnexpectedEOF),
        TokenType::Close | TokenType::Dot => return Err(ReaderError::UnexpectedListToken),
        _ => parse_datum(stream)?,
    };
    let ty = stream.current().ty.clone();
    match ty {
        TokenType::Close => {
            stream.advance()?;
            Ok(Value::list_with_tail(datums, tail))
        }
        TokenType::End => Err(ReaderError::UnexpectedEOF),
        _ => Err(ReaderError::UnexpectedListToken),
    }
}

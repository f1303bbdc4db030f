//! Convert tokens into values
mod datum;

pub use self::datum::{parse_datum, ReaderError};
use crate::error::Error;
use crate::lexer::Tokens;
use crate::vm::Value;

/// Reads consecutive forms out of a single source text
pub struct Reader {
    tokens: Tokens,
}

impl Reader {
    pub fn new(source: &str) -> Result<Reader, Error> {
        Ok(Reader {
            tokens: Tokens::new(source)?,
        })
    }

    /// The next form, or `None` once only whitespace is left
    pub fn next_form(&mut self) -> Result<Option<Value>, Error> {
        if self.tokens.is_end() {
            return Ok(None);
        }
        Ok(Some(parse_datum(&mut self.tokens)?))
    }
}

/// Reads exactly one form. Empty input and anything left after the form
/// are syntax errors.
pub fn read_form(source: &str) -> Result<Value, Error> {
    let mut tokens = Tokens::new(source)?;
    let value = parse_datum(&mut tokens)?;

    if !tokens.is_end() {
        return Err(ReaderError::TrailingTokens.into());
    }
    Ok(value)
}

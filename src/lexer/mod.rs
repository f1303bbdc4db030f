//! Convert source text into tokens
mod chars;
mod token;


pub use self::token::{Token, TokenErrorClass, TokenType, Tokens, TokenizerError};

//! A minimal Scheme interpreter: integers, booleans, symbols, pairs and
//! lexically scoped procedures
#[macro_use]
extern crate gc;
#[macro_use]
extern crate log;

#[macro_use]
mod helpers;

pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod reader;
pub mod vm;

pub use crate::error::{Error, ErrorKind};
pub use crate::interpreter::Interpreter;

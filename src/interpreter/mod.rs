//! Text in, printed value out
use crate::error::Error;
use crate::reader::{read_form, Reader};
use crate::vm::{default_env, eval, Environment, GcShared, Value};

/// Owns the root environment. Definitions made by one `evaluate` call are
/// visible to the next.
pub struct Interpreter {
    environment: GcShared<Environment>,
}

impl Default for Interpreter {
    fn default() -> Interpreter {
        Interpreter::new()
    }
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter {
            environment: default_env(),
        }
    }

    /// Reads exactly one form from `source`, evaluates it in the root
    /// environment and prints the result. Side effects performed before an
    /// error are kept.
    pub fn evaluate(&self, source: &str) -> Result<String, Error> {
        let form = read_form(source)?;
        debug!("evaluate {}", source.trim());
        eval(&form, &self.environment)?.to_repl()
    }

    /// Evaluates every form of `source` in order, handing each result to
    /// `cb`. Stops at the first read error, or when `cb` returns `false`.
    pub fn evaluate_all<F>(&self, source: &str, mut cb: F) -> Result<(), Error>
    where
        F: FnMut(Result<String, Error>) -> bool,
    {
        let mut reader = Reader::new(source)?;

        while let Some(form) = reader.next_form()? {
            let result = eval(&form, &self.environment).and_then(|value: Value| value.to_repl());
            if !cb(result) {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test;

//! Evaluation of values against chained environments
use std::collections::HashMap;

pub use self::gc::{shared, GcShared};
pub use self::value::{Arity, Environment, Evaluation, Lambda, NativeProcedure, Pair, Value};
use crate::error::Error;

mod environment;
mod gc;
mod stdlib;
mod value;


/// An environment with no bindings at all
pub fn null_env() -> GcShared<Environment> {
    shared(Environment {
        parent: None,
        bindings: HashMap::new(),
    })
}

/// The root environment, holding every built-in under its name
pub fn default_env() -> GcShared<Environment> {
    let mut env = Environment::default();

    for native in stdlib::STDLIB.iter() {
        env.define(native.name.into(), Value::NativeProcedure(*native));
    }

    shared(env)
}

pub fn eval(expression: &Value, environment: &GcShared<Environment>) -> Result<Value, Error> {
    match *expression {
        Value::Integer(_) | Value::Boolean(_) => Ok(expression.clone()),
        Value::Symbol(ref name) => {
            let found = environment.borrow().get(name);
            match found {
                Some(value) => Ok(value),
                None => name_err!(
                    "unbound variable `{}` (scope depth {})",
                    name,
                    environment.borrow().depth()
                ),
            }
        }
        Value::Pair(ref pair) => {
            let (head, tail) = {
                let borrowed = pair.borrow();
                (borrowed.0.clone(), borrowed.1.clone())
            };
            let procedure = eval(&head, environment)?;
            apply(&procedure, &tail.to_vec(), environment)
        }
        Value::EmptyList => runtime_err!("cannot evaluate the empty list"),
        Value::Procedure(_) | Value::NativeProcedure(_) => {
            runtime_err!("procedures do not evaluate to themselves")
        }
    }
}

/// Applies `procedure` to unevaluated `operands`. Each procedure decides
/// which operands get evaluated in `environment`, and in what order.
pub fn apply(
    procedure: &Value,
    operands: &[Value],
    environment: &GcShared<Environment>,
) -> Result<Value, Error> {
    match *procedure {
        Value::NativeProcedure(ref native) => call_native(native, operands, environment),
        Value::Procedure(ref lambda) => call_lambda(lambda, operands, environment),
        ref other => runtime_err!("{} is not a functor", describe(other)),
    }
}

fn call_native(
    native: &NativeProcedure,
    operands: &[Value],
    environment: &GcShared<Environment>,
) -> Result<Value, Error> {
    debug!("apply {} to {} operand(s)", native.name, operands.len());

    if !native.arity.accepts(operands.len()) {
        let message = format!(
            "{} expects {}, got {} operand(s)",
            native.name,
            describe_arity(native.arity),
            operands.len()
        );
        return match native.evaluation {
            Evaluation::SpecialForm(_) => syntax_err!("{}", message),
            _ => runtime_err!("{}", message),
        };
    }

    match native.evaluation {
        Evaluation::Strict(fun) => {
            let arguments = operands
                .iter()
                .map(|operand| eval(operand, environment))
                .collect::<Result<Vec<_>, _>>()?;
            fun(arguments)
        }
        Evaluation::Incremental(fun) | Evaluation::Quoted(fun) | Evaluation::SpecialForm(fun) => {
            fun(operands, environment)
        }
    }
}

fn call_lambda(
    lambda: &Lambda,
    operands: &[Value],
    environment: &GcShared<Environment>,
) -> Result<Value, Error> {
    if operands.len() != lambda.parameters.len() {
        runtime_err!(
            "lambda expects {} argument(s), got {}",
            lambda.parameters.len(),
            operands.len()
        );
    }

    let frame = environment::child(&lambda.environment);
    for (name, operand) in lambda.parameters.iter().zip(operands) {
        let argument = eval(operand, environment)?;
        frame.borrow_mut().define(name.clone(), argument);
    }
    trace!("call lambda {:?} at depth {}", lambda.parameters, frame.borrow().depth());

    let mut result = Value::EmptyList;
    for expression in &lambda.body {
        result = eval(expression, &frame)?;
    }
    Ok(result)
}

fn describe_arity(arity: Arity) -> String {
    match arity {
        Arity::Exactly(n) => format!("exactly {}", n),
        Arity::AtLeast(n) => format!("at least {}", n),
        Arity::Between(lo, hi) => format!("{} to {}", lo, hi),
    }
}

/// Short description of a value for error messages. Pairs are never
/// walked, since a chain may be circular.
pub(crate) fn describe(value: &Value) -> String {
    match *value {
        Value::Pair(_) => "#<pair>".to_owned(),
        Value::Procedure(_) => "#<procedure>".to_owned(),
        Value::NativeProcedure(ref native) => format!("#<procedure {}>", native.name),
        ref other => other
            .to_repl()
            .unwrap_or_else(|_| "#<value>".to_owned()),
    }
}

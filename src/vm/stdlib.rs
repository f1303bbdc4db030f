use super::value::Arity::*;
use super::value::Evaluation::*;
use super::value::{Environment, Lambda, NativeProcedure, Value};
use super::{describe, eval, GcShared};
use crate::error::Error;
use crate::helpers::ImmutableString;
use gc::Gc;

macro_rules! native {
    ($name:expr, $arity:expr, $evaluation:expr) => {
        NativeProcedure {
            name: $name,
            arity: $arity,
            evaluation: $evaluation,
        }
    };
}

/// Every binding of the root environment
pub(super) static STDLIB: &[NativeProcedure] = &[
    // Arithmetic
    native!("+", AtLeast(0), Strict(add)),
    native!("*", AtLeast(0), Strict(multiply)),
    native!("-", AtLeast(1), Strict(subtract)),
    native!("/", AtLeast(1), Strict(divide)),
    native!("max", AtLeast(1), Strict(max)),
    native!("min", AtLeast(1), Strict(min)),
    native!("abs", Exactly(1), Strict(abs)),
    // Comparison
    native!("<", AtLeast(0), Incremental(less)),
    native!(">", AtLeast(0), Incremental(greater)),
    native!("=", AtLeast(0), Incremental(equal)),
    native!("<=", AtLeast(0), Incremental(less_equal)),
    native!(">=", AtLeast(0), Incremental(greater_equal)),
    // Logic
    native!("and", AtLeast(0), Incremental(and)),
    native!("or", AtLeast(0), Incremental(or)),
    native!("not", Exactly(1), Quoted(not)),
    // Predicates
    native!("number?", Exactly(1), Strict(is_number)),
    native!("boolean?", Exactly(1), Strict(is_boolean)),
    native!("pair?", Exactly(1), Strict(is_pair)),
    native!("symbol?", Exactly(1), Strict(is_symbol)),
    native!("null?", Exactly(1), Strict(is_null)),
    native!("list?", Exactly(1), Strict(is_list)),
    // Lists
    native!("quote", Exactly(1), Quoted(quote)),
    native!("car", Exactly(1), Strict(car)),
    native!("cdr", Exactly(1), Strict(cdr)),
    native!("cons", Exactly(2), Strict(cons)),
    native!("list", AtLeast(0), Quoted(list)),
    native!("list-ref", Exactly(2), Strict(list_ref)),
    native!("list-tail", Exactly(2), Strict(list_tail)),
    // Control and binding
    native!("if", Between(2, 3), SpecialForm(if_)),
    native!("define", AtLeast(1), SpecialForm(define)),
    native!("set!", Exactly(2), SpecialForm(set)),
    native!("set-car!", Exactly(2), Strict(set_car)),
    native!("set-cdr!", Exactly(2), Strict(set_cdr)),
    native!("lambda", AtLeast(2), SpecialForm(lambda)),
];

fn integer(name: &str, value: &Value) -> Result<i64, Error> {
    match *value {
        Value::Integer(n) => Ok(n),
        ref other => runtime_err!("{} expects numbers, got {}", name, describe(other)),
    }
}

fn integers(name: &str, values: &[Value]) -> Result<Vec<i64>, Error> {
    values.iter().map(|value| integer(name, value)).collect()
}

fn fold(
    name: &str,
    values: Vec<Value>,
    init: i64,
    step: fn(i64, i64) -> Result<i64, Error>,
) -> Result<Value, Error> {
    let mut result = init;
    for n in integers(name, &values)? {
        result = step(result, n)?;
    }
    Ok(Value::Integer(result))
}

// Folds without identity: the first operand seeds the accumulator
fn fold1(
    name: &str,
    values: Vec<Value>,
    step: fn(i64, i64) -> Result<i64, Error>,
) -> Result<Value, Error> {
    let numbers = integers(name, &values)?;
    let mut result = numbers[0];
    for &n in &numbers[1..] {
        result = step(result, n)?;
    }
    Ok(Value::Integer(result))
}

fn checked_div(a: i64, b: i64) -> Result<i64, Error> {
    if b == 0 {
        runtime_err!("division by zero");
    }
    Ok(a.wrapping_div(b))
}

fn add(values: Vec<Value>) -> Result<Value, Error> {
    fold("+", values, 0, |a, b| Ok(a.wrapping_add(b)))
}

fn multiply(values: Vec<Value>) -> Result<Value, Error> {
    fold("*", values, 1, |a, b| Ok(a.wrapping_mul(b)))
}

fn subtract(values: Vec<Value>) -> Result<Value, Error> {
    if values.len() == 1 {
        return Ok(Value::Integer(integer("-", &values[0])?.wrapping_neg()));
    }
    fold1("-", values, |a, b| Ok(a.wrapping_sub(b)))
}

// A single operand is returned as is
fn divide(values: Vec<Value>) -> Result<Value, Error> {
    fold1("/", values, checked_div)
}

fn max(values: Vec<Value>) -> Result<Value, Error> {
    fold1("max", values, |a, b| Ok(a.max(b)))
}

fn min(values: Vec<Value>) -> Result<Value, Error> {
    fold1("min", values, |a, b| Ok(a.min(b)))
}

fn abs(values: Vec<Value>) -> Result<Value, Error> {
    Ok(Value::Integer(integer("abs", &values[0])?.wrapping_abs()))
}

// Stops evaluating operands as soon as one adjacent pair fails `test`
fn compare(
    name: &str,
    operands: &[Value],
    environment: &GcShared<Environment>,
    test: fn(i64, i64) -> bool,
) -> Result<Value, Error> {
    let mut previous = None;
    for operand in operands {
        let current = integer(name, &eval(operand, environment)?)?;
        if let Some(previous) = previous {
            if !test(previous, current) {
                return Ok(Value::Boolean(false));
            }
        }
        previous = Some(current);
    }
    Ok(Value::Boolean(true))
}

fn less(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value, Error> {
    compare("<", operands, environment, |a, b| a < b)
}

fn greater(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value, Error> {
    compare(">", operands, environment, |a, b| a > b)
}

fn equal(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value, Error> {
    compare("=", operands, environment, |a, b| a == b)
}

fn less_equal(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value, Error> {
    compare("<=", operands, environment, |a, b| a <= b)
}

fn greater_equal(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value, Error> {
    compare(">=", operands, environment, |a, b| a >= b)
}

fn and(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value, Error> {
    let mut last = Value::Boolean(true);
    for operand in operands {
        last = eval(operand, environment)?;
        if !bool::from(&last) {
            break;
        }
    }
    Ok(last)
}

fn or(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value, Error> {
    let mut last = Value::Boolean(false);
    for operand in operands {
        last = eval(operand, environment)?;
        if bool::from(&last) {
            break;
        }
    }
    Ok(last)
}

// Looks at the operand as written: `(not x)` is #f even when x is bound to #f
fn not(operands: &[Value], _: &GcShared<Environment>) -> Result<Value, Error> {
    Ok(Value::Boolean(!bool::from(&operands[0])))
}

fn is_number(values: Vec<Value>) -> Result<Value, Error> {
    Ok(Value::Boolean(values[0].is_number()))
}

fn is_boolean(values: Vec<Value>) -> Result<Value, Error> {
    Ok(Value::Boolean(values[0].is_boolean()))
}

fn is_pair(values: Vec<Value>) -> Result<Value, Error> {
    Ok(Value::Boolean(values[0].is_pair()))
}

fn is_symbol(values: Vec<Value>) -> Result<Value, Error> {
    Ok(Value::Boolean(values[0].is_symbol()))
}

fn is_null(values: Vec<Value>) -> Result<Value, Error> {
    Ok(Value::Boolean(values[0].is_null()))
}

fn is_list(values: Vec<Value>) -> Result<Value, Error> {
    Ok(Value::Boolean(values[0].is_list()))
}

fn quote(operands: &[Value], _: &GcShared<Environment>) -> Result<Value, Error> {
    Ok(operands[0].clone())
}

fn car(values: Vec<Value>) -> Result<Value, Error> {
    match values[0].car() {
        Some(car) => Ok(car),
        None => runtime_err!("car expects a pair, got {}", describe(&values[0])),
    }
}

fn cdr(values: Vec<Value>) -> Result<Value, Error> {
    match values[0].cdr() {
        Some(cdr) => Ok(cdr),
        None => runtime_err!("cdr expects a pair, got {}", describe(&values[0])),
    }
}

fn cons(mut values: Vec<Value>) -> Result<Value, Error> {
    let cdr = values.pop().unwrap_or(Value::EmptyList);
    let car = values.pop().unwrap_or(Value::EmptyList);
    Ok(Value::cons(car, cdr))
}

// Operands are taken as written: `(list (+ 1 2))` is `((+ 1 2))`
fn list(operands: &[Value], _: &GcShared<Environment>) -> Result<Value, Error> {
    Ok(Value::list(operands.to_vec()))
}

fn list_arguments(name: &str, values: &[Value]) -> Result<(Value, i64), Error> {
    if !values[0].is_pair() {
        runtime_err!("{} expects a pair, got {}", name, describe(&values[0]));
    }
    let index = integer(name, &values[1])?;
    if index < 0 {
        runtime_err!("{} index {} is negative", name, index);
    }
    Ok((values[0].clone(), index))
}

// Follows `index` links of the chain. Fails if the chain ends first.
fn nth_tail(name: &str, list: Value, index: i64) -> Result<Value, Error> {
    let mut current = list;
    for _ in 0..index {
        current = match current.cdr() {
            Some(next) => next,
            None => runtime_err!("{} index {} is out of range", name, index),
        };
    }
    Ok(current)
}

// A dotted tail counts as the last element
fn list_ref(values: Vec<Value>) -> Result<Value, Error> {
    let (list, index) = list_arguments("list-ref", &values)?;
    let tail = nth_tail("list-ref", list, index)?;
    match tail.car() {
        Some(element) => Ok(element),
        None if index > 0 && !tail.is_null() => Ok(tail),
        None => runtime_err!("list-ref index {} is out of range", index),
    }
}

fn list_tail(values: Vec<Value>) -> Result<Value, Error> {
    let (list, index) = list_arguments("list-tail", &values)?;
    nth_tail("list-tail", list, index)
}

fn if_(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value, Error> {
    let condition = match eval(&operands[0], environment)? {
        Value::Boolean(b) => b,
        ref other => runtime_err!("if expects a boolean condition, got {}", describe(other)),
    };

    if condition {
        eval(&operands[1], environment)
    } else if let Some(alternative) = operands.get(2) {
        eval(alternative, environment)
    } else {
        Ok(Value::EmptyList)
    }
}

fn symbol_name(form: &str, value: &Value) -> Result<ImmutableString, Error> {
    match *value {
        Value::Symbol(ref name) => Ok(name.clone()),
        ref other => syntax_err!("{} expects a symbol, got {}", form, describe(other)),
    }
}

// `(a b c)` or `()`, each element a symbol
fn parameter_names(form: &str, value: &Value) -> Result<Vec<ImmutableString>, Error> {
    if !value.is_list() {
        syntax_err!("{} expects a parameter list, got {}", form, describe(value));
    }
    value
        .to_vec()
        .iter()
        .map(|parameter| symbol_name(form, parameter))
        .collect()
}

fn make_lambda(
    parameters: Vec<ImmutableString>,
    body: &[Value],
    environment: &GcShared<Environment>,
) -> Value {
    Value::Procedure(Gc::new(Lambda {
        parameters,
        body: body.to_vec(),
        environment: environment.clone(),
    }))
}

fn define(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value, Error> {
    match operands[0] {
        Value::Symbol(ref name) => {
            if operands.len() != 2 {
                syntax_err!(
                    "define of a variable expects 2 operands, got {}",
                    operands.len()
                );
            }
            let value = eval(&operands[1], environment)?;
            debug!("define {}", name);
            environment.borrow_mut().define(name.clone(), value);
            Ok(Value::Symbol(name.clone()))
        }
        Value::Pair(_) => {
            if operands.len() < 2 {
                runtime_err!("define of a procedure needs a body");
            }
            if !operands[0].is_list() {
                syntax_err!("malformed procedure signature {}", describe(&operands[0]));
            }
            let signature = operands[0].to_vec();
            let name = symbol_name("define", &signature[0])?;
            let parameters = signature[1..]
                .iter()
                .map(|parameter| symbol_name("define", parameter))
                .collect::<Result<Vec<_>, _>>()?;
            debug!("define {} with {} parameter(s)", name, parameters.len());
            let procedure = make_lambda(parameters, &operands[1..], environment);
            environment.borrow_mut().define(name.clone(), procedure);
            Ok(Value::Symbol(name))
        }
        ref other => syntax_err!("cannot define {}", describe(other)),
    }
}

fn set(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value, Error> {
    let name = match operands[0] {
        Value::Symbol(ref name) => name.clone(),
        ref other => runtime_err!("set! expects a symbol, got {}", describe(other)),
    };
    let value = eval(&operands[1], environment)?;
    if !environment.borrow_mut().set(&name, value.clone()) {
        name_err!("cannot set! undefined variable `{}`", name);
    }
    Ok(value)
}

fn set_car(values: Vec<Value>) -> Result<Value, Error> {
    match values[0].pair() {
        Some(pair) => {
            pair.borrow_mut().0 = values[1].clone();
        }
        None => runtime_err!("set-car! expects a pair, got {}", describe(&values[0])),
    }
    Ok(Value::EmptyList)
}

fn set_cdr(values: Vec<Value>) -> Result<Value, Error> {
    match values[0].pair() {
        Some(pair) => {
            pair.borrow_mut().1 = values[1].clone();
        }
        None => runtime_err!("set-cdr! expects a pair, got {}", describe(&values[0])),
    }
    Ok(Value::EmptyList)
}

fn lambda(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value, Error> {
    let parameters = parameter_names("lambda", &operands[0])?;
    Ok(make_lambda(parameters, &operands[1..], environment))
}

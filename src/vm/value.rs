use super::environment::Environment as GenericEnvironment;
use super::gc::{shared, GcShared};
use crate::error::Error;
use crate::helpers::ImmutableString;
use gc::{Finalize, Gc, Trace};

pub type Environment = GenericEnvironment<Value>;

/// Scheme values
#[derive(Debug, Clone)]
pub enum Value {
    /// The empty list `()`, also standing for an absent pair slot
    EmptyList,
    /// A 64-bit integer with wrapping arithmetic
    Integer(i64),
    /// A boolean
    Boolean(bool),
    /// A symbol (`'a`), case-sensitive
    Symbol(ImmutableString),
    /// A mutable pair (`'(1 . 2)`)
    Pair(GcShared<Pair<Value>>),
    /// A procedure created by `lambda`
    Procedure(Gc<Lambda>),
    /// A natively implemented procedure or special form
    NativeProcedure(NativeProcedure),
}

#[derive(Debug, Clone)]
pub struct Pair<T>(pub T, pub T);

impl<T> Finalize for Pair<T> {}

unsafe impl<T: Trace> Trace for Pair<T> {
    custom_trace!(this, {
        mark(&this.0);
        mark(&this.1);
    });
}

/// A closure: parameter names, body forms and the frame it was created in
#[derive(Debug)]
pub struct Lambda {
    pub(super) parameters: Vec<ImmutableString>,
    pub(super) body: Vec<Value>,
    pub(super) environment: GcShared<Environment>,
}

impl Finalize for Lambda {}
unsafe impl Trace for Lambda {
    custom_trace!(this, {
        mark(&this.body);
        mark(&this.environment);
    });
}

// Pairs and procedures compare by identity, everything else by value
impl PartialEq<Value> for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (&Value::EmptyList, &Value::EmptyList) => true,
            (&Value::Integer(n), &Value::Integer(m)) => m == n,
            (&Value::Boolean(x), &Value::Boolean(y)) => x == y,
            (&Value::Symbol(ref x), &Value::Symbol(ref y)) => *x == *y,
            (&Value::Pair(ref pair), &Value::Pair(ref pair2)) => {
                let borrow = pair.borrow();
                let borrow2 = pair2.borrow();
                &*borrow as *const Pair<Value> == &*borrow2 as *const Pair<Value>
            }
            (&Value::Procedure(ref lambda), &Value::Procedure(ref lambda2)) => {
                &**lambda as *const Lambda == &**lambda2 as *const Lambda
            }
            (&Value::NativeProcedure(ref native), &Value::NativeProcedure(ref native2)) => {
                native.name == native2.name
            }
            _ => false,
        }
    }
}

impl Finalize for Value {}
unsafe impl Trace for Value {
    custom_trace!(this, {
        match *this {
            Value::Pair(ref pair) => mark(pair),
            Value::Procedure(ref lambda) => mark(lambda),
            Value::EmptyList
            | Value::Integer(_)
            | Value::Boolean(_)
            | Value::Symbol(_)
            | Value::NativeProcedure(_) => {}
        }
    });
}

/// Receives operands already evaluated, left to right
pub type StrictFn = fn(Vec<Value>) -> Result<Value, Error>;
/// Receives operands exactly as written, plus the caller's environment
pub type FormFn = fn(&[Value], &GcShared<Environment>) -> Result<Value, Error>;

/// How a native procedure treats its operands
#[derive(Clone, Copy)]
pub enum Evaluation {
    /// Every operand is evaluated before the call
    Strict(StrictFn),
    /// The procedure evaluates operands one at a time and may stop early
    Incremental(FormFn),
    /// Operands are never evaluated
    Quoted(FormFn),
    /// Like `Quoted`, but a wrong operand count is a syntax error
    SpecialForm(FormFn),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
    Between(usize, usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Between(lo, hi) => lo <= count && count <= hi,
        }
    }
}

#[derive(Clone, Copy)]
pub struct NativeProcedure {
    pub(super) name: &'static str,
    pub(super) arity: Arity,
    pub(super) evaluation: Evaluation,
}

impl NativeProcedure {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

use std::fmt::{Debug, Formatter, Result as FmtResult};
impl Debug for NativeProcedure {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "NativeProcedure({}, {:?})", self.name, self.arity)
    }
}

impl<'a> From<&'a Value> for bool {
    fn from(v: &Value) -> bool {
        match *v {
            Value::Boolean(false) => false,
            _ => true,
        }
    }
}

macro_rules! simple_type {
    ($name:ident, $var:pat) => (
        pub fn $name(&self) -> bool {
            match *self {
                $var => true,
                _ => false
            }
        }
    )
}

impl Value {
    pub fn cons(car: Value, cdr: Value) -> Value {
        Value::Pair(shared(Pair(car, cdr)))
    }

    /// Builds a proper list holding `values` in order
    pub fn list(values: Vec<Value>) -> Value {
        Value::list_with_tail(values, Value::EmptyList)
    }

    /// Builds a chain holding `values` whose last pair ends in `tail`
    pub fn list_with_tail(values: Vec<Value>, tail: Value) -> Value {
        values
            .into_iter()
            .rev()
            .fold(tail, |cdr, car| Value::cons(car, cdr))
    }

    pub fn symbol<S: Into<ImmutableString>>(name: S) -> Value {
        Value::Symbol(name.into())
    }

    /// Serializes the value the way the REPL prints it
    pub fn to_repl(&self) -> Result<String, Error> {
        let mut out = String::new();
        self.write_repl(&mut out)?;
        Ok(out)
    }

    fn write_repl(&self, out: &mut String) -> Result<(), Error> {
        match *self {
            Value::EmptyList => out.push_str("()"),
            Value::Integer(n) => out.push_str(&n.to_string()),
            Value::Boolean(b) => out.push_str(if b { "#t" } else { "#f" }),
            Value::Symbol(ref s) => out.push_str(s),
            Value::Pair(ref pair) => {
                let (mut car, mut cdr) = {
                    let borrowed = pair.borrow();
                    (borrowed.0.clone(), borrowed.1.clone())
                };
                out.push('(');
                loop {
                    car.write_repl(out)?;
                    let next = match cdr {
                        Value::EmptyList => break,
                        Value::Pair(ref next) => next.clone(),
                        ref tail => {
                            out.push_str(" . ");
                            tail.write_repl(out)?;
                            break;
                        }
                    };
                    out.push(' ');
                    let borrowed = next.borrow();
                    car = borrowed.0.clone();
                    cdr = borrowed.1.clone();
                }
                out.push(')');
            }
            Value::Procedure(_) | Value::NativeProcedure(_) => {
                runtime_err!("procedures have no printed representation")
            }
        }
        Ok(())
    }

    /// True for chains that end in `()`. Circular chains are not lists.
    pub fn is_list(&self) -> bool {
        let mut slow = self.clone();
        let mut fast = self.clone();
        loop {
            for _ in 0..2 {
                fast = match fast.cdr() {
                    Some(next) => next,
                    None => return fast.is_null(),
                };
            }
            slow = match slow.cdr() {
                Some(next) => next,
                None => return slow.is_null(),
            };
            if slow.is_pair() && slow == fast {
                return false;
            }
        }
    }

    simple_type!(is_symbol, Value::Symbol(..));
    simple_type!(is_boolean, Value::Boolean(..));
    simple_type!(is_null, Value::EmptyList);
    simple_type!(is_pair, Value::Pair(..));
    simple_type!(is_number, Value::Integer(_));

    pub fn pair(&self) -> Option<GcShared<Pair<Value>>> {
        match *self {
            Value::Pair(ref pair) => Some(pair.clone()),
            _ => None,
        }
    }

    pub fn car(&self) -> Option<Value> {
        self.pair().map(|pair| {
            let car = pair.borrow().0.clone();
            car
        })
    }

    pub fn cdr(&self) -> Option<Value> {
        self.pair().map(|pair| {
            let cdr = pair.borrow().1.clone();
            cdr
        })
    }

    /// Flattens a pair chain into its elements. A dotted tail becomes the
    /// last element; `()` yields nothing and any other atom yields itself.
    pub fn to_vec(&self) -> Vec<Value> {
        let mut values = vec![];
        let mut current = self.clone();
        loop {
            current = match current {
                Value::EmptyList => break,
                Value::Pair(ref pair) => {
                    let borrowed = pair.borrow();
                    values.push(borrowed.0.clone());
                    borrowed.1.clone()
                }
                atom => {
                    values.push(atom);
                    break;
                }
            }
        }
        values
    }
}

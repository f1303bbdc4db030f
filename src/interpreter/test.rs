use super::Interpreter;
use crate::error::{Error, ErrorKind};

use crate::error::ErrorKind::*;

// Evaluates every line in one interpreter; all but the last must succeed
fn run(lines: &[&str]) -> Result<String, ErrorKind> {
    let interpreter = Interpreter::new();
    let (last, setup) = lines.split_last().expect("at least one line");
    for line in setup {
        interpreter
            .evaluate(line)
            .unwrap_or_else(|e| panic!("`{}` failed: {}", line, e));
    }
    interpreter.evaluate(last).map_err(|e: Error| e.kind())
}

macro_rules! with_std {
    ($($code:expr),+) => (run(&[$($code),+]))
}

macro_rules! ok {
    ($s:expr) => (Ok($s.to_owned()))
}

#[test]
fn atoms() {
    assert_eq![with_std!["42"], ok!["42"]];
    assert_eq![with_std!["-7"], ok!["-7"]];
    assert_eq![with_std!["#t"], ok!["#t"]];
    assert_eq![with_std!["#f"], ok!["#f"]];
    assert_eq![with_std!["'foo"], ok!["foo"]];
}

#[test]
fn quoted_pair_round_trips() {
    assert_eq![with_std!["'(1 . 2)"], ok!["(1 . 2)"]];
    assert_eq![with_std!["'(() 1)"], ok!["(() 1)"]];
    assert_eq![with_std!["(quote (a b))"], ok!["(a b)"]];
}

#[test]
fn if_arity() {
    assert_eq![with_std!["(if)"], Err(Syntax)];
    assert_eq![with_std!["(if 1)"], Err(Syntax)];
    assert_eq![with_std!["(if 1 2 3 4)"], Err(Syntax)];
}

#[test]
fn if_branches() {
    assert_eq![with_std!["(if #t 1 2)"], ok!["1"]];
    assert_eq![with_std!["(if #f 1 2)"], ok!["2"]];
    assert_eq![with_std!["(if #f 1)"], ok!["()"]];
    assert_eq![with_std!["(if (< 1 2) 'yes 'no)"], ok!["yes"]];
}

#[test]
fn if_only_evaluates_taken_branch() {
    assert_eq![with_std!["(if #t 1 undefined)"], ok!["1"]];
    assert_eq![with_std!["(if #f undefined 2)"], ok!["2"]];
}

#[test]
fn if_requires_boolean_condition() {
    assert_eq![with_std!["(if 1 2 3)"], Err(Runtime)];
}

#[test]
fn arithmetic_identities() {
    assert_eq![with_std!["(+)"], ok!["0"]];
    assert_eq![with_std!["(*)"], ok!["1"]];
    assert_eq![with_std!["(- 5)"], ok!["-5"]];
    assert_eq![with_std!["(+ 1 2 3)"], ok!["6"]];
}

#[test]
fn arithmetic() {
    assert_eq![with_std!["(- 10 1 2)"], ok!["7"]];
    assert_eq![with_std!["(* 2 3 4)"], ok!["24"]];
    assert_eq![with_std!["(/ 7 2)"], ok!["3"]];
    assert_eq![with_std!["(/ 5)"], ok!["5"]];
    assert_eq![with_std!["(/ 0)"], ok!["0"]];
    assert_eq![with_std!["(/ 20 2 5)"], ok!["2"]];
    assert_eq![with_std!["(+ (* 2 3) (- 4 1))"], ok!["9"]];
}

#[test]
fn arithmetic_errors() {
    assert_eq![with_std!["(-)"], Err(Runtime)];
    assert_eq![with_std!["(/)"], Err(Runtime)];
    assert_eq![with_std!["(/ 1 0)"], Err(Runtime)];
    assert_eq![with_std!["(+ 1 'a)"], Err(Runtime)];
    assert_eq![with_std!["(* #t 2)"], Err(Runtime)];
}

#[test]
fn arithmetic_wraps() {
    assert_eq![
        with_std!["(+ 9223372036854775807 1)"],
        ok!["-9223372036854775808"]
    ];
    assert_eq![
        with_std!["(- -9223372036854775807 2)"],
        ok!["9223372036854775807"]
    ];
}

#[test]
fn max_min_abs() {
    assert_eq![with_std!["(max 1 5 3)"], ok!["5"]];
    assert_eq![with_std!["(min 4 -2 3)"], ok!["-2"]];
    assert_eq![with_std!["(max 8)"], ok!["8"]];
    assert_eq![with_std!["(abs -4)"], ok!["4"]];
    assert_eq![with_std!["(abs 4)"], ok!["4"]];
    assert_eq![with_std!["(max)"], Err(Runtime)];
    assert_eq![with_std!["(abs 1 2)"], Err(Runtime)];
    assert_eq![with_std!["(min 1 'a)"], Err(Runtime)];
}

#[test]
fn comparisons() {
    assert_eq![with_std!["(< 1 2 3)"], ok!["#t"]];
    assert_eq![with_std!["(< 1 3 2)"], ok!["#f"]];
    assert_eq![with_std!["(> 3 2 1)"], ok!["#t"]];
    assert_eq![with_std!["(= 2 2 2)"], ok!["#t"]];
    assert_eq![with_std!["(= 2 2 3)"], ok!["#f"]];
    assert_eq![with_std!["(<= 1 1 2)"], ok!["#t"]];
    assert_eq![with_std!["(>= 2 3)"], ok!["#f"]];
    assert_eq![with_std!["(<)"], ok!["#t"]];
    assert_eq![with_std!["(= 1)"], ok!["#t"]];
    assert_eq![with_std!["(< 1 'a)"], Err(Runtime)];
}

#[test]
fn comparison_short_circuits() {
    assert_eq![with_std!["(< 2 1 undefined)"], ok!["#f"]];
    assert_eq![with_std!["(< 1 2 undefined)"], Err(Name)];
}

#[test]
fn and_or() {
    assert_eq![with_std!["(and)"], ok!["#t"]];
    assert_eq![with_std!["(or)"], ok!["#f"]];
    assert_eq![with_std!["(and 1 2)"], ok!["2"]];
    assert_eq![with_std!["(and 1 #f 2)"], ok!["#f"]];
    assert_eq![with_std!["(or #f 3)"], ok!["3"]];
    assert_eq![with_std!["(or #f #f)"], ok!["#f"]];
}

#[test]
fn and_or_short_circuit() {
    assert_eq![with_std!["(and #f undefined)"], ok!["#f"]];
    assert_eq![with_std!["(or 1 undefined)"], ok!["1"]];
    assert_eq![with_std!["(and #t undefined)"], Err(Name)];
}

#[test]
fn not_looks_at_operand_as_written() {
    assert_eq![with_std!["(not #f)"], ok!["#t"]];
    assert_eq![with_std!["(not #t)"], ok!["#f"]];
    assert_eq![with_std!["(not 1)"], ok!["#f"]];
    assert_eq![with_std!["(define x #f)", "(not x)"], ok!["#f"]];
    assert_eq![with_std!["(not (= 1 2))"], ok!["#f"]];
    assert_eq![with_std!["(not)"], Err(Runtime)];
}

#[test]
fn list_does_not_evaluate_operands() {
    assert_eq![with_std!["(list)"], ok!["()"]];
    assert_eq![with_std!["(list 1 2 3)"], ok!["(1 2 3)"]];
    assert_eq![with_std!["(list (+ 1 2))"], ok!["((+ 1 2))"]];
    assert_eq![with_std!["(list undefined)"], ok!["(undefined)"]];
}

#[test]
fn predicates() {
    assert_eq![with_std!["(number? 1)"], ok!["#t"]];
    assert_eq![with_std!["(number? 'a)"], ok!["#f"]];
    assert_eq![with_std!["(boolean? #f)"], ok!["#t"]];
    assert_eq![with_std!["(boolean? '())"], ok!["#f"]];
    assert_eq![with_std!["(symbol? 'a)"], ok!["#t"]];
    assert_eq![with_std!["(symbol? 1)"], ok!["#f"]];
    assert_eq![with_std!["(pair? '(1))"], ok!["#t"]];
    assert_eq![with_std!["(pair? '())"], ok!["#f"]];
    assert_eq![with_std!["(null? '())"], ok!["#t"]];
    assert_eq![with_std!["(null? '(1))"], ok!["#f"]];
    assert_eq![with_std!["(list? '(1 2))"], ok!["#t"]];
    assert_eq![with_std!["(list? '())"], ok!["#t"]];
    assert_eq![with_std!["(list? '(1 . 2))"], ok!["#f"]];
    assert_eq![with_std!["(number?)"], Err(Runtime)];
}

#[test]
fn list_predicate_terminates_on_cycles() {
    assert_eq![
        with_std!["(define l (list 1 2))", "(set-cdr! (cdr l) l)", "(list? l)"],
        ok!["#f"]
    ];
}

#[test]
fn type_errors_on_circular_lists() {
    let setup = ["(define l (list 1 2))", "(set-cdr! (cdr l) l)"];
    for &form in ["(+ 1 l)", "(abs l)", "(if l 1 2)", "(list-ref l l)", "(l 1)"].iter() {
        assert_eq![with_std![setup[0], setup[1], form], Err(Runtime)];
    }
    assert_eq![with_std![setup[0], setup[1], "(car l)"], ok!["1"]];
}

#[test]
fn car_cdr_cons() {
    assert_eq![with_std!["(car (cons 1 2))"], ok!["1"]];
    assert_eq![with_std!["(cdr (cons 1 2))"], ok!["2"]];
    assert_eq![with_std!["(cons 1 '(2 3))"], ok!["(1 2 3)"]];
    assert_eq![with_std!["(cons 1 2)"], ok!["(1 . 2)"]];
    assert_eq![with_std!["(car 1)"], Err(Runtime)];
    assert_eq![with_std!["(cdr '())"], Err(Runtime)];
    assert_eq![with_std!["(cons 1)"], Err(Runtime)];
}

#[test]
fn list_ref() {
    assert_eq![with_std!["(list-ref (list 10 20 30) 1)"], ok!["20"]];
    assert_eq![with_std!["(list-ref (list 10 20 30) 0)"], ok!["10"]];
    assert_eq![with_std!["(list-ref (list 10 20 30) 3)"], Err(Runtime)];
    assert_eq![with_std!["(list-ref (list 10 20 30) -1)"], Err(Runtime)];
    assert_eq![with_std!["(list-ref 5 0)"], Err(Runtime)];
    assert_eq![with_std!["(list-ref '(1 2 . 3) 2)"], ok!["3"]];
}

#[test]
fn list_tail() {
    assert_eq![with_std!["(list-tail (list 10 20 30) 3)"], ok!["()"]];
    assert_eq![with_std!["(list-tail (list 10 20 30) 1)"], ok!["(20 30)"]];
    assert_eq![with_std!["(list-tail (list 10 20 30) 0)"], ok!["(10 20 30)"]];
    assert_eq![with_std!["(list-tail (list 10 20 30) 4)"], Err(Runtime)];
    assert_eq![with_std!["(list-tail (list 10 20 30) 'a)"], Err(Runtime)];
}

#[test]
fn list_tail_shares_structure() {
    assert_eq![
        with_std![
            "(define l (list 1 2 3))",
            "(set-car! (list-tail l 1) 9)",
            "l"
        ],
        ok!["(1 9 3)"]
    ];
}

#[test]
fn define_returns_symbol() {
    assert_eq![with_std!["(define x 1)"], ok!["x"]];
    assert_eq![with_std!["(define x 1)", "x"], ok!["1"]];
    assert_eq![with_std!["(define x 1)", "(define x 2)", "x"], ok!["2"]];
}

#[test]
fn define_procedure() {
    assert_eq![with_std!["(define (add a b) (+ a b))"], ok!["add"]];
    assert_eq![with_std!["(define (add a b) (+ a b))", "(add 2 3)"], ok!["5"]];
    assert_eq![with_std!["(define (one) 1)", "(one)"], ok!["1"]];
}

#[test]
fn define_errors() {
    assert_eq![with_std!["(define)"], Err(Syntax)];
    assert_eq![with_std!["(define x)"], Err(Syntax)];
    assert_eq![with_std!["(define x 1 2)"], Err(Syntax)];
    assert_eq![with_std!["(define 1 2)"], Err(Syntax)];
    assert_eq![with_std!["(define (f))"], Err(Runtime)];
    assert_eq![with_std!["(define (f . x) 1)"], Err(Syntax)];
    assert_eq![with_std!["(define (1 x) 1)"], Err(Syntax)];
    assert_eq![with_std!["(define (f 1) 1)"], Err(Syntax)];
}

#[test]
fn lambda_shadowing_does_not_leak() {
    assert_eq![with_std!["(define x 1)", "((lambda (x) x) 2)"], ok!["2"]];
    assert_eq![with_std!["(define x 1)", "((lambda (x) x) 2)", "x"], ok!["1"]];
}

#[test]
fn lambda_body_runs_in_order() {
    assert_eq![with_std!["((lambda (x) 1 2 x) 3)"], ok!["3"]];
    assert_eq![with_std!["((lambda () (define y 4) y))"], ok!["4"]];
    assert_eq![with_std!["((lambda () (define y 4) y))", "y"], Err(Name)];
}

#[test]
fn lambda_errors() {
    assert_eq![with_std!["(lambda)"], Err(Syntax)];
    assert_eq![with_std!["(lambda (x))"], Err(Syntax)];
    assert_eq![with_std!["(lambda (1) 1)"], Err(Syntax)];
    assert_eq![with_std!["(lambda x x)"], Err(Syntax)];
    assert_eq![with_std!["((lambda (x) x))"], Err(Runtime)];
    assert_eq![with_std!["((lambda (x) x) 1 2)"], Err(Runtime)];
}

#[test]
fn operands_evaluate_in_caller_environment() {
    assert_eq![
        with_std![
            "(define y 10)",
            "(define f (lambda (y) (lambda (x) (+ x y))))",
            "(define g (f 1))",
            "(g y)"
        ],
        ok!["11"]
    ];
}

#[test]
fn recursive_closure() {
    assert_eq![
        with_std![
            "(define f (lambda (n acc) (if (= n 0) acc (f (- n 1) (+ acc 1)))))",
            "(f 5 0)"
        ],
        ok!["5"]
    ];
}

#[test]
fn counter_closure() {
    assert_eq![
        with_std![
            "(define make-counter (lambda () (define n 0) (lambda () (set! n (+ n 1)) n)))",
            "(define c (make-counter))",
            "(c)",
            "(c)"
        ],
        ok!["2"]
    ];
}

#[test]
fn set_returns_new_value() {
    assert_eq![with_std!["(define y 1)", "(set! y 5)"], ok!["5"]];
    assert_eq![with_std!["(define y 1)", "(set! y 5)", "y"], ok!["5"]];
}

#[test]
fn set_errors() {
    assert_eq![with_std!["(set! y 1)"], Err(Name)];
    assert_eq![with_std!["(set! 1 2)"], Err(Runtime)];
    assert_eq![with_std!["(set! y)"], Err(Syntax)];
}

#[test]
fn set_car_is_visible() {
    assert_eq![
        with_std!["(define p (cons 1 2))", "(set-car! p 99)", "(car p)"],
        ok!["99"]
    ];
    assert_eq![with_std!["(define p (cons 1 2))", "(set-car! p 99)"], ok!["()"]];
    assert_eq![
        with_std!["(define p (cons 1 2))", "(define q p)", "(set-cdr! q 3)", "p"],
        ok!["(1 . 3)"]
    ];
    assert_eq![with_std!["(set-cdr! 1 2)"], Err(Runtime)];
}

#[test]
fn name_errors() {
    assert_eq![with_std!["foo"], Err(Name)];
    assert_eq![with_std!["(foo 1)"], Err(Name)];
}

#[test]
fn name_error_reports_depth() {
    let interpreter = Interpreter::new();
    let err = interpreter
        .evaluate("((lambda () undefined))")
        .expect_err("unbound");
    assert_eq!(err.kind(), Name);
    assert!(err.message().contains("scope depth 1"));
}

#[test]
fn runtime_errors() {
    assert_eq![with_std!["(1 2)"], Err(Runtime)];
    assert_eq![with_std!["('a 2)"], Err(Runtime)];
    assert_eq![with_std!["'()"], ok!["()"]];
    assert_eq![with_std!["()"], Err(Runtime)];
    assert_eq![with_std!["car"], Err(Runtime)];
    assert_eq![with_std!["(lambda (x) x)"], Err(Runtime)];
}

#[test]
fn syntax_errors() {
    assert_eq![with_std![""], Err(Syntax)];
    assert_eq![with_std!["1 2"], Err(Syntax)];
    assert_eq![with_std!["(+ 1 2"], Err(Syntax)];
    assert_eq![with_std!["(+ 1 @)"], Err(Syntax)];
    assert_eq![with_std!["#true"], Err(Syntax)];
    assert_eq![with_std![")"], Err(Syntax)];
}

#[test]
fn dotted_operand_is_passed_along() {
    assert_eq![with_std!["(+ 1 . 2)"], ok!["3"]];
}

#[test]
fn side_effects_survive_errors() {
    assert_eq![
        with_std!["(define z 1)", "(+ (set! z 5) undefined)"],
        Err(Name)
    ];

    let interpreter = Interpreter::new();
    interpreter.evaluate("(define z 1)").expect("define");
    assert!(interpreter.evaluate("(+ (set! z 5) undefined)").is_err());
    assert_eq!(interpreter.evaluate("z"), Ok("5".to_owned()));
}

#[test]
fn evaluate_all_runs_forms_in_order() {
    let interpreter = Interpreter::new();
    let mut results = vec![];
    interpreter
        .evaluate_all("(define x 2) (* x 3) undefined (+ x 1)", |result| {
            let keep_going = result.is_ok();
            results.push(result.map_err(|e: Error| e.kind()));
            keep_going
        })
        .expect("readable source");

    assert_eq!(results, vec![ok!["x"], ok!["6"], Err(Name)]);
}

#[test]
fn evaluate_all_stops_at_read_errors() {
    let interpreter = Interpreter::new();
    let mut count = 0;
    let result = interpreter.evaluate_all("(define x 2) (x", |_| {
        count += 1;
        true
    });

    assert_eq!(result.map_err(|e| e.kind()), Err(Syntax));
    assert_eq!(count, 1);
    assert_eq!(interpreter.evaluate("x"), Ok("2".to_owned()));
}

extern crate env_logger;
#[macro_use]
extern crate log;
extern crate minischeme;
extern crate rustyline;

use minischeme::Interpreter;
use rustyline::error::ReadlineError;
use std::env::args;
use std::fs;
use std::process;

fn main() {
    env_logger::init();

    match args().nth(1) {
        Some(file) => run_file(&file),
        None => run_repl(),
    }
}

fn run_file(file_path: &str) {
    let source = match fs::read_to_string(file_path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Unable to read {}: {}", file_path, e);
            process::exit(1);
        }
    };
    let interpreter = Interpreter::new();
    let mut failed = false;

    let result = interpreter.evaluate_all(&source, |result| match result {
        Ok(output) => {
            println!("{}", output);
            true
        }
        Err(e) => {
            println!("Error: {}", e);
            failed = true;
            false
        }
    });

    if let Err(e) = result {
        println!("Error: {}", e);
        failed = true;
    }
    if failed {
        process::exit(1);
    }
}

fn run_repl() {
    let mut rl = match rustyline::Editor::<()>::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Unable to start the line editor: {}", e);
            process::exit(1);
        }
    };
    let interpreter = Interpreter::new();

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => continue,
            Err(e) => {
                error!("readline: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        rl.add_history_entry(line.as_str());

        match interpreter.evaluate(&line) {
            Ok(output) => println!("{}", output),
            Err(e) => println!("Error: {}", e),
        }
    }
}

#![allow(clippy::needless_return)]

//! rlox is an interpreter for the Lox programming language written in Rust. Lox is a dynamically
//! typed language with lexical scoping, first-class functions and classes with single
//! inheritance. rlox is a tree-walk interpreter with a hand-written recursive descent parser,
//! following the [Crafting Interpreters](https://craftinginterpreters.com/) book by Bob Nystrom.
//!
//! ## Scanning
//! The first step in the interpreter is scanning. Scanning is the process of converting a string of
//! characters into a list of tokens. A token is a single unit of the language. For example, the
//! string `1 + 2` would be converted into the following tokens:
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`](scanner) module as a single pass over the
//! characters of the source code with one character of lookahead (two for the fractional part of
//! a number).
//!
//! The scanner reports syntax errors in the source code as a [`ScanError`](error::ScanError).
//! These errors are trivial problems like an unterminated string literal or an unexpected
//! character. Scan errors are reported as soon as they are encountered and the scanner keeps
//! going, so the user can fix multiple syntax errors at once.
//!
//! ## Parsing
//! The second step in the interpreter is parsing. Parsing is the process of converting a list of
//! tokens into an abstract syntax tree (AST). The parser is implemented in the [`parser`](parser)
//! module as a recursive descent parser. The parser transforms the list of tokens into expressions
//! and statements. [`Expressions`](expr::Expr) are pieces of code that produce a value,
//! specifically an [`Object`](object::Object). Objects are an umbrella term for all types of
//! values in Lox including literals, functions, classes and instances. [`Statements`](stmt::Stmt)
//! are pieces of code that do not produce a value but instead perform some action, like declaring
//! a variable or printing.
//!
//! The parser reports syntax errors in the source code as a [`ParseError`](error::ParseError).
//! Unlike the scanner, the parser catches errors that span multiple tokens, such as a missing
//! operand or an unclosed block. Much like the scanner though, the parser continues parsing after
//! an error using a technique called synchronization: it discards tokens until the next statement
//! boundary and picks up from there.
//!
//! ## Resolving
//! The third step in the interpreter is resolving. Resolving is the process of statically
//! analyzing the AST to determine the scope of each variable. While this requires a pre-pass of
//! the AST, it is necessary to construct robust lexical scoping in the presence of closures. The
//! resolver is implemented in the [`resolver`](resolver) module and records, for every variable
//! reference, how many environments away its binding lives. It also catches code that is
//! syntactically valid but semantically wrong, reported as a
//! [`ResolveError`](error::ResolveError). For example, the following is valid syntax but invalid
//! Lox because `a` is declared twice in the same scope:
//! ```text
//! {
//!    var a = 1;
//!    var a = 2;
//! }
//! ```
//!
//! ## Interpreting
//! The final step is _interpreting_. The interpreter is implemented in the
//! [`interpreter`](interpreter) module as a tree-walk over the statements. Most errors can only
//! be caught at this point, reported as a [`RuntimeError`](error::RuntimeError). For example, the
//! following is valid Lox syntax but fails at runtime because it adds a string and a number:
//! ```text
//! var a = "123";
//! var b = a + 123;
//! ```
//! The interpreter also manages the environments. An environment is a mapping of variable names
//! to their values, and environments chain up to the global scope, which gives the language its
//! lexical scoping. Functions capture the environment they were declared in, and method calls
//! bind `this` by wrapping that closure in one more scope.

use std::io::Write;
use std::{fs, process};

use log::debug;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod error;
pub mod token;
pub mod scanner;
pub mod expr;
pub mod stmt;
pub mod environment;
pub mod parser;
pub mod ast;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod function;
pub mod resolver;
pub mod class;

use ast::ASTPrinter;
use error::Throw;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// The top-level interpreter handle. All program output is written to the
/// sink given at construction, so embedders and tests can capture it.
#[allow(non_camel_case_types)]
pub struct rlox<'a> {
    interpreter: Interpreter<'a>,
}

impl<'a> rlox<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        rlox {
            interpreter: Interpreter::new(output),
        }
    }

    /// Runs the script at the given path.
    /// Exits the process with 65 after a static error and 70 after a runtime error.
    pub fn run_file(&mut self, path: String) {
        let contents = fs::read_to_string(path)
            .expect("Should have been able to read the file");

        self.run(&contents);

        if error::did_static_error() {
            process::exit(65);
        }
        if error::did_runtime_error() {
            process::exit(70);
        }
    }

    /// Runs an interactive prompt until EOF or an interrupt.
    /// Each line is a program of its own; the error flags are reset between
    /// lines and expression statements print their value.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("line editor to initialize");

        let history = home::home_dir().map(|dir| dir.join(".rlox_history"));
        if let Some(path) = &history {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(&line);

                    self.execute(&line, true);
                    error::reset_error();
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("readline error: {error}");
                    break;
                },
            }
        }

        if let Some(path) = &history {
            let _ = editor.save_history(path);
        }
    }

    /// Runs a program in script mode.
    pub fn run(&mut self, source: &str) {
        self.execute(source, false);
    }

    fn execute(&mut self, source: &str, repl: bool) {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();
        debug!("scanned {} tokens", tokens.len());

        if error::did_error() {
            return;
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();
        debug!("parsed {} statements", statements.len());

        if error::did_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter);
        resolver.resolve(&statements);
        debug!("resolution complete");

        if error::did_error() {
            return;
        }

        self.interpreter.interpret(&statements, repl);
    }

    /// Scans a program and prints one token per line, the EOF token included.
    /// Tokens print even when lexical errors occurred, so the caller must
    /// still check the error flags.
    pub fn tokenize(&mut self, source: &str) {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();

        for token in &tokens {
            let line = token.to_string();
            self.interpreter.println(&line);
        }
    }

    /// Parses a program and prints each statement as an s-expression.
    pub fn parse(&mut self, source: &str) {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();

        if error::did_error() {
            return;
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();

        if error::did_error() {
            return;
        }

        let mut printer = ASTPrinter;
        for statement in &statements {
            let line = printer.print_stmt(statement);
            self.interpreter.println(&line);
        }
    }

    /// Evaluates a single expression and prints the resulting value.
    pub fn evaluate(&mut self, source: &str) {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();

        if error::did_error() {
            return;
        }

        let mut parser = Parser::new(tokens);
        let Some(expr) = parser.parse_expression() else {
            return;
        };

        match self.interpreter.evaluate(&expr) {
            Ok(value) => {
                let line = value.to_string();
                self.interpreter.println(&line);
            },
            Err(error) => error.throw(),
        }
    }
}

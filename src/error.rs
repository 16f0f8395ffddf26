use crate::object::Object;
use crate::token::{Token, Type};

static mut HAD_ERROR: bool = false;
static mut HAD_RUNTIME_ERROR: bool = false;

/// Checks if an error occurred during scanning, parsing, resolving or interpreting.
pub fn did_error() -> bool {
    unsafe { HAD_ERROR || HAD_RUNTIME_ERROR }
}

/// Checks if a static (scan, parse or resolve) error occurred.
pub fn did_static_error() -> bool {
    unsafe { HAD_ERROR }
}

/// Checks if an error occurred during runtime.
pub fn did_runtime_error() -> bool {
    unsafe { HAD_RUNTIME_ERROR }
}

/// Resets the error flags.
/// This is used to reset the interpreter after an error occurs when running prompts.
pub fn reset_error() {
    unsafe {
        HAD_ERROR = false;
        HAD_RUNTIME_ERROR = false;
    }
}

/// Every error type must implement this trait.
pub trait Throw {
    /// Prints the error message and sets the error flag.
    fn throw(&self);
}

/// Represents an error that occurs during scanning.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl Throw for ScanError {
    fn throw(&self) {
        eprintln!("[line {line}] Error: {message}", line = self.line, message = self.message);

        unsafe {
            HAD_ERROR = true;
        }
    }
}

/// Represents an error that occurs during parsing.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Throw for ParseError {
    fn throw(&self) {
        if self.token.r#type == Type::EOF {
            eprintln!(
                "[line {line}] Error at end: {message}",
                line = self.token.line,
                message = self.message
            );
        } else {
            eprintln!(
                "[line {line}] Error at '{lexeme}': {message}",
                line = self.token.line,
                lexeme = self.token.lexeme,
                message = self.message
            );
        }

        unsafe {
            HAD_ERROR = true;
        }
    }
}

/// Represents an error that occurs during resolution.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Throw for ResolveError {
    fn throw(&self) {
        eprintln!(
            "[line {line}] Error at '{lexeme}': {message}",
            line = self.token.line,
            lexeme = self.token.lexeme,
            message = self.message
        );

        unsafe {
            HAD_ERROR = true;
        }
    }
}

/// Represents an error that occurs during runtime.
/// The token is the operator or name that failed, so the report can carry its line.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Throw for RuntimeError {
    fn throw(&self) {
        eprintln!("{message}\n[line {line}]", message = self.message, line = self.token.line);

        unsafe {
            HAD_RUNTIME_ERROR = true;
        }
    }
}

/// Represents a non-local jump that unwinds the execution stack.
/// A `return` statement travels up the stack the same way a runtime error
/// does, until the enclosing function call catches it and turns it back into
/// a value. The two must never be confused: only `Error` reaches the top of
/// `interpret`.
#[derive(Debug)]
pub enum Unwind {
    Error(RuntimeError),
    Return(Object),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

use std::io;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure that aborts a run. Each pipeline stage contributes one variant.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("[line {line}] LexError: {message}")]
pub struct LexError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("[line {line}] ParseError: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("[line {line}] NameError: undefined variable '{name}'")]
    NameError { name: String, line: usize },
    #[error("[line {line}] ArithmeticError: division by zero")]
    ArithmeticError { line: usize },
    #[error("[line {line}] TypeError: {message}")]
    TypeError { message: String, line: usize },
    #[error("IOError: {0}")]
    Io(#[from] io::Error),
}

impl RuntimeError {
    pub fn line(&self) -> Option<usize> {
        match self {
            RuntimeError::NameError { line, .. }
            | RuntimeError::ArithmeticError { line }
            | RuntimeError::TypeError { line, .. } => Some(*line),
            RuntimeError::Io(_) => None,
        }
    }
}

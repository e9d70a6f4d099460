use std::io;

/// Everything that can go wrong while compiling a class.
///
/// Lexing and translation never stop on these; they are collected as
/// diagnostics next to the best-effort output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("line {line}: unterminated block comment")]
    UnterminatedComment { line: usize },
    #[error("line {line}: unterminated string constant")]
    UnterminatedString { line: usize },
    #[error("line {line}: integer constant {value} is out of range (max 32767)")]
    IntegerOverflow { line: usize, value: u32 },
    #[error("line {line}: expected {expected}, found {found}")]
    Syntax {
        line: usize,
        expected: String,
        found: String,
    },
    #[error("line {line}: `{name}` is not a declared variable")]
    Undeclared { line: usize, name: String },
    #[error("line {line}: unexpected {found} after the end of the class")]
    TrailingInput { line: usize, found: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

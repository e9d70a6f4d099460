pub mod analyzer;
pub mod codegen;
mod error;
pub mod lexer;
pub mod parser;

use codegen::Instruction;
use lexer::{Lexer, Token};
use parser::Parser;

pub use error::{Error, Result};

/// Output of compiling one class.
#[derive(Debug)]
pub struct Compilation {
    /// Name declared after `class`; empty if it could not be parsed.
    pub class_name: String,
    pub instructions: Vec<Instruction>,
    /// Lexical, syntax and resolution errors in source order per phase. When
    /// non-empty the instructions are a best effort.
    pub diagnostics: Vec<Error>,
}

impl Compilation {
    pub fn is_reliable(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// One instruction per line, in emission order.
    pub fn to_vm_text(&self) -> String {
        let mut out = String::new();
        for instruction in &self.instructions {
            out.push_str(&instruction.to_string());
            out.push('\n');
        }
        out
    }
}

/// Compiles the source text of one class.
pub fn compile(user_input: &str) -> Compilation {
    let (tokens, lex_errors) = Lexer::tokenize(user_input);

    let mut compilation = compile_tokens(tokens);
    compilation.diagnostics.splice(0..0, lex_errors);
    compilation
}

/// Compiles an already lexed class.
pub fn compile_tokens(tokens: Vec<Token>) -> Compilation {
    let parser = Parser::new(tokens);
    parser.parse()
}

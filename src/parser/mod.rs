mod expr;
mod parser;
mod stmt;

pub use expr::*;
pub use parser::*;

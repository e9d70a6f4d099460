mod dump;
mod lexer;
mod token;

pub use dump::*;
pub use lexer::*;
pub use token::*;

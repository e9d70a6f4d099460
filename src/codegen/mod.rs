mod codegen;
mod instruction;
mod label;

pub use codegen::*;
pub use instruction::*;
pub use label::*;

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
    Constant,
    Argument,
    Local,
    Static,
    This,
    That,
    Pointer,
    Temp,
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Argument => "argument",
            Segment::Local => "local",
            Segment::Static => "static",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
        }
    }
}

/// Native stack arithmetic and logic commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl ArithmeticOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Sub => "sub",
            ArithmeticOp::Neg => "neg",
            ArithmeticOp::Eq => "eq",
            ArithmeticOp::Gt => "gt",
            ArithmeticOp::Lt => "lt",
            ArithmeticOp::And => "and",
            ArithmeticOp::Or => "or",
            ArithmeticOp::Not => "not",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    Push(Segment, u16),
    Pop(Segment, u16),
    Arithmetic(ArithmeticOp),
    Label(String),
    Goto(String),
    IfGoto(String),
    Function(String, u16),
    Call(String, u16),
    Return,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Push(segment, index) => write!(f, "push {} {}", segment.as_str(), index),
            Instruction::Pop(segment, index) => write!(f, "pop {} {}", segment.as_str(), index),
            Instruction::Arithmetic(op) => f.write_str(op.as_str()),
            Instruction::Label(label) => write!(f, "label {}", label),
            Instruction::Goto(label) => write!(f, "goto {}", label),
            Instruction::IfGoto(label) => write!(f, "if-goto {}", label),
            Instruction::Function(name, n_locals) => write!(f, "function {} {}", name, n_locals),
            Instruction::Call(name, n_args) => write!(f, "call {} {}", name, n_args),
            Instruction::Return => f.write_str("return"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_line_per_instruction() {
        let rendered: Vec<_> = [
            Instruction::Function("Main.main".to_string(), 2),
            Instruction::Push(Segment::Constant, 7),
            Instruction::Pop(Segment::That, 0),
            Instruction::Arithmetic(ArithmeticOp::Neg),
            Instruction::IfGoto("L0".to_string()),
            Instruction::Label("L1".to_string()),
            Instruction::Call("Math.multiply".to_string(), 2),
            Instruction::Return,
        ]
        .iter()
        .map(|i| i.to_string())
        .collect();

        assert_eq!(
            rendered,
            vec![
                "function Main.main 2",
                "push constant 7",
                "pop that 0",
                "neg",
                "if-goto L0",
                "label L1",
                "call Math.multiply 2",
                "return",
            ]
        );
    }
}

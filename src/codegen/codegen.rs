use log::trace;

use crate::parser::{BinOpKind, UnaryOpKind};

use super::{ArithmeticOp, Instruction, LabelAllocator, Segment};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

/// Insertion point of a subroutine header that is not written yet.
///
/// Consumed by [`Codegen::complete_header`], so a header is materialized once.
#[derive(Debug)]
pub struct HeaderSlot {
    at: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub kind: SubroutineKind,
    /// Fully qualified `Class.name`.
    pub name: String,
    pub n_locals: u16,
    /// Words to allocate for a constructor's new object.
    pub n_fields: u16,
}

#[derive(Debug, Default)]
pub struct Codegen {
    instructions: Vec<Instruction>,
    labels: LabelAllocator,
}

impl Codegen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn finish(self) -> Vec<Instruction> {
        self.instructions
    }

    fn emit(&mut self, instruction: Instruction) {
        trace!("  {}", instruction);
        self.instructions.push(instruction);
    }

    pub fn new_label_pair(&mut self) -> (String, String) {
        self.labels.new_pair()
    }

    pub fn push(&mut self, segment: Segment, index: u16) {
        self.emit(Instruction::Push(segment, index));
    }

    pub fn pop(&mut self, segment: Segment, index: u16) {
        self.emit(Instruction::Pop(segment, index));
    }

    pub fn arithmetic(&mut self, op: ArithmeticOp) {
        self.emit(Instruction::Arithmetic(op));
    }

    pub fn label(&mut self, label: &str) {
        self.emit(Instruction::Label(label.to_string()));
    }

    pub fn goto(&mut self, label: &str) {
        self.emit(Instruction::Goto(label.to_string()));
    }

    pub fn if_goto(&mut self, label: &str) {
        self.emit(Instruction::IfGoto(label.to_string()));
    }

    pub fn call(&mut self, name: &str, n_args: u16) {
        self.emit(Instruction::Call(name.to_string(), n_args));
    }

    pub fn ret(&mut self) {
        self.emit(Instruction::Return);
    }

    /// `*` and `/` have no VM opcode and go through the OS math library.
    pub fn bin_op(&mut self, kind: BinOpKind) {
        match kind {
            BinOpKind::Add => self.arithmetic(ArithmeticOp::Add),
            BinOpKind::Sub => self.arithmetic(ArithmeticOp::Sub),
            BinOpKind::Mul => self.call("Math.multiply", 2),
            BinOpKind::Div => self.call("Math.divide", 2),
            BinOpKind::BitwiseAnd => self.arithmetic(ArithmeticOp::And),
            BinOpKind::BitwiseOr => self.arithmetic(ArithmeticOp::Or),
            BinOpKind::LessThan => self.arithmetic(ArithmeticOp::Lt),
            BinOpKind::GreaterThan => self.arithmetic(ArithmeticOp::Gt),
            BinOpKind::Equal => self.arithmetic(ArithmeticOp::Eq),
        }
    }

    pub fn unary_op(&mut self, kind: UnaryOpKind) {
        match kind {
            UnaryOpKind::Neg => self.arithmetic(ArithmeticOp::Neg),
            UnaryOpKind::Not => self.arithmetic(ArithmeticOp::Not),
        }
    }

    pub fn int_const(&mut self, value: u16) {
        self.push(Segment::Constant, value);
    }

    /// True is all bits set, i.e. -1.
    pub fn bool_const(&mut self, value: bool) {
        if value {
            self.push(Segment::Constant, 1);
            self.arithmetic(ArithmeticOp::Neg);
        } else {
            self.push(Segment::Constant, 0);
        }
    }

    pub fn null_const(&mut self) {
        self.push(Segment::Constant, 0);
    }

    pub fn string_const(&mut self, s: &str) {
        let len = u16::try_from(s.chars().count()).unwrap_or(u16::MAX);
        self.push(Segment::Constant, len);
        self.call("String.new", 1);
        for c in s.chars() {
            let code = u16::try_from(u32::from(c)).unwrap_or(u16::MAX);
            self.push(Segment::Constant, code);
            self.call("String.appendChar", 2);
        }
    }

    pub fn reserve_header(&mut self) -> HeaderSlot {
        HeaderSlot {
            at: self.instructions.len(),
        }
    }

    /// Writes the `function` line and the calling-convention prologue at the
    /// reserved slot, ahead of the body emitted since.
    pub fn complete_header(&mut self, slot: HeaderSlot, header: Header) {
        let mut prologue = vec![Instruction::Function(header.name, header.n_locals)];
        match header.kind {
            SubroutineKind::Constructor => {
                prologue.push(Instruction::Push(Segment::Constant, header.n_fields));
                prologue.push(Instruction::Call("Memory.alloc".to_string(), 1));
                prologue.push(Instruction::Pop(Segment::Pointer, 0));
            }
            SubroutineKind::Method => {
                prologue.push(Instruction::Push(Segment::Argument, 0));
                prologue.push(Instruction::Pop(Segment::Pointer, 0));
            }
            SubroutineKind::Function => (),
        }

        trace!("header at {}: {}", slot.at, prologue[0]);
        self.instructions.splice(slot.at..slot.at, prologue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(codegen: &Codegen) -> Vec<String> {
        codegen.instructions().iter().map(|i| i.to_string()).collect()
    }

    #[test]
    fn header_lands_before_body() {
        let mut codegen = Codegen::new();
        codegen.ret();
        let slot = codegen.reserve_header();
        codegen.push(Segment::Local, 0);
        codegen.ret();
        codegen.complete_header(
            slot,
            Header {
                kind: SubroutineKind::Method,
                name: "Point.getX".to_string(),
                n_locals: 1,
                n_fields: 2,
            },
        );

        assert_eq!(
            lines(&codegen),
            vec![
                "return",
                "function Point.getX 1",
                "push argument 0",
                "pop pointer 0",
                "push local 0",
                "return",
            ]
        );
    }

    #[test]
    fn constructor_allocates_fields() {
        let mut codegen = Codegen::new();
        let slot = codegen.reserve_header();
        codegen.complete_header(
            slot,
            Header {
                kind: SubroutineKind::Constructor,
                name: "Point.new".to_string(),
                n_locals: 0,
                n_fields: 3,
            },
        );

        assert_eq!(
            lines(&codegen),
            vec![
                "function Point.new 0",
                "push constant 3",
                "call Memory.alloc 1",
                "pop pointer 0",
            ]
        );
    }

    #[test]
    fn empty_string() {
        let mut codegen = Codegen::new();
        codegen.string_const("");
        assert_eq!(lines(&codegen), vec!["push constant 0", "call String.new 1"]);
    }

    #[test]
    fn mul_and_div_are_calls() {
        let mut codegen = Codegen::new();
        codegen.bin_op(BinOpKind::Mul);
        codegen.bin_op(BinOpKind::Div);
        codegen.bin_op(BinOpKind::Sub);
        codegen.unary_op(UnaryOpKind::Neg);
        assert_eq!(
            lines(&codegen),
            vec!["call Math.multiply 2", "call Math.divide 2", "sub", "neg"]
        );
    }
}

use crate::{
    codegen::{ArithmeticOp, Segment},
    lexer::{Keyword, Symbol, TokenKind},
};

use super::Parser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    BitwiseAnd,
    BitwiseOr,
    LessThan,
    GreaterThan,
    Equal,
}

impl BinOpKind {
    pub fn from_symbol(symbol: Symbol) -> Option<Self> {
        match symbol {
            Symbol::Plus => Some(BinOpKind::Add),
            Symbol::Minus => Some(BinOpKind::Sub),
            Symbol::Star => Some(BinOpKind::Mul),
            Symbol::Slash => Some(BinOpKind::Div),
            Symbol::Ampersand => Some(BinOpKind::BitwiseAnd),
            Symbol::Pipe => Some(BinOpKind::BitwiseOr),
            Symbol::LessThan => Some(BinOpKind::LessThan),
            Symbol::GreaterThan => Some(BinOpKind::GreaterThan),
            Symbol::Equal => Some(BinOpKind::Equal),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOpKind {
    Neg,
    Not,
}

const MAX_INT_CONST: u32 = 0x7fff;

impl Parser {
    fn peek_bin_op(&self) -> Option<BinOpKind> {
        match self.peek() {
            Some(TokenKind::Symbol(symbol)) => BinOpKind::from_symbol(*symbol),
            _ => None,
        }
    }

    /// expression = term (op term)*
    ///
    /// There is no precedence: operators apply left to right.
    pub(super) fn parse_expression(&mut self) {
        self.parse_term();
        while let Some(kind) = self.peek_bin_op() {
            self.advance();
            self.parse_term();
            self.codegen.bin_op(kind);
        }
    }

    /// term = integerConstant | stringConstant | keywordConstant
    ///      | varName | varName "[" expression "]" | subroutineCall
    ///      | "(" expression ")" | ("-" | "~") term
    fn parse_term(&mut self) {
        let line = self.current_line();
        let Some(kind) = self.peek().cloned() else {
            self.syntax_error("a term");
            return;
        };

        match kind {
            TokenKind::IntConst(value) => {
                self.advance();
                // Out of range constants were already reported by the lexer.
                self.codegen.int_const(value.min(MAX_INT_CONST) as u16);
            }
            TokenKind::StringConst(s) => {
                self.advance();
                self.codegen.string_const(&s);
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                self.codegen.bool_const(true);
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                self.codegen.bool_const(false);
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                self.codegen.null_const();
            }
            TokenKind::Keyword(Keyword::This) => {
                self.advance();
                self.codegen.push(Segment::Pointer, 0);
            }
            TokenKind::Symbol(Symbol::OpenParen) => {
                self.advance();
                self.parse_expression();
                self.expect_symbol(Symbol::CloseParen);
            }
            TokenKind::Symbol(Symbol::Minus) => {
                self.advance();
                self.parse_term();
                self.codegen.unary_op(UnaryOpKind::Neg);
            }
            TokenKind::Symbol(Symbol::Tilde) => {
                self.advance();
                self.parse_term();
                self.codegen.unary_op(UnaryOpKind::Not);
            }
            TokenKind::Ident(name) => {
                self.advance();
                self.parse_ident(name, line);
            }
            _ => self.syntax_error("a term"),
        }
    }

    fn parse_ident(&mut self, name: String, line: usize) {
        if self.consume_symbol(Symbol::OpenSquareBrace) {
            if let Some((segment, index)) = self.resolve_var(&name, line) {
                self.codegen.push(segment, index);
            }
            self.parse_expression();
            self.expect_symbol(Symbol::CloseSquareBrace);
            self.codegen.arithmetic(ArithmeticOp::Add);
            self.codegen.pop(Segment::Pointer, 1);
            self.codegen.push(Segment::That, 0);
        } else if self.at_symbol(Symbol::Dot) || self.at_symbol(Symbol::OpenParen) {
            self.parse_call(name);
        } else if let Some((segment, index)) = self.resolve_var(&name, line) {
            self.codegen.push(segment, index);
        }
    }

    /// subroutineCall = name "(" expressionList ")"
    ///                | (className | varName) "." name "(" expressionList ")"
    ///
    /// `name` has already been consumed.
    pub(super) fn parse_call(&mut self, name: String) {
        let (callee, n_implicit) = if self.consume_symbol(Symbol::Dot) {
            let member = self.expect_ident().unwrap_or_default();
            match self.resolve(&name) {
                // A variable receiver is passed as argument 0 of a method of
                // its declared class.
                Some((segment, index, ty)) => {
                    self.codegen.push(segment, index);
                    (format!("{}.{}", ty, member), 1)
                }
                None => (format!("{}.{}", name, member), 0),
            }
        } else {
            self.codegen.push(Segment::Pointer, 0);
            (format!("{}.{}", self.class_name, name), 1)
        };

        self.expect_symbol(Symbol::OpenParen);
        let n_args = self.parse_expression_list();
        self.expect_symbol(Symbol::CloseParen);
        self.codegen.call(&callee, n_args + n_implicit);
    }

    /// expressionList = (expression ("," expression)*)?
    fn parse_expression_list(&mut self) -> u16 {
        if self.is_eof() || self.at_symbol(Symbol::CloseParen) {
            return 0;
        }

        let mut n_args = 1;
        self.parse_expression();
        while self.consume_symbol(Symbol::Comma) {
            self.parse_expression();
            n_args += 1;
        }
        n_args
    }
}

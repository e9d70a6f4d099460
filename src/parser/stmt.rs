use crate::{
    codegen::{ArithmeticOp, Segment},
    lexer::{Keyword, Symbol, TokenKind},
};

use super::Parser;

impl Parser {
    /// statements = statement*
    ///
    /// Runs up to the closing "}" of the enclosing block, skipping anything
    /// that cannot start a statement.
    pub(super) fn parse_statements(&mut self) {
        while !self.is_eof() && !self.at_symbol(Symbol::CloseCurlyBrace) {
            match self.peek() {
                Some(TokenKind::Keyword(Keyword::Let)) => self.parse_let(),
                Some(TokenKind::Keyword(Keyword::If)) => self.parse_if(),
                Some(TokenKind::Keyword(Keyword::While)) => self.parse_while(),
                Some(TokenKind::Keyword(Keyword::Do)) => self.parse_do(),
                Some(TokenKind::Keyword(Keyword::Return)) => self.parse_return(),
                _ => self.syntax_error("a statement"),
            }
        }
    }

    /// "{" statements "}"
    fn parse_block(&mut self) {
        self.expect_symbol(Symbol::OpenCurlyBrace);
        self.parse_statements();
        self.expect_symbol(Symbol::CloseCurlyBrace);
    }

    /// let = "let" varName ("[" expression "]")? "=" expression ";"
    fn parse_let(&mut self) {
        self.expect_keyword(Keyword::Let);
        let line = self.current_line();
        let target = match self.expect_ident() {
            Some(name) => self.resolve_var(&name, line),
            None => None,
        };

        if self.consume_symbol(Symbol::OpenSquareBrace) {
            if let Some((segment, index)) = target {
                self.codegen.push(segment, index);
            }
            self.parse_expression();
            self.expect_symbol(Symbol::CloseSquareBrace);
            self.codegen.arithmetic(ArithmeticOp::Add);

            self.expect_symbol(Symbol::Equal);
            self.parse_expression();
            // pointer 1 is set only after the right-hand side, which may
            // use `that` itself.
            self.codegen.pop(Segment::Temp, 0);
            self.codegen.pop(Segment::Pointer, 1);
            self.codegen.push(Segment::Temp, 0);
            self.codegen.pop(Segment::That, 0);
        } else {
            self.expect_symbol(Symbol::Equal);
            self.parse_expression();
            if let Some((segment, index)) = target {
                self.codegen.pop(segment, index);
            }
        }

        self.expect_symbol(Symbol::SemiColon);
    }

    /// if = "if" "(" expression ")" "{" statements "}" ("else" "{" statements "}")?
    fn parse_if(&mut self) {
        let (else_label, end_label) = self.codegen.new_label_pair();

        self.expect_keyword(Keyword::If);
        self.expect_symbol(Symbol::OpenParen);
        self.parse_expression();
        self.expect_symbol(Symbol::CloseParen);
        self.codegen.arithmetic(ArithmeticOp::Not);
        self.codegen.if_goto(&else_label);

        self.parse_block();
        self.codegen.goto(&end_label);

        self.codegen.label(&else_label);
        if self.consume_keyword(Keyword::Else) {
            self.parse_block();
        }
        self.codegen.label(&end_label);
    }

    /// while = "while" "(" expression ")" "{" statements "}"
    fn parse_while(&mut self) {
        let (begin_label, end_label) = self.codegen.new_label_pair();

        self.expect_keyword(Keyword::While);
        self.codegen.label(&begin_label);
        self.expect_symbol(Symbol::OpenParen);
        self.parse_expression();
        self.expect_symbol(Symbol::CloseParen);
        self.codegen.arithmetic(ArithmeticOp::Not);
        self.codegen.if_goto(&end_label);

        self.parse_block();
        self.codegen.goto(&begin_label);
        self.codegen.label(&end_label);
    }

    /// do = "do" subroutineCall ";"
    fn parse_do(&mut self) {
        self.expect_keyword(Keyword::Do);
        if let Some(name) = self.expect_ident() {
            self.parse_call(name);
        }
        // Every call leaves a value behind.
        self.codegen.pop(Segment::Temp, 0);
        self.expect_symbol(Symbol::SemiColon);
    }

    /// return = "return" expression? ";"
    fn parse_return(&mut self) {
        self.expect_keyword(Keyword::Return);
        if self.at_symbol(Symbol::SemiColon) {
            self.codegen.int_const(0);
        } else {
            self.parse_expression();
        }
        self.codegen.ret();
        self.expect_symbol(Symbol::SemiColon);
    }
}

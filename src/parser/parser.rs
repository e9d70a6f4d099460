use log::{debug, warn};

use crate::{
    analyzer::{DeclContext, Kind, SymbolTable},
    codegen::{Codegen, Header, Segment, SubroutineKind},
    lexer::{Keyword, Symbol, Token, TokenKind},
    Compilation, Error,
};

/// Single-pass translator for one class: parses the token stream and emits VM
/// code as each construct is recognized.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    pub(super) class_name: String,
    pub(super) class_scope: SymbolTable,
    pub(super) subroutine_scope: SymbolTable,
    pub(super) codegen: Codegen,
    errors: Vec<Error>,
}

fn subroutine_kind(kind: &TokenKind) -> Option<SubroutineKind> {
    match kind {
        TokenKind::Keyword(Keyword::Constructor) => Some(SubroutineKind::Constructor),
        TokenKind::Keyword(Keyword::Function) => Some(SubroutineKind::Function),
        TokenKind::Keyword(Keyword::Method) => Some(SubroutineKind::Method),
        _ => None,
    }
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            class_name: String::new(),
            class_scope: SymbolTable::new(),
            subroutine_scope: SymbolTable::new(),
            codegen: Codegen::new(),
            errors: vec![],
        }
    }

    pub fn parse(mut self) -> Compilation {
        self.parse_class();

        Compilation {
            class_name: self.class_name,
            instructions: self.codegen.finish(),
            diagnostics: self.errors,
        }
    }

    pub(super) fn is_eof(&self) -> bool {
        self.index >= self.tokens.len()
    }

    pub(super) fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.index).map(|t| &t.kind)
    }

    pub(super) fn advance(&mut self) {
        self.index += 1;
    }

    pub(super) fn current_line(&self) -> usize {
        self.tokens
            .get(self.index)
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    pub(super) fn at_symbol(&self, symbol: Symbol) -> bool {
        self.peek() == Some(&TokenKind::Symbol(symbol))
    }

    pub(super) fn at_keyword(&self, keyword: Keyword) -> bool {
        self.peek() == Some(&TokenKind::Keyword(keyword))
    }

    fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.peek() != Some(kind) {
            return false;
        }
        self.index += 1;
        true
    }

    pub(super) fn consume_symbol(&mut self, symbol: Symbol) -> bool {
        self.consume(&TokenKind::Symbol(symbol))
    }

    pub(super) fn consume_keyword(&mut self, keyword: Keyword) -> bool {
        self.consume(&TokenKind::Keyword(keyword))
    }

    pub(super) fn report(&mut self, err: Error) {
        warn!("{}: {}", self.class_name, err);
        self.errors.push(err);
    }

    /// Records that the current token is not what the grammar wants here and
    /// steps past it. Nothing is skipped at end of input.
    pub(super) fn syntax_error(&mut self, expected: &str) {
        let found = match self.peek() {
            Some(kind) => kind.to_string(),
            None => "end of input".to_string(),
        };
        let line = self.current_line();
        self.report(Error::Syntax {
            line,
            expected: expected.to_string(),
            found,
        });
        if !self.is_eof() {
            self.index += 1;
        }
    }

    fn expect(&mut self, kind: &TokenKind) {
        if !self.consume(kind) {
            self.syntax_error(&kind.to_string());
        }
    }

    pub(super) fn expect_symbol(&mut self, symbol: Symbol) {
        self.expect(&TokenKind::Symbol(symbol));
    }

    pub(super) fn expect_keyword(&mut self, keyword: Keyword) {
        self.expect(&TokenKind::Keyword(keyword));
    }

    pub(super) fn expect_ident(&mut self) -> Option<String> {
        if let Some(TokenKind::Ident(name)) = self.peek() {
            let name = name.clone();
            self.index += 1;
            return Some(name);
        }
        self.syntax_error("an identifier");
        None
    }

    /// type = "int" | "char" | "boolean" | className
    fn expect_type(&mut self) -> Option<String> {
        match self.peek() {
            Some(TokenKind::Keyword(k @ (Keyword::Int | Keyword::Char | Keyword::Boolean))) => {
                let ty = k.as_str().to_string();
                self.index += 1;
                Some(ty)
            }
            Some(TokenKind::Ident(_)) => self.expect_ident(),
            _ => {
                self.syntax_error("a type");
                None
            }
        }
    }

    fn declare(&mut self, name: &str, ty: &str, kind: Kind, context: DeclContext) {
        let table = match kind {
            Kind::Static | Kind::Field => &mut self.class_scope,
            Kind::Argument | Kind::Local => &mut self.subroutine_scope,
        };
        table.define(name, ty, kind, context);
    }

    /// Subroutine scope first, so locals and arguments shadow fields and
    /// statics of the same name.
    pub(super) fn resolve(&self, name: &str) -> Option<(Segment, u16, String)> {
        self.subroutine_scope
            .get(name)
            .or_else(|| self.class_scope.get(name))
            .map(|s| (s.kind.segment(), s.index, s.ty.clone()))
    }

    /// Like [`Parser::resolve`], but a miss is reported: `name` is used where
    /// only a variable makes sense.
    pub(super) fn resolve_var(&mut self, name: &str, line: usize) -> Option<(Segment, u16)> {
        match self.resolve(name) {
            Some((segment, index, _)) => Some((segment, index)),
            None => {
                self.report(Error::Undeclared {
                    line,
                    name: name.to_string(),
                });
                None
            }
        }
    }

    /// class = "class" className "{" classVarDec* subroutineDec* "}"
    fn parse_class(&mut self) {
        self.expect_keyword(Keyword::Class);
        if let Some(name) = self.expect_ident() {
            self.class_name = name;
        }
        debug!("compiling class {}", self.class_name);
        self.expect_symbol(Symbol::OpenCurlyBrace);

        while self.at_keyword(Keyword::Static) || self.at_keyword(Keyword::Field) {
            self.parse_class_var_dec();
        }

        while !self.is_eof() && !self.at_symbol(Symbol::CloseCurlyBrace) {
            match self.peek().and_then(subroutine_kind) {
                Some(kind) => self.parse_subroutine(kind),
                None => self.syntax_error("'constructor', 'function' or 'method'"),
            }
        }
        self.expect_symbol(Symbol::CloseCurlyBrace);

        if let Some(token) = self.tokens.get(self.index) {
            let err = Error::TrailingInput {
                line: token.line,
                found: token.kind.to_string(),
            };
            self.report(err);
        }

        for symbol in self.class_scope.symbols() {
            debug!("{}: {:?}", self.class_name, symbol);
        }
    }

    /// classVarDec = ("static" | "field") type varName ("," varName)* ";"
    fn parse_class_var_dec(&mut self) {
        let kind = if self.consume_keyword(Keyword::Static) {
            Kind::Static
        } else {
            self.expect_keyword(Keyword::Field);
            Kind::Field
        };
        self.parse_var_names(kind);
    }

    /// type varName ("," varName)* ";"
    fn parse_var_names(&mut self, kind: Kind) {
        let ty = self.expect_type().unwrap_or_default();
        loop {
            if let Some(name) = self.expect_ident() {
                self.declare(&name, &ty, kind, DeclContext::VarDec);
            }
            if !self.consume_symbol(Symbol::Comma) {
                break;
            }
        }
        self.expect_symbol(Symbol::SemiColon);
    }

    /// subroutineDec = ("constructor" | "function" | "method") ("void" | type)
    ///                 name "(" parameterList ")" subroutineBody
    fn parse_subroutine(&mut self, kind: SubroutineKind) {
        self.advance();
        self.subroutine_scope.reset();

        if !self.consume_keyword(Keyword::Void) {
            self.expect_type();
        }
        let name = self.expect_ident().unwrap_or_default();
        if kind == SubroutineKind::Method {
            let class_name = self.class_name.clone();
            self.declare("this", &class_name, Kind::Argument, DeclContext::Receiver);
        }

        let slot = self.codegen.reserve_header();
        self.expect_symbol(Symbol::OpenParen);
        self.parse_parameter_list();
        self.expect_symbol(Symbol::CloseParen);
        self.parse_subroutine_body();

        let header = Header {
            kind,
            name: format!("{}.{}", self.class_name, name),
            n_locals: self.subroutine_scope.var_count(Kind::Local),
            n_fields: self.class_scope.var_count(Kind::Field),
        };
        debug!(
            "{:?} {}: {} arguments, {} locals",
            kind,
            header.name,
            self.subroutine_scope.var_count(Kind::Argument),
            header.n_locals
        );
        for symbol in self.subroutine_scope.symbols() {
            debug!("{}: {:?}", header.name, symbol);
        }
        self.codegen.complete_header(slot, header);
    }

    /// parameterList = ((type varName) ("," type varName)*)?
    fn parse_parameter_list(&mut self) {
        if self.at_symbol(Symbol::CloseParen) {
            return;
        }
        loop {
            let ty = self.expect_type().unwrap_or_default();
            if let Some(name) = self.expect_ident() {
                self.declare(&name, &ty, Kind::Argument, DeclContext::Parameter);
            }
            if !self.consume_symbol(Symbol::Comma) {
                break;
            }
        }
    }

    /// subroutineBody = "{" varDec* statements "}"
    fn parse_subroutine_body(&mut self) {
        self.expect_symbol(Symbol::OpenCurlyBrace);
        while self.consume_keyword(Keyword::Var) {
            self.parse_var_names(Kind::Local);
        }
        self.parse_statements();
        self.expect_symbol(Symbol::CloseCurlyBrace);
    }
}

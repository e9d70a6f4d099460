use std::fmt;

use phf::phf_map;

pub(super) static KEYWORDS: phf::Map<&str, Keyword> = phf_map! {
    "class" => Keyword::Class,
    "constructor" => Keyword::Constructor,
    "function" => Keyword::Function,
    "method" => Keyword::Method,
    "field" => Keyword::Field,
    "static" => Keyword::Static,
    "var" => Keyword::Var,
    "int" => Keyword::Int,
    "char" => Keyword::Char,
    "boolean" => Keyword::Boolean,
    "void" => Keyword::Void,
    "true" => Keyword::True,
    "false" => Keyword::False,
    "null" => Keyword::Null,
    "this" => Keyword::This,
    "let" => Keyword::Let,
    "do" => Keyword::Do,
    "if" => Keyword::If,
    "else" => Keyword::Else,
    "while" => Keyword::While,
    "return" => Keyword::Return,
};

pub(super) static SYMBOLS: phf::Map<char, Symbol> = phf_map! {
    '{' => Symbol::OpenCurlyBrace,
    '}' => Symbol::CloseCurlyBrace,
    '(' => Symbol::OpenParen,
    ')' => Symbol::CloseParen,
    '[' => Symbol::OpenSquareBrace,
    ']' => Symbol::CloseSquareBrace,
    '.' => Symbol::Dot,
    ',' => Symbol::Comma,
    ';' => Symbol::SemiColon,
    '+' => Symbol::Plus,
    '-' => Symbol::Minus,
    '*' => Symbol::Star,
    '/' => Symbol::Slash,
    '&' => Symbol::Ampersand,
    '|' => Symbol::Pipe,
    '<' => Symbol::LessThan,
    '>' => Symbol::GreaterThan,
    '=' => Symbol::Equal,
    '~' => Symbol::Tilde,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Constructor => "constructor",
            Keyword::Function => "function",
            Keyword::Method => "method",
            Keyword::Field => "field",
            Keyword::Static => "static",
            Keyword::Var => "var",
            Keyword::Int => "int",
            Keyword::Char => "char",
            Keyword::Boolean => "boolean",
            Keyword::Void => "void",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::This => "this",
            Keyword::Let => "let",
            Keyword::Do => "do",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    OpenCurlyBrace,
    CloseCurlyBrace,
    OpenParen,
    CloseParen,
    OpenSquareBrace,
    CloseSquareBrace,
    Dot,
    Comma,
    SemiColon,
    Plus,
    Minus,
    Star,
    Slash,
    Ampersand,
    Pipe,
    LessThan,
    GreaterThan,
    Equal,
    Tilde,
}

impl Symbol {
    pub fn as_char(&self) -> char {
        match self {
            Symbol::OpenCurlyBrace => '{',
            Symbol::CloseCurlyBrace => '}',
            Symbol::OpenParen => '(',
            Symbol::CloseParen => ')',
            Symbol::OpenSquareBrace => '[',
            Symbol::CloseSquareBrace => ']',
            Symbol::Dot => '.',
            Symbol::Comma => ',',
            Symbol::SemiColon => ';',
            Symbol::Plus => '+',
            Symbol::Minus => '-',
            Symbol::Star => '*',
            Symbol::Slash => '/',
            Symbol::Ampersand => '&',
            Symbol::Pipe => '|',
            Symbol::LessThan => '<',
            Symbol::GreaterThan => '>',
            Symbol::Equal => '=',
            Symbol::Tilde => '~',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Symbol(Symbol),
    IntConst(u32),
    StringConst(String),
    Ident(String),
}

/// The five lexical classes of the language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenCategory {
    Keyword,
    Symbol,
    IntegerConstant,
    StringConstant,
    Identifier,
}

impl TokenCategory {
    /// Element name used by the token XML dump.
    pub fn tag(&self) -> &'static str {
        match self {
            TokenCategory::Keyword => "keyword",
            TokenCategory::Symbol => "symbol",
            TokenCategory::IntegerConstant => "integerConstant",
            TokenCategory::StringConstant => "stringConstant",
            TokenCategory::Identifier => "identifier",
        }
    }
}

impl TokenKind {
    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::Keyword(_) => TokenCategory::Keyword,
            TokenKind::Symbol(_) => TokenCategory::Symbol,
            TokenKind::IntConst(_) => TokenCategory::IntegerConstant,
            TokenKind::StringConst(_) => TokenCategory::StringConstant,
            TokenKind::Ident(_) => TokenCategory::Identifier,
        }
    }

    /// Source text of the token. String constants come back without quotes.
    pub fn lexeme(&self) -> String {
        match self {
            TokenKind::Keyword(k) => k.as_str().to_string(),
            TokenKind::Symbol(s) => s.as_char().to_string(),
            TokenKind::IntConst(n) => n.to_string(),
            TokenKind::StringConst(s) | TokenKind::Ident(s) => s.clone(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(k) => write!(f, "'{}'", k.as_str()),
            TokenKind::Symbol(s) => write!(f, "'{}'", s.as_char()),
            TokenKind::IntConst(n) => write!(f, "integer {}", n),
            TokenKind::StringConst(s) => write!(f, "string \"{}\"", s),
            TokenKind::Ident(name) => write!(f, "identifier `{}`", name),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Self { kind, line }
    }

    pub fn lexeme(&self) -> String {
        self.kind.lexeme()
    }

    pub fn category(&self) -> TokenCategory {
        self.kind.category()
    }
}

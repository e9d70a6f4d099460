use log::warn;

use crate::Error;

use super::{
    token::{KEYWORDS, SYMBOLS},
    Token, TokenKind,
};

const MAX_INT_CONST: u32 = 32767;

#[derive(Debug)]
pub struct Lexer {
    chars: Vec<char>,
    tokens: Vec<Token>,
    errors: Vec<Error>,
    index: usize,
    line: usize,
}

impl Lexer {
    fn new(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
            tokens: vec![],
            errors: vec![],
            index: 0,
            line: 1,
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).copied()
    }

    fn new_token(&mut self, kind: TokenKind, len: usize) {
        self.tokens.push(Token::new(kind, self.line));
        self.index += len;
    }

    fn report(&mut self, err: Error) {
        warn!("{}", err);
        self.errors.push(err);
    }

    fn is_delimiter(c: char) -> bool {
        c.is_whitespace() || c == '"' || SYMBOLS.contains_key(&c)
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                break;
            }
            self.index += 1;
        }
    }

    fn skip_block_comment(&mut self) {
        let start_line = self.line;
        self.index += 2;

        while let Some(c) = self.peek(0) {
            if c == '*' && self.peek(1) == Some('/') {
                self.index += 2;
                return;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.index += 1;
        }

        self.report(Error::UnterminatedComment { line: start_line });
    }

    fn parse_string(&mut self) {
        let s: String = self.chars[self.index + 1..]
            .iter()
            .take_while(|&&c| c != '"' && c != '\n')
            .collect();
        let len = s.chars().count();

        if self.peek(len + 1) == Some('"') {
            self.new_token(TokenKind::StringConst(s), len + 2);
        } else {
            self.report(Error::UnterminatedString { line: self.line });
            self.new_token(TokenKind::StringConst(s), len + 1);
        }
    }

    fn parse_word(&mut self) {
        let s: String = self.chars[self.index..]
            .iter()
            .take_while(|&&c| !Self::is_delimiter(c))
            .collect();
        let len = s.chars().count();

        let kind = if let Some(keyword) = KEYWORDS.get(s.as_str()) {
            TokenKind::Keyword(*keyword)
        } else if s.chars().all(|c| c.is_ascii_digit()) {
            let value = s.parse::<u32>().unwrap_or(u32::MAX);
            if value > MAX_INT_CONST {
                self.report(Error::IntegerOverflow {
                    line: self.line,
                    value,
                });
            }
            TokenKind::IntConst(value)
        } else {
            TokenKind::Ident(s)
        };

        self.new_token(kind, len);
    }

    fn _tokenize(&mut self) {
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                self.line += 1;
                self.index += 1;
            } else if c.is_whitespace() {
                self.index += 1;
            } else if c == '/' && self.peek(1) == Some('/') {
                self.skip_line_comment();
            } else if c == '/' && self.peek(1) == Some('*') {
                self.skip_block_comment();
            } else if c == '"' {
                self.parse_string();
            } else if let Some(symbol) = SYMBOLS.get(&c) {
                self.new_token(TokenKind::Symbol(*symbol), 1);
            } else {
                self.parse_word();
            }
        }
    }

    /// Splits `s` into tokens. Lexical errors are returned next to the tokens
    /// rather than stopping the scan.
    pub fn tokenize(s: &str) -> (Vec<Token>, Vec<Error>) {
        let mut lexer = Lexer::new(s);
        lexer._tokenize();

        (lexer.tokens, lexer.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Keyword, Symbol};

    fn kinds(s: &str) -> Vec<TokenKind> {
        let (tokens, errors) = Lexer::tokenize(s);
        assert!(errors.is_empty(), "{:?}", errors);
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn classifies_tokens() {
        assert_eq!(
            kinds("let x1 = 42;"),
            vec![
                TokenKind::Keyword(Keyword::Let),
                TokenKind::Ident("x1".to_string()),
                TokenKind::Symbol(Symbol::Equal),
                TokenKind::IntConst(42),
                TokenKind::Symbol(Symbol::SemiColon),
            ]
        );
    }

    #[test]
    fn symbols_are_delimiters() {
        assert_eq!(
            kinds("a[i]=-b.c(~d)"),
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::Symbol(Symbol::OpenSquareBrace),
                TokenKind::Ident("i".to_string()),
                TokenKind::Symbol(Symbol::CloseSquareBrace),
                TokenKind::Symbol(Symbol::Equal),
                TokenKind::Symbol(Symbol::Minus),
                TokenKind::Ident("b".to_string()),
                TokenKind::Symbol(Symbol::Dot),
                TokenKind::Ident("c".to_string()),
                TokenKind::Symbol(Symbol::OpenParen),
                TokenKind::Symbol(Symbol::Tilde),
                TokenKind::Ident("d".to_string()),
                TokenKind::Symbol(Symbol::CloseParen),
            ]
        );
    }

    #[test]
    fn strips_comments() {
        let src = "
// line comment
/** doc
 * comment */
do /* inline */ Output.println(); // trailing
";
        assert_eq!(
            kinds(src),
            vec![
                TokenKind::Keyword(Keyword::Do),
                TokenKind::Ident("Output".to_string()),
                TokenKind::Symbol(Symbol::Dot),
                TokenKind::Ident("println".to_string()),
                TokenKind::Symbol(Symbol::OpenParen),
                TokenKind::Symbol(Symbol::CloseParen),
                TokenKind::Symbol(Symbol::SemiColon),
            ]
        );
    }

    #[test]
    fn keeps_string_verbatim() {
        assert_eq!(
            kinds("\"a // b /* c */ ; \""),
            vec![TokenKind::StringConst("a // b /* c */ ; ".to_string())]
        );
    }

    #[test]
    fn tracks_lines() {
        let (tokens, _) = Lexer::tokenize("class\n/* a\nb */ Main\n{");
        let lines: Vec<_> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
    }

    #[test]
    fn unterminated_block_comment_consumes_rest() {
        let (tokens, errors) = Lexer::tokenize("let x /* never closed ;");
        assert_eq!(tokens.len(), 2);
        assert!(matches!(errors[..], [Error::UnterminatedComment { line: 1 }]));
    }

    #[test]
    fn unterminated_string_stops_at_line_end() {
        let (tokens, errors) = Lexer::tokenize("\"abc\n;");
        assert_eq!(
            tokens.into_iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::StringConst("abc".to_string()),
                TokenKind::Symbol(Symbol::SemiColon),
            ]
        );
        assert!(matches!(errors[..], [Error::UnterminatedString { line: 1 }]));
    }

    #[test]
    fn reports_integer_overflow() {
        let (tokens, errors) = Lexer::tokenize("40000");
        assert_eq!(tokens[0].kind, TokenKind::IntConst(40000));
        assert!(matches!(
            errors[..],
            [Error::IntegerOverflow { value: 40000, .. }]
        ));
    }

    #[test]
    fn digits_followed_by_letters_are_an_identifier() {
        assert_eq!(kinds("12ab"), vec![TokenKind::Ident("12ab".to_string())]);
    }
}

//! Textual renderings of a token stream, for diagnostics.

use super::{Token, TokenKind};

/// Renders tokens back to source text, one space between tokens.
///
/// Lexing the result again yields the same token kinds.
pub fn render_source(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| match &t.kind {
            TokenKind::StringConst(s) => format!("\"{}\"", s),
            kind => kind.lexeme(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// The `<tokens>` XML document, one element per token named after its
/// category.
pub fn tokens_to_xml(tokens: &[Token]) -> String {
    let mut out = String::from("<tokens>\n");
    for token in tokens {
        let tag = token.category().tag();
        out.push_str(&format!(
            "<{tag}> {} </{tag}>\n",
            escape_xml(&token.lexeme())
        ));
    }
    out.push_str("</tokens>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    #[test]
    fn xml_escapes_symbols() {
        let (tokens, _) = Lexer::tokenize("if (a < \"b&c\")");
        assert_eq!(
            tokens_to_xml(&tokens),
            "<tokens>
<keyword> if </keyword>
<symbol> ( </symbol>
<identifier> a </identifier>
<symbol> &lt; </symbol>
<stringConstant> b&amp;c </stringConstant>
<symbol> ) </symbol>
</tokens>
"
        );
    }

    #[test]
    fn rendered_source_relexes_to_same_kinds() {
        let src = "let s = \"hi there\"; // done\nlet a[i]=-1;";
        let (tokens, _) = Lexer::tokenize(src);
        let rendered = render_source(&tokens);
        let (again, errors) = Lexer::tokenize(&rendered);
        assert!(errors.is_empty());
        let kinds = |ts: &[Token]| ts.iter().map(|t| t.kind.clone()).collect::<Vec<_>>();
        assert_eq!(kinds(&tokens), kinds(&again));
    }
}

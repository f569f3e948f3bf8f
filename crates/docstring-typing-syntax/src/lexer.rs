//! # Lexer - Tokenizing Annotation Text
//!
//! The first stage of parsing: breaking an annotation such as
//! `Mapping[str, Any]` into tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! **Every byte in the input appears in exactly one token**, whitespace and
//! unrecognised characters included:
//!
//! ```
//! use docstring_typing_syntax::lexer::lex;
//!
//! let input = "Tuple[int, ...]";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! Characters the annotation grammar has no use for (digits, quotes,
//! operators) become `UNKNOWN` tokens. The lexer never fails; rejecting them
//! is the parser's job.
//!
//! [`TokenKind::to_syntax_kind`] maps the Logos enum onto [`SyntaxKind`].
//!
//! [`SyntaxKind`]: crate::syntax_kind::SyntaxKind

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// This enum exists separately from [`SyntaxKind`] because Logos needs to
/// derive on it. Each variant maps to a corresponding `SyntaxKind` token.
///
/// [`SyntaxKind`]: crate::syntax_kind::SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    /// Longest match wins, so `...` never lexes as three dots
    #[token("...")]
    Ellipsis,

    #[token(".")]
    Dot,

    #[token(",")]
    Comma,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("~")]
    Tilde,

    /// Beats `Ident` on equal length, loses to it on `nothing`
    #[token("not")]
    Not,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Ident => SyntaxKind::IDENT,
            TokenKind::Ellipsis => SyntaxKind::ELLIPSIS,
            TokenKind::Dot => SyntaxKind::DOT,
            TokenKind::Comma => SyntaxKind::COMMA,
            TokenKind::LBracket => SyntaxKind::LBRACKET,
            TokenKind::RBracket => SyntaxKind::RBRACKET,
            TokenKind::LParen => SyntaxKind::LPAREN,
            TokenKind::RParen => SyntaxKind::RPAREN,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::Not => SyntaxKind::NOT_KW,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            Err(()) => SyntaxKind::UNKNOWN,
        };
        tokens.push(Token { kind, text });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(kind: SyntaxKind, text: &str) -> Token<'_> {
        Token { kind, text }
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn lex_identifier() {
        assert_eq!(lex("datetime"), vec![token(SyntaxKind::IDENT, "datetime")]);
    }

    #[test]
    fn lex_identifier_with_underscore_and_digits() {
        assert_eq!(
            lex("_private2"),
            vec![token(SyntaxKind::IDENT, "_private2")]
        );
    }

    #[test]
    fn lex_subscript() {
        assert_eq!(
            lex("Sequence[int]"),
            vec![
                token(SyntaxKind::IDENT, "Sequence"),
                token(SyntaxKind::LBRACKET, "["),
                token(SyntaxKind::IDENT, "int"),
                token(SyntaxKind::RBRACKET, "]"),
            ]
        );
    }

    #[test]
    fn lex_ellipsis_is_one_token() {
        assert_eq!(
            lex("int,..."),
            vec![
                token(SyntaxKind::IDENT, "int"),
                token(SyntaxKind::COMMA, ","),
                token(SyntaxKind::ELLIPSIS, "..."),
            ]
        );
    }

    #[test]
    fn lex_four_dots_is_ellipsis_then_dot() {
        assert_eq!(
            lex("...."),
            vec![
                token(SyntaxKind::ELLIPSIS, "..."),
                token(SyntaxKind::DOT, "."),
            ]
        );
    }

    #[test]
    fn lex_dotted_name() {
        assert_eq!(
            lex("google.auth"),
            vec![
                token(SyntaxKind::IDENT, "google"),
                token(SyntaxKind::DOT, "."),
                token(SyntaxKind::IDENT, "auth"),
            ]
        );
    }

    #[test]
    fn lex_forward_reference() {
        assert_eq!(
            lex("~Node"),
            vec![
                token(SyntaxKind::TILDE, "~"),
                token(SyntaxKind::IDENT, "Node"),
            ]
        );
    }

    #[test]
    fn lex_not_keyword_only_as_whole_word() {
        assert_eq!(
            lex("not nothing"),
            vec![
                token(SyntaxKind::NOT_KW, "not"),
                token(SyntaxKind::WHITESPACE, " "),
                token(SyntaxKind::IDENT, "nothing"),
            ]
        );
    }

    #[test]
    fn lex_whitespace_is_kept() {
        assert_eq!(
            lex("int, \tstr"),
            vec![
                token(SyntaxKind::IDENT, "int"),
                token(SyntaxKind::COMMA, ","),
                token(SyntaxKind::WHITESPACE, " \t"),
                token(SyntaxKind::IDENT, "str"),
            ]
        );
    }

    #[test]
    fn lex_unknown_characters() {
        let tokens = lex("Literal['a']");
        assert!(tokens.iter().any(|t| t.kind == SyntaxKind::UNKNOWN));
        let reconstructed: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(reconstructed, "Literal['a']");
    }

    #[test]
    fn lex_leading_digit_is_not_an_identifier() {
        let tokens = lex("1x");
        assert_eq!(tokens[0].kind, SyntaxKind::UNKNOWN);
    }
}

//! # Grammar Rules
//!
//! Each function takes a `&mut Parser` and uses its methods to inspect and
//! consume tokens and to open and close nodes through markers.
//!
//! The accepted language is deliberately small:
//!
//! ```text
//! root      = expr EOF
//! expr      = "~" expr | "not" expr | postfix
//! postfix   = atom ( "." IDENT | "[" subscript "]" )*
//! subscript = expr ( "," expr )* ","?
//! atom      = IDENT | "..." | "(" ")" | "(" expr ")" | "(" expr ( "," expr )* ","? ")"
//!           | "[" ( expr ( "," expr )* ","? )? "]"
//! ```
//!
//! ## Error Recovery
//!
//! Rules record an error and keep going rather than returning early. An
//! unexpected token is wrapped in an ERROR node; a missing closing bracket
//! is only reported. Whatever follows a complete expression is swept into a
//! single trailing ERROR node by [`root`].

mod expr;

use crate::parser::{Parser, describe_kind};
use crate::syntax_kind::SyntaxKind;

/// Parse the root node.
///
/// The ROOT node holds exactly one expression. Leading and trailing
/// whitespace is kept inside ROOT.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    if p.at_end() {
        p.error("expected a type expression, found end of input");
    } else {
        expr::expr(p);
        if !p.at_end() {
            p.error(format!("unexpected {} after expression", found(p)));
            p.eat_trivia();
            let err = p.start();
            while !p.at_end() {
                p.bump();
            }
            err.complete(p, SyntaxKind::ERROR);
        }
    }

    p.eat_trivia();
    m.complete(p, SyntaxKind::ROOT);
}

/// Describe the current token for an error message.
fn found(p: &Parser<'_, '_>) -> String {
    match p.current() {
        SyntaxKind::IDENT | SyntaxKind::UNKNOWN => format!("`{}`", p.current_text()),
        kind => describe_kind(kind).to_string(),
    }
}

//! Expression rules: prefix markers, postfix chains and atoms.

use super::found;
use crate::parser::{CompletedMarker, Parser};
use crate::syntax_kind::SyntaxKind;

/// Parse one expression. Returns `None` when no expression could start at
/// the current token or nesting is too deep (the error is already recorded).
pub(super) fn expr(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    if !p.enter() {
        return None;
    }
    let completed = match p.current() {
        SyntaxKind::TILDE => Some(prefix(p, SyntaxKind::FORWARD_REF_EXPR)),
        SyntaxKind::NOT_KW => Some(prefix(p, SyntaxKind::NOT_EXPR)),
        _ => postfix(p),
    };
    p.exit();
    completed
}

/// A prefix marker and its operand.
fn prefix(p: &mut Parser<'_, '_>, kind: SyntaxKind) -> CompletedMarker {
    p.eat_trivia();
    let m = p.start();
    p.bump();
    expr(p);
    m.complete(p, kind)
}

/// An atom followed by any number of `.attr` and `[...]` suffixes.
fn postfix(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    let mut lhs = atom(p)?;

    // Each suffix wraps everything before it, so it counts as a level.
    let mut levels = 0;
    loop {
        let kind = p.current();
        if !matches!(kind, SyntaxKind::DOT | SyntaxKind::LBRACKET) || !p.enter() {
            break;
        }
        levels += 1;

        let m = lhs.precede(p);
        p.bump();
        lhs = if kind == SyntaxKind::DOT {
            p.expect(SyntaxKind::IDENT);
            m.complete(p, SyntaxKind::ATTR_EXPR)
        } else {
            if p.at(SyntaxKind::RBRACKET) {
                p.error("expected a type expression inside `[]`");
            } else {
                subscript_argument(p);
            }
            p.expect(SyntaxKind::RBRACKET);
            m.complete(p, SyntaxKind::SUBSCRIPT_EXPR)
        };
    }
    for _ in 0..levels {
        p.exit();
    }
    Some(lhs)
}

/// The contents of `[...]` after a subscripted expression.
///
/// A single element stays as is; a comma turns the elements into an
/// unparenthesised TUPLE_EXPR.
fn subscript_argument(p: &mut Parser<'_, '_>) {
    let Some(first) = expr(p) else {
        return;
    };
    if p.at(SyntaxKind::COMMA) {
        let m = first.precede(p);
        comma_tail(p, SyntaxKind::RBRACKET);
        m.complete(p, SyntaxKind::TUPLE_EXPR);
    }
}

/// `( "," expr )* ","?` up to (not including) `close`.
fn comma_tail(p: &mut Parser<'_, '_>, close: SyntaxKind) {
    while p.eat(SyntaxKind::COMMA) {
        if p.at(close) || expr(p).is_none() {
            break;
        }
    }
}

fn atom(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.eat_trivia();
    match p.current() {
        SyntaxKind::IDENT => {
            let m = p.start();
            p.bump();
            Some(m.complete(p, SyntaxKind::NAME_EXPR))
        }
        SyntaxKind::ELLIPSIS => {
            let m = p.start();
            p.bump();
            Some(m.complete(p, SyntaxKind::ELLIPSIS_EXPR))
        }
        SyntaxKind::LPAREN => Some(paren_or_tuple(p)),
        SyntaxKind::LBRACKET => Some(list(p)),
        SyntaxKind::RBRACKET | SyntaxKind::RPAREN | SyntaxKind::COMMA | SyntaxKind::EOF => {
            p.error(format!("expected a type expression, found {}", found(p)));
            None
        }
        _ => {
            let message = format!("expected a type expression, found {}", found(p));
            p.err_and_bump(message);
            None
        }
    }
}

/// `()` and `(a, b)` are tuples; `(a)` is a group.
fn paren_or_tuple(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let m = p.start();
    p.bump();

    if p.eat(SyntaxKind::RPAREN) {
        return m.complete(p, SyntaxKind::TUPLE_EXPR);
    }

    expr(p);
    let kind = if p.at(SyntaxKind::COMMA) {
        comma_tail(p, SyntaxKind::RPAREN);
        SyntaxKind::TUPLE_EXPR
    } else {
        SyntaxKind::PAREN_EXPR
    };
    p.expect(SyntaxKind::RPAREN);
    m.complete(p, kind)
}

/// A bracketed parameter list such as the `[int, str]` of
/// `Callable[[int, str], bool]`.
fn list(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let m = p.start();
    p.bump();

    if !p.at(SyntaxKind::RBRACKET) && expr(p).is_some() {
        comma_tail(p, SyntaxKind::RBRACKET);
    }
    p.expect(SyntaxKind::RBRACKET);
    m.complete(p, SyntaxKind::LIST_EXPR)
}

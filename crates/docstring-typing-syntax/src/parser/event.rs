//! # Parser Events
//!
//! The parser does not build the tree directly. It emits a **flat sequence**
//! of events that the [`Sink`](super::sink::Sink) replays into a Rowan tree:
//!
//! ```text
//! Start(SUBSCRIPT_EXPR)   ← forward parent of the NAME_EXPR below
//!   Start(NAME_EXPR)
//!     Token(IDENT)        "Sequence"
//!   Finish
//!   Token(LBRACKET)
//!   Start(NAME_EXPR)
//!     Token(IDENT)        "int"
//!   Finish
//!   Token(RBRACKET)
//! Finish
//! ```
//!
//! ## Forward Parent Links
//!
//! Postfix operators (`.attr`, `[...]`) are only recognised after their
//! operand has been parsed. `forward_parent` on a `Start` records "this node
//! is wrapped by the `Start` at that index", and the Sink opens the chain
//! outermost-first.

use crate::syntax_kind::SyntaxKind;

/// An event emitted by the parser during tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node.
    ///
    /// If `forward_parent` is set, it points to another `Start` event that
    /// becomes this node's parent.
    Start {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },

    /// Add the next lexer token to the current node.
    Token { kind: SyntaxKind },

    /// Finish the current node.
    Finish,

    /// Reserved slot for a node, filled in when its marker completes.
    Placeholder,
}

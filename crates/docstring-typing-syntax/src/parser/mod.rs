//! # Parser - Event-Based Tree Construction
//!
//! Turns the token stream of one annotation into a lossless syntax tree using
//! the **event-based** architecture from rust-analyzer.
//!
//! Grammar functions never build nodes themselves. They call
//! [`Parser::start`] to get a [`Marker`], consume tokens, and then
//! `complete()` the marker with a node kind. The
//! [`Sink`] replays the resulting events into a Rowan tree.
//!
//! ## Trivia
//!
//! Whitespace is kept in the tree but is invisible to the grammar:
//! [`Parser::current`] and friends look past it, and [`Parser::bump`] flushes
//! it into the tree just before the significant token. Node starts are
//! preceded by [`Parser::eat_trivia`] so whitespace between elements belongs
//! to the enclosing node rather than to the next element.
//!
//! ## Errors
//!
//! The parser never stops early. Unexpected tokens are wrapped in `ERROR`
//! nodes and a [`ParseError`] is recorded, so the tree always covers the whole
//! input. Callers that need a valid expression check [`Parse::errors`]
//! (or use [`crate::parse_expr`], which does it for them).
//!
//! Nesting is capped at [`MAX_DEPTH`] levels. Past it the rest of the input
//! goes into one ERROR node, so no later stage recurses without bound.
//!
//! ```
//! use docstring_typing_syntax::parse;
//!
//! let parse = parse("Optional[datetime]");
//! assert!(parse.errors().is_empty());
//! assert_eq!(parse.syntax().text().to_string(), "Optional[datetime]");
//!
//! let parse = parse("Optional[datetime");
//! assert_eq!(parse.errors()[0].to_string(), "expected `]` at offset 17");
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// Deepest nesting of subscripts, groups, suffixes and `~` markers accepted.
pub const MAX_DEPTH: usize = 128;

/// A syntax error found while parsing an annotation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {offset}")]
pub struct ParseError {
    /// Human readable description of what was expected or found
    pub message: String,
    /// Byte offset into the annotation text
    pub offset: usize,
}

/// The result of parsing: a tree that covers every input byte, plus the
/// errors found along the way.
#[derive(Debug, Clone)]
pub struct Parse {
    tree: SyntaxNode,
    errors: Vec<ParseError>,
}

impl Parse {
    /// The ROOT node of the concrete syntax tree.
    pub fn syntax(&self) -> &SyntaxNode {
        &self.tree
    }

    /// Errors in source order. Empty when the annotation is well formed.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }
}

/// The parser state machine.
///
/// Holds the token stream, current position, and accumulated events.
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Inspect tokens: `current()`, `nth()`, `at()`, `at_end()`
/// - Consume tokens: `bump()`, `eat()`, `expect()`
/// - Build structure: `start()` → `Marker` → `complete()`
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
    errors: Vec<ParseError>,
    depth: usize,
    /// Set once [`MAX_DEPTH`] is hit; later errors are only echoes of it
    too_deep: bool,
}

impl<'t, 'input> Parser<'t, 'input> {
    /// Create a new parser from a slice of tokens.
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            errors: Vec::new(),
            depth: 0,
            too_deep: false,
        }
    }

    /// Parse the tokens and return the tree with its errors.
    pub fn parse(mut self) -> Parse {
        grammar::root(&mut self);
        let tree = Sink::new(self.tokens, self.events).finish();
        Parse {
            tree,
            errors: self.errors,
        }
    }

    /// Start a new node and return a marker.
    ///
    /// Grammar rules call [`Parser::eat_trivia`] first when leading
    /// whitespace should stay in the enclosing node.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current significant token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n significant tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Check if only trivia (or nothing) is left.
    pub fn at_end(&self) -> bool {
        self.current() == SyntaxKind::EOF
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it matches, otherwise record an error.
    pub fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error(format!("expected {}", describe_kind(kind)));
        false
    }

    /// Consume the current significant token (and any trivia before it).
    pub fn bump(&mut self) {
        self.eat_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.events.push(Event::Token { kind: token.kind });
            self.pos += 1;
        }
    }

    /// Consume trivia tokens at the cursor into the current node.
    pub fn eat_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos)
            && token.kind.is_trivia()
        {
            self.events.push(Event::Token { kind: token.kind });
            self.pos += 1;
        }
    }

    /// Get the text of the current significant token.
    pub fn current_text(&self) -> &'input str {
        self.tokens[self.pos..]
            .iter()
            .find(|t| !t.kind.is_trivia())
            .map(|t| t.text)
            .unwrap_or("")
    }

    /// Byte offset of the current significant token.
    pub fn offset(&self) -> usize {
        let mut offset: usize = self.tokens[..self.pos].iter().map(|t| t.text.len()).sum();
        for token in &self.tokens[self.pos..] {
            if !token.kind.is_trivia() {
                break;
            }
            offset += token.text.len();
        }
        offset
    }

    /// Descend one nesting level. Returns false, after recording an error and
    /// sweeping the remaining input into an ERROR node, once [`MAX_DEPTH`] is
    /// reached. Every successful `enter` is paired with an [`Parser::exit`].
    pub fn enter(&mut self) -> bool {
        if self.depth >= MAX_DEPTH {
            self.error(format!("nesting deeper than {MAX_DEPTH} levels"));
            self.too_deep = true;
            self.eat_trivia();
            let m = self.start();
            while !self.at_end() {
                self.bump();
            }
            m.complete(self, SyntaxKind::ERROR);
            return false;
        }
        self.depth += 1;
        true
    }

    pub fn exit(&mut self) {
        self.depth -= 1;
    }

    /// Record an error at the current token.
    pub fn error(&mut self, message: impl Into<String>) {
        if self.too_deep {
            return;
        }
        let offset = self.offset();
        self.errors.push(ParseError {
            message: message.into(),
            offset,
        });
    }

    /// Record an error and wrap the current token in an ERROR node.
    pub fn err_and_bump(&mut self, message: impl Into<String>) {
        self.error(message);
        self.eat_trivia();
        let m = self.start();
        self.bump();
        m.complete(self, SyntaxKind::ERROR);
    }
}

/// How a token kind is named in error messages.
pub(crate) fn describe_kind(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::IDENT => "identifier",
        SyntaxKind::DOT => "`.`",
        SyntaxKind::ELLIPSIS => "`...`",
        SyntaxKind::COMMA => "`,`",
        SyntaxKind::LBRACKET => "`[`",
        SyntaxKind::RBRACKET => "`]`",
        SyntaxKind::LPAREN => "`(`",
        SyntaxKind::RPAREN => "`)`",
        SyntaxKind::TILDE => "`~`",
        SyntaxKind::NOT_KW => "`not`",
        SyntaxKind::EOF => "end of input",
        _ => "token",
    }
}

/// A marker for a node being constructed.
///
/// Every marker must be completed (`marker.complete(p, KIND)`). Dropping
/// one otherwise panics, which catches grammar bugs instead of producing
/// corrupt trees.
#[must_use = "Markers must be completed, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) -> CompletedMarker {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::Start {
            kind,
            forward_parent: None,
        };
        p.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be completed");
        }
    }
}

/// A marker for a node that has been completed.
///
/// `precede()` wraps the completed node in a new parent, which is how the
/// postfix operators `.attr` and `[...]` take an already parsed operand.
#[derive(Debug, Clone, Copy)]
pub struct CompletedMarker {
    /// Position of the Start event for this completed node
    pos: usize,
}

impl CompletedMarker {
    /// Create a new parent node that will contain this node.
    pub fn precede(self, p: &mut Parser<'_, '_>) -> Marker {
        let new_pos = p.events.len();
        p.events.push(Event::Placeholder);

        if let Event::Start { forward_parent, .. } = &mut p.events[self.pos] {
            *forward_parent = Some(new_pos);
        }

        Marker {
            pos: new_pos,
            completed: false,
        }
    }
}

/// Parse annotation text into a syntax tree.
pub fn parse(source: &str) -> Parse {
    let tokens = lex(source);
    let parser = Parser::new(&tokens);
    parser.parse()
}

//! Sink for converting parser events into a Rowan green tree.

use rowan::GreenNodeBuilder;

use crate::lexer::Token;
use crate::parser::event::Event;
use crate::syntax_kind::{SyntaxKind, SyntaxNode};

/// Replays parser events over the token stream to build the syntax tree.
pub struct Sink<'t, 'input> {
    builder: GreenNodeBuilder<'static>,
    tokens: &'t [Token<'input>],
    cursor: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Sink<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>], events: Vec<Event>) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            tokens,
            cursor: 0,
            events,
        }
    }

    /// Consume the sink and build the syntax tree.
    pub fn finish(mut self) -> SyntaxNode {
        let mut forward_parents = Vec::new();

        for i in 0..self.events.len() {
            match std::mem::replace(&mut self.events[i], Event::Placeholder) {
                Event::Start {
                    kind,
                    forward_parent,
                } => {
                    forward_parents.push(kind);
                    let mut fp = forward_parent;

                    while let Some(parent_idx) = fp {
                        match std::mem::replace(&mut self.events[parent_idx], Event::Placeholder) {
                            Event::Start {
                                kind,
                                forward_parent,
                            } => {
                                fp = forward_parent;
                                forward_parents.push(kind);
                            }
                            _ => unreachable!(),
                        }
                    }

                    // Outermost first
                    for kind in forward_parents.drain(..).rev() {
                        self.builder.start_node(kind.into());
                    }
                }
                Event::Token { kind } => self.token(kind),
                Event::Finish => {
                    self.builder.finish_node();
                }
                Event::Placeholder => {}
            }
        }

        SyntaxNode::new_root(self.builder.finish())
    }

    fn token(&mut self, kind: SyntaxKind) {
        let text = self.tokens[self.cursor].text;
        self.cursor += 1;
        self.builder.token(kind.into(), text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    #[test]
    fn sink_builds_simple_tree() {
        let tokens = lex("int");
        let events = vec![
            Event::Start {
                kind: SyntaxKind::ROOT,
                forward_parent: None,
            },
            Event::Start {
                kind: SyntaxKind::NAME_EXPR,
                forward_parent: None,
            },
            Event::Token {
                kind: SyntaxKind::IDENT,
            },
            Event::Finish,
            Event::Finish,
        ];

        let tree = Sink::new(&tokens, events).finish();

        assert_eq!(tree.kind(), SyntaxKind::ROOT);
        assert_eq!(tree.children().count(), 1);
        assert_eq!(tree.text().to_string(), "int");
    }

    #[test]
    fn sink_resolves_forward_parent() {
        let tokens = lex("a.b");
        let events = vec![
            Event::Start {
                kind: SyntaxKind::ROOT,
                forward_parent: None,
            },
            Event::Start {
                kind: SyntaxKind::NAME_EXPR,
                forward_parent: Some(4),
            },
            Event::Token {
                kind: SyntaxKind::IDENT,
            },
            Event::Finish,
            Event::Start {
                kind: SyntaxKind::ATTR_EXPR,
                forward_parent: None,
            },
            Event::Token {
                kind: SyntaxKind::DOT,
            },
            Event::Token {
                kind: SyntaxKind::IDENT,
            },
            Event::Finish,
            Event::Finish,
        ];

        let tree = Sink::new(&tokens, events).finish();

        let attr = tree.children().next().unwrap();
        assert_eq!(attr.kind(), SyntaxKind::ATTR_EXPR);
        let name = attr.children().next().unwrap();
        assert_eq!(name.kind(), SyntaxKind::NAME_EXPR);
        assert_eq!(name.text().to_string(), "a");
        assert_eq!(tree.text().to_string(), "a.b");
    }
}

//! Renders a collapsed [`Expr`] as Sphinx cross-reference markup.
//!
//! | Expression | Markup |
//! |------------|--------|
//! | recognised name `List` | ``:py:obj:`~typing.List` `` |
//! | other name `datetime` | ``:py:obj:`datetime` `` |
//! | `~Node` | ``:py:obj:`~Node` `` |
//! | `A[B]` | `A [ B ] ` |
//! | `A, B` | `A, B` |
//! | `[A, B]` | `[ A, B ]` |
//! | `...` | `...` |
//!
//! The spacing around subscript brackets keeps the references from running
//! into the surrounding text once Sphinx resolves them.

use docstring_typing_syntax::Expr;

use crate::vocabulary::Vocabulary;

/// The role and namespace used for references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupStyle {
    /// Sphinx role, without the surrounding colons
    pub role: String,
    /// Module that recognised names resolve in
    pub module: String,
}

impl Default for MarkupStyle {
    fn default() -> Self {
        Self {
            role: "py:obj".to_string(),
            module: "typing".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("`~` must mark a name, found a {found}")]
    ForwardRefTarget { found: &'static str },
}

/// Walks an expression tree, appending markup to an output buffer.
pub struct Renderer<'a> {
    vocabulary: &'a Vocabulary,
    style: &'a MarkupStyle,
    output: String,
}

impl<'a> Renderer<'a> {
    pub fn new(vocabulary: &'a Vocabulary, style: &'a MarkupStyle) -> Self {
        Self {
            vocabulary,
            style,
            output: String::new(),
        }
    }

    /// Render `expr` and return the finished markup.
    pub fn render(mut self, expr: &Expr) -> Result<String, RenderError> {
        self.visit(expr)?;
        Ok(self.output)
    }

    fn visit(&mut self, expr: &Expr) -> Result<(), RenderError> {
        match expr {
            Expr::Name(id) => self.reference(id),
            Expr::Attribute { object, attr } => {
                self.visit(object)?;
                self.output.push('.');
                self.output.push_str(attr);
            }
            Expr::Subscript { object, argument } => {
                self.visit(object)?;
                self.output.push_str(" [ ");
                self.visit(argument)?;
                self.output.push_str(" ] ");
            }
            Expr::Tuple(elements) => self.separated(elements)?,
            Expr::List(elements) => {
                self.output.push_str("[ ");
                self.separated(elements)?;
                self.output.push_str(" ]");
            }
            Expr::Ellipsis => self.output.push_str("..."),
            Expr::ForwardRef(operand) => match operand.as_ref() {
                Expr::Name(id) => self.reference(&format!("~{id}")),
                other => {
                    return Err(RenderError::ForwardRefTarget {
                        found: other.kind_name(),
                    });
                }
            },
        }
        Ok(())
    }

    fn separated(&mut self, elements: &[Expr]) -> Result<(), RenderError> {
        for (idx, element) in elements.iter().enumerate() {
            if idx > 0 {
                self.output.push_str(", ");
            }
            self.visit(element)?;
        }
        Ok(())
    }

    fn reference(&mut self, name: &str) {
        self.output.push(':');
        self.output.push_str(&self.style.role);
        self.output.push_str(":`");
        if self.vocabulary.contains(name) {
            self.output.push('~');
            self.output.push_str(&self.style.module);
            self.output.push('.');
        }
        self.output.push_str(name);
        self.output.push('`');
    }
}

//! # Expression Model
//!
//! The concrete syntax tree keeps every byte, which is what the parser wants.
//! Rendering wants the opposite: a small owned tree with one variant per
//! construct. [`Expr`] is that tree, and [`Expr::lower`] converts a CST node
//! into it.
//!
//! ```
//! use docstring_typing_syntax::{Expr, parse_expr};
//!
//! let expr = parse_expr("Optional[datetime]").unwrap();
//! assert_eq!(
//!     expr,
//!     Expr::subscript(Expr::name("Optional"), Expr::name("datetime"))
//! );
//! ```

use crate::parser::{ParseError, parse};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};

/// A type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A bare or (after collapsing) dotted name
    Name(String),
    /// `object.attr`
    Attribute { object: Box<Expr>, attr: String },
    /// `object[argument]`; several arguments arrive as a single `Tuple`
    Subscript {
        object: Box<Expr>,
        argument: Box<Expr>,
    },
    Tuple(Vec<Expr>),
    /// Bracketed parameter list, as in `Callable[[int], str]`
    List(Vec<Expr>),
    Ellipsis,
    /// `~operand`: resolve lazily
    ForwardRef(Box<Expr>),
}

impl Expr {
    pub fn name(id: impl Into<String>) -> Self {
        Expr::Name(id.into())
    }

    pub fn attribute(object: Expr, attr: impl Into<String>) -> Self {
        Expr::Attribute {
            object: Box::new(object),
            attr: attr.into(),
        }
    }

    pub fn subscript(object: Expr, argument: Expr) -> Self {
        Expr::Subscript {
            object: Box::new(object),
            argument: Box::new(argument),
        }
    }

    pub fn forward_ref(operand: Expr) -> Self {
        Expr::ForwardRef(Box::new(operand))
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Name(_) => "name",
            Expr::Attribute { .. } => "attribute",
            Expr::Subscript { .. } => "subscript",
            Expr::Tuple(_) => "tuple",
            Expr::List(_) => "list",
            Expr::Ellipsis => "ellipsis",
            Expr::ForwardRef(_) => "forward reference",
        }
    }

    /// Lower a CST expression node (or the ROOT wrapping one).
    ///
    /// The tree is expected to be error free; ERROR nodes and missing
    /// children are reported rather than guessed around.
    pub fn lower(node: &SyntaxNode) -> Result<Expr, ParseError> {
        match node.kind() {
            // `not x` carries no markup of its own and reads as `x`.
            SyntaxKind::ROOT | SyntaxKind::PAREN_EXPR | SyntaxKind::NOT_EXPR => {
                Expr::lower(&only_child(node)?)
            }
            SyntaxKind::NAME_EXPR => Ok(Expr::Name(ident(node)?)),
            SyntaxKind::ATTR_EXPR => {
                let object = Expr::lower(&only_child(node)?)?;
                Ok(Expr::attribute(object, ident(node)?))
            }
            SyntaxKind::SUBSCRIPT_EXPR => {
                let mut children = node.children();
                let (Some(object), Some(argument), None) =
                    (children.next(), children.next(), children.next())
                else {
                    return Err(malformed(node, "subscript"));
                };
                Ok(Expr::subscript(
                    Expr::lower(&object)?,
                    Expr::lower(&argument)?,
                ))
            }
            SyntaxKind::TUPLE_EXPR => Ok(Expr::Tuple(lower_children(node)?)),
            SyntaxKind::LIST_EXPR => Ok(Expr::List(lower_children(node)?)),
            SyntaxKind::ELLIPSIS_EXPR => Ok(Expr::Ellipsis),
            SyntaxKind::FORWARD_REF_EXPR => {
                Ok(Expr::forward_ref(Expr::lower(&only_child(node)?)?))
            }
            _ => Err(ParseError {
                message: format!("unexpected `{}`", node.text()),
                offset: offset(node),
            }),
        }
    }
}

/// Parse annotation text straight into an [`Expr`].
///
/// Fails with the first syntax error when the text is not a complete,
/// well-formed annotation.
pub fn parse_expr(source: &str) -> Result<Expr, ParseError> {
    let parse = parse(source);
    if let Some(error) = parse.errors().first() {
        return Err(error.clone());
    }
    Expr::lower(parse.syntax())
}

fn only_child(node: &SyntaxNode) -> Result<SyntaxNode, ParseError> {
    let mut children = node.children();
    match (children.next(), children.next()) {
        (Some(child), None) => Ok(child),
        _ => Err(malformed(node, "expression")),
    }
}

fn lower_children(node: &SyntaxNode) -> Result<Vec<Expr>, ParseError> {
    node.children().map(|child| Expr::lower(&child)).collect()
}

/// The last IDENT token directly under `node`.
fn ident(node: &SyntaxNode) -> Result<String, ParseError> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| token.kind() == SyntaxKind::IDENT)
        .last()
        .map(|token| token.text().to_string())
        .ok_or_else(|| malformed(node, "identifier"))
}

fn malformed(node: &SyntaxNode, what: &str) -> ParseError {
    ParseError {
        message: format!("malformed {what} `{}`", node.text()),
        offset: offset(node),
    }
}

fn offset(node: &SyntaxNode) -> usize {
    usize::from(node.text_range().start())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lower_name() {
        assert_eq!(parse_expr("int").unwrap(), Expr::name("int"));
    }

    #[test]
    fn lower_dotted_name_keeps_attribute_chain() {
        assert_eq!(
            parse_expr("google.auth.Credentials").unwrap(),
            Expr::attribute(
                Expr::attribute(Expr::name("google"), "auth"),
                "Credentials"
            )
        );
    }

    #[test]
    fn lower_nested_subscript() {
        assert_eq!(
            parse_expr("Sequence[int, List[str]]").unwrap(),
            Expr::subscript(
                Expr::name("Sequence"),
                Expr::Tuple(vec![
                    Expr::name("int"),
                    Expr::subscript(Expr::name("List"), Expr::name("str")),
                ])
            )
        );
    }

    #[test]
    fn lower_tuple_with_ellipsis() {
        assert_eq!(
            parse_expr("Tuple[int,...]").unwrap(),
            Expr::subscript(
                Expr::name("Tuple"),
                Expr::Tuple(vec![Expr::name("int"), Expr::Ellipsis])
            )
        );
    }

    #[test]
    fn lower_parenthesised_tuple_matches_bare_tuple() {
        assert_eq!(
            parse_expr("Tuple[(int, str)]").unwrap(),
            parse_expr("Tuple[int, str]").unwrap()
        );
    }

    #[test]
    fn lower_group_is_transparent() {
        assert_eq!(parse_expr("((int))").unwrap(), Expr::name("int"));
    }

    #[test]
    fn lower_empty_tuple() {
        assert_eq!(
            parse_expr("Tuple[()]").unwrap(),
            Expr::subscript(Expr::name("Tuple"), Expr::Tuple(vec![]))
        );
    }

    #[test]
    fn lower_callable_parameter_list() {
        assert_eq!(
            parse_expr("Callable[[int, str], bool]").unwrap(),
            Expr::subscript(
                Expr::name("Callable"),
                Expr::Tuple(vec![
                    Expr::List(vec![Expr::name("int"), Expr::name("str")]),
                    Expr::name("bool"),
                ])
            )
        );
    }

    #[test]
    fn lower_forward_reference() {
        assert_eq!(
            parse_expr("List[~Node]").unwrap(),
            Expr::subscript(Expr::name("List"), Expr::forward_ref(Expr::name("Node")))
        );
    }

    #[test]
    fn lower_not_is_its_operand() {
        assert_eq!(
            parse_expr("Optional[not int]").unwrap(),
            Expr::subscript(Expr::name("Optional"), Expr::name("int"))
        );
        assert_eq!(parse_expr("not ~Node").unwrap(), parse_expr("~Node").unwrap());
    }

    #[test]
    fn lower_with_whitespace() {
        assert_eq!(
            parse_expr("  Dict[ str ,int ] ").unwrap(),
            parse_expr("Dict[str,int]").unwrap()
        );
    }

    #[test]
    fn parse_expr_returns_first_error() {
        let error = parse_expr("Dict[str,,int]").unwrap_err();
        assert_eq!(error.offset, 9);
    }

    #[test]
    fn kind_names() {
        assert_eq!(Expr::Ellipsis.kind_name(), "ellipsis");
        assert_eq!(Expr::name("x").kind_name(), "name");
        assert_eq!(
            Expr::forward_ref(Expr::name("x")).kind_name(),
            "forward reference"
        );
    }
}

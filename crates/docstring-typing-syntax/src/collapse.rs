//! Collapses chained attribute access into single qualified names.
//!
//! ```text
//! Attribute(Attribute(Attribute(Name("google"), "auth"), "credentials"), "Credentials")
//! ```
//!
//! becomes
//!
//! ```text
//! Name("google.auth.credentials.Credentials")
//! ```
//!
//! which the renderer can wrap in a single reference. Collapsing is bottom-up,
//! so chains inside subscript arguments, tuples and forward references are
//! handled independently of their parents. An attribute whose object is not
//! a pure chain (`List[int].attr`) is left as an attribute.

use crate::ast::Expr;

/// Rewrite every dotted-name chain in `expr` into one [`Expr::Name`].
pub fn collapse_attributes(expr: Expr) -> Expr {
    match expr {
        Expr::Attribute { object, attr } => match collapse_attributes(*object) {
            Expr::Name(id) => Expr::Name(format!("{id}.{attr}")),
            object => Expr::Attribute {
                object: Box::new(object),
                attr,
            },
        },
        Expr::Subscript { object, argument } => Expr::Subscript {
            object: Box::new(collapse_attributes(*object)),
            argument: Box::new(collapse_attributes(*argument)),
        },
        Expr::Tuple(elements) => Expr::Tuple(elements.into_iter().map(collapse_attributes).collect()),
        Expr::List(elements) => Expr::List(elements.into_iter().map(collapse_attributes).collect()),
        Expr::ForwardRef(operand) => Expr::ForwardRef(Box::new(collapse_attributes(*operand))),
        leaf @ (Expr::Name(_) | Expr::Ellipsis) => leaf,
    }
}

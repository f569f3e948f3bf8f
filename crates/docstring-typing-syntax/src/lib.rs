//! # docstring-typing-syntax
//!
//! Parsing for PEP 484 type annotations as they appear in docstring text,
//! using [Rowan] + [Logos] in the [rust-analyzer] style.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## Pipeline
//!
//! ```text
//! "Dict[str, Any]" → Lexer → Tokens → Parser → Events → Sink → Rowan CST
//!                    (Logos)          (Grammar)        (GreenNodeBuilder)
//!
//! Rowan CST → Expr::lower → Expr → collapse_attributes → Expr
//! ```
//!
//! The CST is lossless and error tolerant: it covers every byte even for
//! garbage input, and errors are collected on the side. [`parse_expr`] is the
//! strict entry point; it fails with the first [`ParseError`] and otherwise
//! hands back an owned [`Expr`].
//!
//! Only a small expression language is accepted: names, dotted access,
//! subscripts with one or more arguments, tuples, bracketed parameter lists,
//! `...`, the `~` forward reference marker and a `not` prefix that reads as
//! its operand. Anything else (numbers, strings, other operators, calls) is
//! a [`ParseError`], and so is nesting deeper than [`parser::MAX_DEPTH`].
//!
//! ## Module Structure
//!
//! ```text
//! docstring-typing-syntax/
//! ├── lib.rs           # This file - public API and CST snapshot tests
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── lexer.rs         # Logos-based tokenizer
//! ├── ast.rs           # Expr and CST lowering
//! ├── collapse.rs      # Dotted-name chain collapsing
//! └── parser/
//!     ├── mod.rs       # Parser struct, Marker system, parse()
//!     ├── event.rs     # Event enum
//!     ├── sink.rs      # Events to Rowan GreenNode
//!     └── grammar/     # Root and expression rules
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use docstring_typing_syntax::{Expr, collapse_attributes, parse_expr};
//!
//! let expr = collapse_attributes(parse_expr("Optional[google.auth.Credentials]").unwrap());
//! assert_eq!(
//!     expr,
//!     Expr::subscript(Expr::name("Optional"), Expr::name("google.auth.Credentials"))
//! );
//! ```

pub mod ast;
pub mod collapse;
pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use ast::{Expr, parse_expr};
pub use collapse::collapse_attributes;
pub use parser::{Parse, ParseError, parse};
pub use syntax_kind::{AnnotationLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

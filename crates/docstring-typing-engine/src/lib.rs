//! # docstring-typing-engine
//!
//! Finds PEP 484 annotations in docstring lines and rewrites them as Sphinx
//! cross-reference markup.
//!
//! ```text
//! line → Locator → annotation text → parse_expr → collapse_attributes → Renderer → markup
//!        (regex)                     (syntax crate)                     (vocabulary)
//! ```
//!
//! [`Rewriter`] runs the whole pipeline over a buffer of lines and reports
//! failures per line; [`transform`] handles a single annotation. The
//! [`hook`] module connects a rewriter to a documentation host.
//!
//! ```
//! use docstring_typing_engine::Rewriter;
//!
//! let mut lines = vec!["items (*Sequence[int]*): things".to_string()];
//! let report = Rewriter::standard().rewrite_lines("pkg.func", &mut lines);
//! assert!(report.is_clean());
//! assert_eq!(lines[0], "items (:py:obj:`~typing.Sequence` [ :py:obj:`int` ] ): things");
//! ```

pub mod hook;
pub mod locator;
pub mod render;
pub mod rewriter;
pub mod transform;
pub mod vocabulary;

pub use hook::{
    DocstringContext, DocstringListener, DocumentationHost, HookRegistry,
    PROCESS_DOCSTRING_EVENT, process_docstring, setup, setup_with,
};
pub use locator::{BracketMatching, Located, Locator, LocatorError, Pass};
pub use render::{MarkupStyle, RenderError, Renderer};
pub use rewriter::{
    LineFailure, LineOutcome, RewriteError, RewriteOptions, RewriteReport, Rewriter,
};
pub use transform::{TransformError, Transformer, transform};
pub use vocabulary::{Vocabulary, VocabularyError};

pub use docstring_typing_syntax::ParseError;

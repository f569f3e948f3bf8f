//! Rewrites every located annotation on every line of a docstring.
//!
//! Each line goes through two passes: argument-taking annotations first,
//! then bare names on the partly rewritten text. A failing annotation
//! stops its pass; the line keeps whatever the earlier pass produced and a
//! [`LineFailure`] is recorded. Other lines are unaffected.

use std::sync::OnceLock;

use crate::locator::{BracketMatching, Locator, LocatorError, Pass};
use crate::render::MarkupStyle;
use crate::transform::{TransformError, Transformer};
use crate::vocabulary::Vocabulary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    pub bracket_matching: BracketMatching,
    /// Characters that may wrap an annotation and are dropped with it
    pub decorations: String,
    pub style: MarkupStyle,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            bracket_matching: BracketMatching::default(),
            decorations: "*".to_string(),
            style: MarkupStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot rewrite {pass} annotation `{annotation}`: {source}")]
pub struct RewriteError {
    pub pass: Pass,
    pub annotation: String,
    #[source]
    pub source: TransformError,
}

/// What happened to one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Unchanged,
    Rewritten(String),
    /// `partial` holds the argument-taking pass result when only the bare
    /// pass failed and the first pass changed something.
    Failed {
        partial: Option<String>,
        error: RewriteError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFailure {
    /// Zero-based line index in the buffer
    pub index: usize,
    /// The line as it was before rewriting
    pub line: String,
    pub error: RewriteError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Number of lines whose text changed
    pub rewritten: usize,
    pub failures: Vec<LineFailure>,
}

impl RewriteReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Rewriter {
    locator: Locator,
    transformer: Transformer,
}

impl Rewriter {
    pub fn new(vocabulary: Vocabulary, options: RewriteOptions) -> Result<Self, LocatorError> {
        let locator = Locator::new(&vocabulary, &options.decorations, options.bracket_matching)?;
        Ok(Self {
            locator,
            transformer: Transformer::new(vocabulary, options.style),
        })
    }

    /// Standard vocabulary with default options.
    pub fn standard() -> &'static Rewriter {
        static STANDARD: OnceLock<Rewriter> = OnceLock::new();
        STANDARD.get_or_init(|| {
            Rewriter::new(Vocabulary::standard().clone(), RewriteOptions::default())
                .expect("standard vocabulary must produce valid patterns")
        })
    }

    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }

    pub fn transform(&self, annotation: &str) -> Result<String, TransformError> {
        self.transformer.transform(annotation)
    }

    pub fn rewrite_line(&self, line: &str) -> LineOutcome {
        let after_arguments = match self.rewrite_pass(line, Pass::ArgumentTaking) {
            Ok(text) => text,
            Err(error) => {
                return LineOutcome::Failed {
                    partial: None,
                    error,
                };
            }
        };

        match self.rewrite_pass(&after_arguments, Pass::Bare) {
            Ok(text) if text == line => LineOutcome::Unchanged,
            Ok(text) => LineOutcome::Rewritten(text),
            Err(error) => LineOutcome::Failed {
                partial: (after_arguments != line).then_some(after_arguments),
                error,
            },
        }
    }

    /// Rewrite `lines` in place. `name` labels the diagnostics.
    pub fn rewrite_lines(&self, name: &str, lines: &mut [String]) -> RewriteReport {
        let mut report = RewriteReport::default();

        for (index, line) in lines.iter_mut().enumerate() {
            let new_line = match self.rewrite_line(line) {
                LineOutcome::Unchanged => continue,
                LineOutcome::Rewritten(new_line) => new_line,
                LineOutcome::Failed { partial, error } => {
                    log::warn!("Un-parseable line in docstring:\n\t> {line}\n\nError: {error}");
                    report.failures.push(LineFailure {
                        index,
                        line: line.clone(),
                        error,
                    });
                    match partial {
                        Some(new_line) => new_line,
                        None => continue,
                    }
                }
            };

            log::debug!("docstring line for {name} replaced:\n\t> {line}\n\t> {new_line}");
            *line = new_line;
            report.rewritten += 1;
        }

        report
    }

    fn rewrite_pass(&self, line: &str, pass: Pass) -> Result<String, RewriteError> {
        let mut output = String::with_capacity(line.len());
        let mut last = 0;

        for located in self.locator.locate(line, pass) {
            let annotation = located.annotation(line);
            let markup = self
                .transformer
                .transform(annotation)
                .map_err(|source| RewriteError {
                    pass,
                    annotation: annotation.to_string(),
                    source,
                })?;
            output.push_str(&line[last..located.span.start]);
            output.push_str(&markup);
            last = located.span.end;
        }

        output.push_str(&line[last..]);
        Ok(output)
    }
}

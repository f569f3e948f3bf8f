//! Annotation text in, cross-reference markup out.

use std::sync::OnceLock;

use docstring_typing_syntax::{ParseError, collapse_attributes, parse_expr};

use crate::render::{MarkupStyle, RenderError, Renderer};
use crate::vocabulary::Vocabulary;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("invalid annotation: {0}")]
    Parse(#[from] ParseError),
    #[error("cannot render annotation: {0}")]
    Render(#[from] RenderError),
}

/// Parses, collapses and renders single annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformer {
    vocabulary: Vocabulary,
    style: MarkupStyle,
}

impl Transformer {
    pub fn new(vocabulary: Vocabulary, style: MarkupStyle) -> Self {
        Self { vocabulary, style }
    }

    /// The transformer behind [`transform`].
    pub fn standard() -> &'static Transformer {
        static STANDARD: OnceLock<Transformer> = OnceLock::new();
        STANDARD.get_or_init(|| {
            Transformer::new(Vocabulary::standard().clone(), MarkupStyle::default())
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn style(&self) -> &MarkupStyle {
        &self.style
    }

    pub fn transform(&self, annotation: &str) -> Result<String, TransformError> {
        let expr = collapse_attributes(parse_expr(annotation)?);
        Ok(Renderer::new(&self.vocabulary, &self.style).render(&expr)?)
    }
}

/// Transform a PEP 484 annotation into Sphinx references using the standard
/// vocabulary and the `py:obj` role.
///
/// ```
/// use docstring_typing_engine::transform;
///
/// assert_eq!(
///     transform("Sequence[int]").unwrap(),
///     ":py:obj:`~typing.Sequence` [ :py:obj:`int` ] "
/// );
/// ```
pub fn transform(annotation: &str) -> Result<String, TransformError> {
    Transformer::standard().transform(annotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Any", ":py:obj:`~typing.Any`")]
    #[case("Sequence[int]", ":py:obj:`~typing.Sequence` [ :py:obj:`int` ] ")]
    #[case(
        "Tuple[int, int]",
        ":py:obj:`~typing.Tuple` [ :py:obj:`int`, :py:obj:`int` ] "
    )]
    #[case(
        "Sequence[int, List[str]]",
        ":py:obj:`~typing.Sequence` [ :py:obj:`int`, :py:obj:`~typing.List` [ :py:obj:`str` ]  ] "
    )]
    #[case("Tuple[int,...]", ":py:obj:`~typing.Tuple` [ :py:obj:`int`, ... ] ")]
    #[case(
        "Mapping[str, Any]",
        ":py:obj:`~typing.Mapping` [ :py:obj:`str`, :py:obj:`~typing.Any` ] "
    )]
    #[case("Optional[datetime]", ":py:obj:`~typing.Optional` [ :py:obj:`datetime` ] ")]
    #[case(
        "Optional[google.auth.credentials.Credentials]",
        ":py:obj:`~typing.Optional` [ :py:obj:`google.auth.credentials.Credentials` ] "
    )]
    #[case("Tuple[int,]", ":py:obj:`~typing.Tuple` [ :py:obj:`int` ] ")]
    #[case("Optional[not int]", ":py:obj:`~typing.Optional` [ :py:obj:`int` ] ")]
    #[case("not Any", ":py:obj:`~typing.Any`")]
    fn transforms(#[case] annotation: &str, #[case] expected: &str) {
        assert_eq!(transform(annotation).unwrap(), expected);
    }

    #[test]
    fn every_bare_type_renders_namespaced() {
        for name in Vocabulary::standard().bare_types() {
            assert_eq!(
                transform(name).unwrap(),
                format!(":py:obj:`~typing.{name}`")
            );
        }
    }

    #[test]
    fn every_argument_type_wraps_its_argument() {
        for name in Vocabulary::standard().argument_types() {
            assert_eq!(
                transform(&format!("{name}[Foo]")).unwrap(),
                format!(":py:obj:`~typing.{name}` [ :py:obj:`Foo` ] ")
            );
        }
    }

    #[test]
    fn parse_failure_is_reported() {
        assert!(matches!(
            transform("List[[int]"),
            Err(TransformError::Parse(_))
        ));
    }

    #[test]
    fn render_failure_is_reported() {
        assert!(matches!(
            transform("~List[int]"),
            Err(TransformError::Render(_))
        ));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            transform("Dict[str").unwrap_err().to_string(),
            "invalid annotation: expected `]` at offset 8"
        );
        assert_eq!(
            transform("~Dict[str]").unwrap_err().to_string(),
            "cannot render annotation: `~` must mark a name, found a subscript"
        );
    }
}

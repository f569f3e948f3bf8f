//! SyntaxKind enum for all tokens and nodes in the annotation CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the annotation CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Spaces, tabs and line breaks
    WHITESPACE,
    /// Identifier such as `Sequence` or `datetime`
    IDENT,
    /// `.` between the parts of a dotted name
    DOT,
    /// `...` literal
    ELLIPSIS,
    /// `,` between subscript or tuple elements
    COMMA,
    /// `[` opening a subscript or a parameter list
    LBRACKET,
    /// `]`
    RBRACKET,
    /// `(` opening a group or tuple
    LPAREN,
    /// `)`
    RPAREN,
    /// `~` forward reference marker
    TILDE,
    /// `not` keyword
    NOT_KW,
    /// Any character outside the annotation grammar
    UNKNOWN,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root node wrapping a single expression
    ROOT,
    /// Bare identifier
    NAME_EXPR,
    /// `object.attr`
    ATTR_EXPR,
    /// `object[argument]`
    SUBSCRIPT_EXPR,
    /// Comma separated elements, with or without parentheses
    TUPLE_EXPR,
    /// Parenthesised single expression
    PAREN_EXPR,
    /// Bracketed parameter list (`[int, str]` in `Callable[[int, str], bool]`)
    LIST_EXPR,
    /// `...`
    ELLIPSIS_EXPR,
    /// `~operand`
    FORWARD_REF_EXPR,
    /// `not operand`
    NOT_EXPR,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind is trivia.
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnnotationLang {}

impl rowan::Language for AnnotationLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<AnnotationLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<AnnotationLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<AnnotationLang>;

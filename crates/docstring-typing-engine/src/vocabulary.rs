//! The set of type-hint names the locator looks for and the renderer
//! resolves under the `typing` namespace.
//!
//! Names fall into two disjoint groups:
//!
//! - **argument-taking** types are only recognised in docstring text when
//!   followed by `[...]` (`Sequence[int]`, `Optional[str]`)
//! - **bare** types are recognised on their own (`Any`, `Text`)
//!
//! The standard vocabulary is built once from the public names of Python's
//! `typing` module and shared through [`Vocabulary::standard`].

use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Public names exported by Python's `typing` module.
const TYPING_EXPORTS: &[&str] = &[
    "AbstractSet",
    "Annotated",
    "Any",
    "AnyStr",
    "AsyncContextManager",
    "AsyncGenerator",
    "AsyncIterable",
    "AsyncIterator",
    "Awaitable",
    "BinaryIO",
    "ByteString",
    "Callable",
    "ChainMap",
    "ClassVar",
    "Collection",
    "Concatenate",
    "Container",
    "ContextManager",
    "Coroutine",
    "Counter",
    "DefaultDict",
    "Deque",
    "Dict",
    "Final",
    "ForwardRef",
    "FrozenSet",
    "Generator",
    "Generic",
    "Hashable",
    "IO",
    "ItemsView",
    "Iterable",
    "Iterator",
    "KeysView",
    "List",
    "Literal",
    "LiteralString",
    "Mapping",
    "MappingView",
    "Match",
    "MutableMapping",
    "MutableSequence",
    "MutableSet",
    "NamedTuple",
    "Never",
    "NewType",
    "NoReturn",
    "NotRequired",
    "Optional",
    "OrderedDict",
    "ParamSpec",
    "ParamSpecArgs",
    "ParamSpecKwargs",
    "Pattern",
    "Protocol",
    "Required",
    "Reversible",
    "Self",
    "Sequence",
    "Set",
    "Sized",
    "SupportsAbs",
    "SupportsBytes",
    "SupportsComplex",
    "SupportsFloat",
    "SupportsIndex",
    "SupportsInt",
    "SupportsRound",
    "TYPE_CHECKING",
    "Text",
    "TextIO",
    "Tuple",
    "Type",
    "TypeAlias",
    "TypeGuard",
    "TypeVar",
    "TypeVarTuple",
    "TypedDict",
    "Union",
    "Unpack",
    "ValuesView",
    "assert_never",
    "assert_type",
    "cast",
    "clear_overloads",
    "dataclass_transform",
    "final",
    "get_args",
    "get_origin",
    "get_overloads",
    "get_type_hints",
    "is_typeddict",
    "no_type_check",
    "no_type_check_decorator",
    "overload",
    "override",
    "reveal_type",
    "runtime_checkable",
];

/// Exports that are helpers rather than annotations.
const HELPER_NAMES: &[&str] = &[
    "NewType",
    "TYPE_CHECKING",
    "assert_never",
    "assert_type",
    "cast",
    "clear_overloads",
    "dataclass_transform",
    "final",
    "get_args",
    "get_origin",
    "get_overloads",
    "get_type_hints",
    "is_typeddict",
    "no_type_check",
    "no_type_check_decorator",
    "overload",
    "override",
    "reveal_type",
    "runtime_checkable",
];

/// Type hints that never take arguments.
const BARE_TYPES: &[&str] = &["Any", "Text", "Hashable", "Sized", "ByteString", "AnyStr"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VocabularyError {
    #[error("`{0}` is not a valid type name")]
    InvalidName(String),
    #[error("`{0}` cannot be both an argument-taking and a bare type")]
    Overlap(String),
}

/// Two disjoint sets of recognised type-hint names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    argument_types: BTreeSet<String>,
    bare_types: BTreeSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary, rejecting invalid identifiers and names listed in
    /// both sets.
    pub fn new<A, B, S>(argument_types: A, bare_types: B) -> Result<Self, VocabularyError>
    where
        A: IntoIterator<Item = S>,
        B: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argument_types = validated(argument_types)?;
        let bare_types = validated(bare_types)?;
        if let Some(name) = argument_types.intersection(&bare_types).next() {
            return Err(VocabularyError::Overlap(name.clone()));
        }
        Ok(Self {
            argument_types,
            bare_types,
        })
    }

    /// The vocabulary derived from Python's `typing` module.
    pub fn standard() -> &'static Vocabulary {
        static STANDARD: OnceLock<Vocabulary> = OnceLock::new();
        STANDARD.get_or_init(|| Vocabulary {
            argument_types: TYPING_EXPORTS
                .iter()
                .filter(|name| !HELPER_NAMES.contains(*name) && !BARE_TYPES.contains(*name))
                .map(|name| name.to_string())
                .collect(),
            bare_types: BARE_TYPES.iter().map(|name| name.to_string()).collect(),
        })
    }

    /// Add argument-taking names. A name that was bare moves over.
    pub fn with_argument_types<I, S>(mut self, names: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in validated(names)? {
            self.bare_types.remove(&name);
            self.argument_types.insert(name);
        }
        Ok(self)
    }

    /// Add bare names. A name that was argument-taking moves over.
    pub fn with_bare_types<I, S>(mut self, names: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in validated(names)? {
            self.argument_types.remove(&name);
            self.bare_types.insert(name);
        }
        Ok(self)
    }

    /// Drop names from both sets. Unknown names are ignored.
    pub fn without<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.argument_types.remove(name.as_ref());
            self.bare_types.remove(name.as_ref());
        }
        self
    }

    pub fn argument_types(&self) -> impl Iterator<Item = &str> {
        self.argument_types.iter().map(String::as_str)
    }

    pub fn bare_types(&self) -> impl Iterator<Item = &str> {
        self.bare_types.iter().map(String::as_str)
    }

    pub fn is_argument_type(&self, name: &str) -> bool {
        self.argument_types.contains(name)
    }

    pub fn is_bare_type(&self, name: &str) -> bool {
        self.bare_types.contains(name)
    }

    /// Whether `name` is a recognised type-hint name of either kind.
    pub fn contains(&self, name: &str) -> bool {
        self.is_argument_type(name) || self.is_bare_type(name)
    }
}

fn validated<I, S>(names: I) -> Result<BTreeSet<String>, VocabularyError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(|name| {
            let name: String = name.into();
            if is_identifier(&name) {
                Ok(name)
            } else {
                Err(VocabularyError::InvalidName(name))
            }
        })
        .collect()
}

/// Names end up inside regex alternations, so only plain ASCII identifiers
/// are accepted.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn standard_sets_are_disjoint() {
        let vocabulary = Vocabulary::standard();
        for name in vocabulary.bare_types() {
            assert!(!vocabulary.is_argument_type(name), "{name} is in both sets");
        }
    }

    #[test]
    fn standard_bare_types() {
        let bare: Vec<_> = Vocabulary::standard().bare_types().collect();
        assert_eq!(
            bare,
            vec!["Any", "AnyStr", "ByteString", "Hashable", "Sized", "Text"]
        );
    }

    #[rstest]
    #[case("Sequence")]
    #[case("Optional")]
    #[case("Tuple")]
    #[case("Callable")]
    #[case("Dict")]
    fn standard_argument_types(#[case] name: &str) {
        assert!(Vocabulary::standard().is_argument_type(name));
    }

    #[rstest]
    #[case("cast")]
    #[case("get_type_hints")]
    #[case("NewType")]
    #[case("no_type_check")]
    #[case("no_type_check_decorator")]
    #[case("overload")]
    #[case("TYPE_CHECKING")]
    fn helpers_are_excluded(#[case] name: &str) {
        assert!(!Vocabulary::standard().contains(name));
    }

    #[test]
    fn new_rejects_overlap() {
        let result = Vocabulary::new(["List", "Any"], ["Any"]);
        assert_eq!(result, Err(VocabularyError::Overlap("Any".to_string())));
    }

    #[rstest]
    #[case("Foo|Bar")]
    #[case("List[int]")]
    #[case("1st")]
    #[case("")]
    #[case("a.b")]
    fn new_rejects_invalid_names(#[case] name: &str) {
        let result = Vocabulary::new([name], []);
        assert_eq!(result, Err(VocabularyError::InvalidName(name.to_string())));
    }

    #[test]
    fn with_bare_types_moves_names() {
        let vocabulary = Vocabulary::new(["List", "Never"], ["Any"])
            .unwrap()
            .with_bare_types(["Never"])
            .unwrap();
        assert!(vocabulary.is_bare_type("Never"));
        assert!(!vocabulary.is_argument_type("Never"));
    }

    #[test]
    fn with_argument_types_adds_names() {
        let vocabulary = Vocabulary::standard()
            .clone()
            .with_argument_types(["Shaped"])
            .unwrap();
        assert!(vocabulary.is_argument_type("Shaped"));
        assert!(vocabulary.contains("Shaped"));
    }

    #[test]
    fn without_removes_from_both_sets() {
        let vocabulary = Vocabulary::standard().clone().without(["Text", "List"]);
        assert!(!vocabulary.contains("Text"));
        assert!(!vocabulary.contains("List"));
        assert!(vocabulary.contains("Dict"));
    }
}

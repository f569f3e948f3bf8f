//! Finds annotation-shaped substrings in a line of docstring text.
//!
//! Two patterns are built from a [`Vocabulary`]:
//!
//! - the **argument-taking** pattern matches a known name immediately followed
//!   by a bracketed group, e.g. `Sequence[int]`
//! - the **bare** pattern matches a known bare name that is not followed by
//!   `[` or a backtick (optionally after one space) and does not sit inside
//!   a backtick-quoted span, e.g. `Any`
//!
//! Either may be wrapped in a single decoration character on each side
//! (`*Optional[datetime]*`). The decoration is part of the replaced span but
//! not of the annotation handed to the parser.
//!
//! Both patterns anchor the name on a word boundary, and the bare pattern on
//! both sides, so `MyList[int]` and `AnyStr` never match `List` or `Any`.
//! Markup produced by an earlier pass, such as `` :py:obj:`foo.Any.Bar` ``,
//! is never located again.

use std::fmt;
use std::ops::Range;

use regex::Regex;

use crate::vocabulary::Vocabulary;

/// Where the bracketed group of an argument-taking annotation ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BracketMatching {
    /// At the rightmost `]` on the line. Two annotations on one line are
    /// matched as a single span.
    #[default]
    Greedy,
    /// At the `]` that closes the opening bracket. Unbalanced candidates are
    /// not matched.
    Balanced,
}

/// The two substitution passes run on every line, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    ArgumentTaking,
    Bare,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::ArgumentTaking => f.write_str("argument-taking"),
            Pass::Bare => f.write_str("bare"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    #[error("decoration character {0:?} must not be part of an identifier")]
    InvalidDecoration(char),
    #[error("failed to compile {pass} pattern: {source}")]
    Pattern {
        pass: Pass,
        #[source]
        source: regex::Error,
    },
}

/// One located annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// Byte range to replace, decorations included
    pub span: Range<usize>,
    /// Byte range of the annotation text itself
    pub annotation: Range<usize>,
}

impl Located {
    pub fn annotation<'a>(&self, line: &'a str) -> &'a str {
        &line[self.annotation.clone()]
    }
}

/// Compiled locator patterns for one vocabulary.
///
/// A pass whose name set is empty never matches.
#[derive(Debug, Clone)]
pub struct Locator {
    argument_pattern: Option<Regex>,
    bare_pattern: Option<Regex>,
    bracket_matching: BracketMatching,
    decorations: Vec<char>,
}

impl Locator {
    pub fn new(
        vocabulary: &Vocabulary,
        decorations: &str,
        bracket_matching: BracketMatching,
    ) -> Result<Self, LocatorError> {
        let decorations: Vec<char> = decorations.chars().collect();
        if let Some(&c) = decorations
            .iter()
            .find(|c| c.is_alphanumeric() || **c == '_')
        {
            return Err(LocatorError::InvalidDecoration(c));
        }
        let deco = decoration_class(&decorations);

        let argument_pattern = alternation(vocabulary.argument_types())
            .map(|names| {
                let pattern = match bracket_matching {
                    BracketMatching::Greedy => {
                        format!(r"{deco}\b(?P<annotation>(?:{names})\[.+\]){deco}")
                    }
                    // Only the opening bracket; the closing one is found by scanning.
                    BracketMatching::Balanced => format!(r"{deco}\b(?P<annotation>{names})\["),
                };
                compile(&pattern, Pass::ArgumentTaking)
            })
            .transpose()?;

        let bare_pattern = alternation(vocabulary.bare_types())
            .map(|names| {
                let pattern = format!(r"{deco}\b(?P<annotation>{names})\b{deco}");
                compile(&pattern, Pass::Bare)
            })
            .transpose()?;

        Ok(Self {
            argument_pattern,
            bare_pattern,
            bracket_matching,
            decorations,
        })
    }

    pub fn bracket_matching(&self) -> BracketMatching {
        self.bracket_matching
    }

    /// All non-overlapping matches of `pass` on `line`, left to right.
    pub fn locate(&self, line: &str, pass: Pass) -> Vec<Located> {
        match pass {
            Pass::ArgumentTaking => match (&self.argument_pattern, self.bracket_matching) {
                (None, _) => Vec::new(),
                (Some(pattern), BracketMatching::Greedy) => all_matches(pattern, line).collect(),
                (Some(pattern), BracketMatching::Balanced) => self.locate_balanced(pattern, line),
            },
            Pass::Bare => match &self.bare_pattern {
                None => Vec::new(),
                Some(pattern) => all_matches(pattern, line)
                    .filter(|located| {
                        !opens_argument_list(&line[located.annotation.end..])
                            && !inside_backticks(&line[..located.span.start])
                    })
                    .collect(),
            },
        }
    }

    fn locate_balanced(&self, pattern: &Regex, line: &str) -> Vec<Located> {
        let mut found = Vec::new();
        let mut from = 0;

        while let Some(caps) = pattern.captures_at(line, from) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.name("annotation")) else {
                break;
            };
            match closing_bracket(line, whole.end()) {
                Some(close) => {
                    let annotation_end = close + 1;
                    let end = annotation_end + self.trailing_decoration_len(&line[annotation_end..]);
                    found.push(Located {
                        span: whole.start()..end,
                        annotation: name.start()..annotation_end,
                    });
                    from = end;
                }
                None => from = whole.end(),
            }
        }

        found
    }

    fn trailing_decoration_len(&self, rest: &str) -> usize {
        match rest.chars().next() {
            Some(c) if self.decorations.contains(&c) => c.len_utf8(),
            _ => 0,
        }
    }
}

fn all_matches<'a>(pattern: &'a Regex, line: &'a str) -> impl Iterator<Item = Located> + 'a {
    pattern.captures_iter(line).filter_map(|caps| {
        let whole = caps.get(0)?;
        let annotation = caps.name("annotation")?;
        Some(Located {
            span: whole.range(),
            annotation: annotation.range(),
        })
    })
}

/// Longest names first, so a name never loses to one of its prefixes.
fn alternation<'a>(names: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut names: Vec<&str> = names.collect();
    if names.is_empty() {
        return None;
    }
    names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    Some(
        names
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|"),
    )
}

fn decoration_class(decorations: &[char]) -> String {
    if decorations.is_empty() {
        return String::new();
    }
    let escaped: String = decorations
        .iter()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect();
    format!("[{escaped}]?")
}

fn compile(pattern: &str, pass: Pass) -> Result<Regex, LocatorError> {
    Regex::new(pattern).map_err(|source| LocatorError::Pattern { pass, source })
}

/// Index of the `]` closing a bracket opened just before `start`.
fn closing_bracket(line: &str, start: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, c) in line[start..].char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// `[`, ` [`, `` ` `` or `` ` `` right after a bare name means it is not
/// a bare annotation (or was already rewritten).
fn opens_argument_list(rest: &str) -> bool {
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    rest.starts_with('[') || rest.starts_with('`')
}

/// An odd number of backticks before a position leaves it inside a role or
/// literal.
fn inside_backticks(before: &str) -> bool {
    before.matches('`').count() % 2 == 1
}

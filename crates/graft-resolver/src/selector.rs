//! Version selectors: the parsed form of a version constraint string.
//!
//! Parsing tries each form in a fixed order and the first match wins:
//!
//! 1. ranges: `[1.0,2.0]`, `[1.0,2.0)`, `(,2.0]`, `[1.0,)`, `]1.0,2.0[`, `[1.5]`
//! 2. sub-versions: `1.2.+`, `1.2+`, `+`
//! 3. status selectors: `latest.release`
//! 4. everything else is an exact version
//!
//! A string that opens with a range bracket is always parsed as a range.
//! Malformed ranges are errors and never fall back to an exact match.

use std::cmp::Ordering;
use std::fmt;

use graft_core::status::StatusScale;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::version;

const LATEST_PREFIX: &str = "latest.";

/// Error raised when a constraint string cannot be parsed.
#[derive(Debug, Error, Diagnostic)]
pub enum SelectorError {
    #[error("Invalid version selector '{selector}': {reason} at '{offending}'")]
    #[diagnostic(
        code(graft::selector::syntax),
        help("ranges are written like [1.0,2.0), (,2.0] or [1.0,)")
    )]
    Syntax {
        #[source_code]
        selector: String,
        offending: String,
        reason: String,
        #[label("invalid here")]
        span: SourceSpan,
    },
}

impl SelectorError {
    fn syntax(selector: &str, start: usize, end: usize, reason: &str) -> Self {
        Self::Syntax {
            selector: selector.to_string(),
            offending: selector[start..end].to_string(),
            reason: reason.to_string(),
            span: (start, end - start).into(),
        }
    }
}

/// One end of a version range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bound {
    pub version: String,
    pub inclusive: bool,
}

/// A parsed version constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionSelector {
    Exact(String),
    /// `None` on either side means unbounded.
    Range {
        lower: Option<Bound>,
        upper: Option<Bound>,
    },
    /// Matches versions starting with the prefix. A non-empty prefix always
    /// ends in `.`.
    SubVersion(String),
    /// Matches components whose declared status is at least this one.
    Latest(String),
}

/// A version offered to a selector, with the component's declared status
/// when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub version: &'a str,
    pub status: Option<&'a str>,
}

impl<'a> Candidate<'a> {
    pub fn new(version: &'a str) -> Self {
        Self {
            version,
            status: None,
        }
    }

    pub fn with_status(version: &'a str, status: &'a str) -> Self {
        Self {
            version,
            status: Some(status),
        }
    }
}

impl VersionSelector {
    pub fn parse(selector: &str) -> Result<Self, SelectorError> {
        if selector.starts_with(['[', '(', ']']) {
            return parse_range(selector);
        }
        if let Some(prefix) = selector.strip_suffix('+') {
            let prefix = prefix.trim_end_matches(|c: char| !c.is_alphanumeric());
            if prefix.is_empty() {
                return Ok(Self::SubVersion(String::new()));
            }
            return Ok(Self::SubVersion(format!("{prefix}.")));
        }
        if let Some(status) = selector.strip_prefix(LATEST_PREFIX) {
            return Ok(Self::Latest(status.to_string()));
        }
        Ok(Self::Exact(selector.to_string()))
    }

    /// Whether `candidate` satisfies this selector.
    ///
    /// `scale` is only consulted by `Latest` selectors. Its lowest status is
    /// satisfied by every candidate, including ones without a status.
    pub fn accept(&self, candidate: &Candidate<'_>, scale: &StatusScale) -> bool {
        match self {
            Self::Exact(version) => candidate.version == version,
            Self::Range { lower, upper } => {
                let version = version::Version::parse(candidate.version);
                let above = lower.as_ref().map_or(true, |bound| {
                    match version.cmp(&version::Version::parse(&bound.version)) {
                        Ordering::Greater => true,
                        Ordering::Equal => bound.inclusive,
                        Ordering::Less => false,
                    }
                });
                let below = upper.as_ref().map_or(true, |bound| {
                    match version.cmp(&version::Version::parse(&bound.version)) {
                        Ordering::Less => true,
                        Ordering::Equal => bound.inclusive,
                        Ordering::Greater => false,
                    }
                });
                above && below
            }
            Self::SubVersion(prefix) => candidate.version.starts_with(prefix.as_str()),
            Self::Latest(status) => match scale.rank(status) {
                None => false,
                Some(0) => true,
                Some(requested) => candidate
                    .status
                    .and_then(|s| scale.rank(s))
                    .is_some_and(|rank| rank >= requested),
            },
        }
    }

    /// [`accept`](Self::accept) for a bare version against the default scale.
    pub fn accept_version(&self, version: &str) -> bool {
        self.accept(&Candidate::new(version), &StatusScale::default())
    }

    /// Order two candidate versions. Every selector prefers the newest.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        version::compare(a, b)
    }

    /// `false` only for exact versions.
    pub fn is_dynamic(&self) -> bool {
        !matches!(self, Self::Exact(_))
    }

    /// Whether matching needs component metadata rather than just a version.
    pub fn requires_metadata(&self) -> bool {
        matches!(self, Self::Latest(_))
    }

    /// Whether at most one version string can ever match.
    pub fn matches_unique_version(&self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

impl fmt::Display for VersionSelector {
    /// Renders the canonical source string, which parses back to `self`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(version) => f.write_str(version),
            Self::Range { lower, upper } => {
                match lower {
                    Some(b) if b.inclusive => write!(f, "[{}", b.version)?,
                    Some(b) => write!(f, "({}", b.version)?,
                    None => f.write_str("(")?,
                }
                f.write_str(",")?;
                match upper {
                    Some(b) if b.inclusive => write!(f, "{}]", b.version),
                    Some(b) => write!(f, "{})", b.version),
                    None => f.write_str(")"),
                }
            }
            Self::SubVersion(prefix) => write!(f, "{prefix}+"),
            Self::Latest(status) => write!(f, "{LATEST_PREFIX}{status}"),
        }
    }
}

fn is_bracket(c: char) -> bool {
    matches!(c, '[' | ']' | '(' | ')')
}

fn parse_range(selector: &str) -> Result<VersionSelector, SelectorError> {
    // A single `+` after the closing bracket is tolerated.
    let body = selector.strip_suffix('+').unwrap_or(selector);

    let lower_inclusive = body.starts_with('[');
    if body.len() < 2 || !body.ends_with([']', ')', '[']) {
        return Err(match body[1..].rfind(is_bracket) {
            Some(pos) => {
                SelectorError::syntax(selector, pos + 2, body.len(), "unexpected text after range")
            }
            None => SelectorError::syntax(selector, 0, body.len(), "missing closing bracket"),
        });
    }
    let upper_inclusive = body.ends_with(']');
    let inner = &body[1..body.len() - 1];

    if let Some(pos) = inner.find(is_bracket) {
        return Err(SelectorError::syntax(selector, pos + 1, pos + 2, "unexpected bracket"));
    }

    let Some((lower, upper)) = inner.split_once(',') else {
        let version = inner.trim();
        if version.is_empty() {
            return Err(SelectorError::syntax(selector, 0, body.len(), "empty range"));
        }
        if !lower_inclusive || !upper_inclusive {
            return Err(SelectorError::syntax(
                selector,
                0,
                body.len(),
                "a single-version range must use inclusive brackets",
            ));
        }
        let bound = Bound {
            version: version.to_string(),
            inclusive: true,
        };
        return Ok(VersionSelector::Range {
            lower: Some(bound.clone()),
            upper: Some(bound),
        });
    };

    if let Some(pos) = upper.find(',') {
        let start = 1 + lower.len() + 1 + pos;
        return Err(SelectorError::syntax(selector, start, start + 1, "more than one comma"));
    }

    let bound = |version: &str, inclusive: bool| {
        let version = version.trim();
        (!version.is_empty()).then(|| Bound {
            version: version.to_string(),
            inclusive,
        })
    };

    Ok(VersionSelector::Range {
        lower: bound(lower, lower_inclusive),
        upper: bound(upper, upper_inclusive),
    })
}

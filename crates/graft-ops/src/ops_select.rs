//! Operations: parse a version selector, pick the best candidate version.

use std::path::Path;

use graft_resolver::matcher::VersionMatcher;
use graft_resolver::selector::{Candidate, VersionSelector};
use graft_util::errors::GraftError;

use crate::workspace;

/// A parsed selector as reported by `graft parse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSummary {
    pub kind: &'static str,
    pub canonical: String,
    pub dynamic: bool,
    pub requires_metadata: bool,
}

/// A matcher configured for `cwd`: global settings plus the overrides of the
/// nearest `Graft.toml`.
pub fn matcher(cwd: &Path) -> miette::Result<VersionMatcher> {
    Ok(VersionMatcher::from_config(&workspace::resolution_config(cwd)?))
}

/// Parse `selector` and describe the result.
pub fn parse(matcher: &VersionMatcher, selector: &str) -> miette::Result<SelectorSummary> {
    let parsed = matcher.parse(selector)?;
    Ok(SelectorSummary {
        kind: kind_name(&parsed),
        canonical: parsed.to_string(),
        dynamic: parsed.is_dynamic(),
        requires_metadata: parsed.requires_metadata(),
    })
}

fn kind_name(selector: &VersionSelector) -> &'static str {
    match selector {
        VersionSelector::Exact(_) => "exact",
        VersionSelector::Range { .. } => "range",
        VersionSelector::SubVersion(_) => "sub-version",
        VersionSelector::Latest(_) => "latest",
    }
}

/// Split a `version[@status]` argument.
pub fn parse_candidate(arg: &str) -> miette::Result<Candidate<'_>> {
    let candidate = match arg.rsplit_once('@') {
        Some((version, status)) => Candidate::with_status(version, status),
        None => Candidate::new(arg),
    };
    if candidate.version.is_empty() || candidate.status.is_some_and(str::is_empty) {
        return Err(GraftError::Generic {
            message: format!("invalid candidate '{arg}', expected VERSION or VERSION@STATUS"),
        }
        .into());
    }
    Ok(candidate)
}

/// The newest of `candidates` accepted by `selector`, as written on the
/// command line.
pub fn select<'a>(
    matcher: &VersionMatcher,
    selector: &str,
    candidates: &'a [String],
) -> miette::Result<Option<&'a str>> {
    let parsed = matcher.parse(selector)?;
    let candidates = candidates
        .iter()
        .map(|arg| parse_candidate(arg))
        .collect::<miette::Result<Vec<_>>>()?;

    if parsed.requires_metadata() && candidates.iter().all(|c| c.status.is_none()) {
        tracing::warn!("'{parsed}' compares statuses but no candidate declares one");
    }

    Ok(matcher.select_best(&parsed, &candidates).map(|c| c.version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::status::StatusScale;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn summarises_each_kind() {
        let matcher = VersionMatcher::default();
        let summary = parse(&matcher, "]1.0,2.0]").unwrap();
        assert_eq!(
            summary,
            SelectorSummary {
                kind: "range",
                canonical: "(1.0,2.0]".to_string(),
                dynamic: true,
                requires_metadata: false,
            }
        );
        assert_eq!(parse(&matcher, "1.0").unwrap().kind, "exact");
        assert_eq!(parse(&matcher, "1.+").unwrap().kind, "sub-version");
        assert!(parse(&matcher, "latest.release").unwrap().requires_metadata);
    }

    #[test]
    fn parse_reports_syntax_errors() {
        let matcher = VersionMatcher::default();
        let err = parse(&matcher, "[1.0,2.0").unwrap_err();
        assert!(err.to_string().contains("missing closing bracket"));
    }

    #[test]
    fn candidates_with_status() {
        let candidate = parse_candidate("1.0@release").unwrap();
        assert_eq!(candidate, Candidate::with_status("1.0", "release"));
        assert_eq!(parse_candidate("1.0").unwrap(), Candidate::new("1.0"));
        assert!(parse_candidate("@release").is_err());
        assert!(parse_candidate("1.0@").is_err());
    }

    #[test]
    fn selects_newest_match() {
        let matcher = VersionMatcher::default();
        let candidates = args(&["1.0", "1.5", "2.0", "1.10"]);
        assert_eq!(
            select(&matcher, "[1.0,2.0)", &candidates).unwrap(),
            Some("1.10")
        );
        assert_eq!(select(&matcher, "3.+", &candidates).unwrap(), None);
    }

    #[test]
    fn selects_by_status() {
        let matcher = VersionMatcher::new(StatusScale::default());
        let candidates = args(&["1.0@release", "1.1@milestone", "1.2@integration"]);
        assert_eq!(
            select(&matcher, "latest.milestone", &candidates).unwrap(),
            Some("1.1")
        );
        assert_eq!(
            select(&matcher, "latest.integration", &candidates).unwrap(),
            Some("1.2")
        );
    }
}

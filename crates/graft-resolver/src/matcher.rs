//! Selector parsing, matching and best-candidate selection under a status scale.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use graft_core::config::ResolutionConfig;
use graft_core::status::StatusScale;
use parking_lot::RwLock;

use crate::selector::{Candidate, SelectorError, VersionSelector};

/// Entry point to the version selector engine.
///
/// Safe to share between resolution workers. Parsed selectors are cached by
/// their source string; cached selectors are immutable, so the cache never
/// changes what `parse` returns.
#[derive(Debug)]
pub struct VersionMatcher {
    scale: StatusScale,
    cache: Option<RwLock<HashMap<String, Arc<VersionSelector>>>>,
}

impl VersionMatcher {
    pub fn new(scale: StatusScale) -> Self {
        Self {
            scale,
            cache: Some(RwLock::new(HashMap::new())),
        }
    }

    pub fn without_cache(scale: StatusScale) -> Self {
        Self { scale, cache: None }
    }

    pub fn from_config(config: &ResolutionConfig) -> Self {
        if config.selector_cache {
            Self::new(config.status_scale.clone())
        } else {
            Self::without_cache(config.status_scale.clone())
        }
    }

    pub fn status_scale(&self) -> &StatusScale {
        &self.scale
    }

    pub fn parse(&self, selector: &str) -> Result<Arc<VersionSelector>, SelectorError> {
        let Some(cache) = &self.cache else {
            return VersionSelector::parse(selector).map(Arc::new);
        };

        if let Some(parsed) = cache.read().get(selector) {
            tracing::trace!("Selector cache hit for '{selector}'");
            return Ok(parsed.clone());
        }

        let parsed = Arc::new(VersionSelector::parse(selector)?);
        Ok(cache
            .write()
            .entry(selector.to_string())
            .or_insert(parsed)
            .clone())
    }

    pub fn accept(&self, selector: &VersionSelector, candidate: &Candidate<'_>) -> bool {
        selector.accept(candidate, &self.scale)
    }

    pub fn compare(&self, selector: &VersionSelector, a: &str, b: &str) -> Ordering {
        selector.compare(a, b)
    }

    /// The newest candidate accepted by `selector`.
    ///
    /// Candidates comparing equal keep their input order; the last one wins.
    pub fn select_best<'a>(
        &self,
        selector: &VersionSelector,
        candidates: &[Candidate<'a>],
    ) -> Option<Candidate<'a>> {
        let best = candidates
            .iter()
            .filter(|c| self.accept(selector, c))
            .max_by(|a, b| self.compare(selector, a.version, b.version))
            .copied();
        tracing::debug!(
            "Selector '{selector}' picked {:?} out of {} candidates",
            best.map(|c| c.version),
            candidates.len()
        );
        best
    }

    /// Number of cached selectors.
    pub fn cached_selectors(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.read().len())
    }
}

impl Default for VersionMatcher {
    fn default() -> Self {
        Self::new(StatusScale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_cached() {
        let matcher = VersionMatcher::default();
        let a = matcher.parse("[1.0,2.0)").unwrap();
        let b = matcher.parse("[1.0,2.0)").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(matcher.cached_selectors(), 1);
    }

    #[test]
    fn errors_are_not_cached() {
        let matcher = VersionMatcher::default();
        assert!(matcher.parse("[1.0,").is_err());
        assert_eq!(matcher.cached_selectors(), 0);
    }

    #[test]
    fn cache_is_unobservable() {
        let cached = VersionMatcher::default();
        let uncached = VersionMatcher::without_cache(StatusScale::default());
        for s in ["1.0", "1.+", "latest.release", "(,3]"] {
            assert_eq!(*cached.parse(s).unwrap(), *uncached.parse(s).unwrap());
            assert_eq!(*cached.parse(s).unwrap(), *uncached.parse(s).unwrap());
        }
        assert_eq!(uncached.cached_selectors(), 0);
    }

    #[test]
    fn selects_highest_in_range() {
        let matcher = VersionMatcher::default();
        let selector = matcher.parse("[1.0,2.0)").unwrap();
        let candidates = ["0.9", "1.0", "1.10", "1.9", "2.0", "2.1"].map(Candidate::new);
        let best = matcher.select_best(&selector, &candidates).unwrap();
        assert_eq!(best.version, "1.10");
    }

    #[test]
    fn selects_newest_sub_version() {
        let matcher = VersionMatcher::default();
        let selector = matcher.parse("1.2.+").unwrap();
        let candidates = ["1.2.1", "1.2.10", "1.3.0", "1.2.9"].map(Candidate::new);
        assert_eq!(
            matcher.select_best(&selector, &candidates).unwrap().version,
            "1.2.10"
        );
    }

    #[test]
    fn sub_version_skips_pre_release_siblings() {
        let matcher = VersionMatcher::default();
        let selector = matcher.parse("1.2.+").unwrap();
        let candidates = ["1.2-rc1", "1.2.3", "1.2_9"].map(Candidate::new);
        assert_eq!(
            matcher.select_best(&selector, &candidates).unwrap().version,
            "1.2.3"
        );
        let pre_release = [Candidate::new("1.2-rc1")];
        assert!(matcher.select_best(&selector, &pre_release).is_none());
    }

    #[test]
    fn selects_newest_with_status() {
        let matcher = VersionMatcher::default();
        let selector = matcher.parse("latest.release").unwrap();
        let candidates = [
            Candidate::with_status("1.0", "release"),
            Candidate::with_status("1.1", "release"),
            Candidate::with_status("1.2", "milestone"),
        ];
        assert_eq!(
            matcher.select_best(&selector, &candidates).unwrap().version,
            "1.1"
        );
    }

    #[test]
    fn no_match_selects_nothing() {
        let matcher = VersionMatcher::default();
        let selector = matcher.parse("3.0").unwrap();
        let candidates = ["1.0", "2.0"].map(Candidate::new);
        assert!(matcher.select_best(&selector, &candidates).is_none());
    }

    #[test]
    fn respects_configured_scale() {
        let config = ResolutionConfig {
            status_scale: StatusScale::new(["snapshot", "release"]).unwrap(),
            selector_cache: false,
        };
        let matcher = VersionMatcher::from_config(&config);
        let selector = matcher.parse("latest.snapshot").unwrap();
        assert!(matcher.accept(&selector, &Candidate::new("0.1")));
        assert_eq!(matcher.cached_selectors(), 0);
    }

    #[test]
    fn shared_between_threads() {
        let matcher = VersionMatcher::default();
        std::thread::scope(|s| {
            for i in 0..8 {
                let matcher = &matcher;
                s.spawn(move || {
                    let selector = matcher.parse("[1.0,2.0]").unwrap();
                    let version = format!("1.{i}");
                    assert!(matcher.accept(&selector, &Candidate::new(&version)));
                });
            }
        });
        assert_eq!(matcher.cached_selectors(), 1);
    }
}

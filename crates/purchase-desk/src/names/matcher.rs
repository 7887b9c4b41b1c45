//! Fuzzy matching of free-text names against a candidate list.
//!
//! Both sides are canonicalized before scoring so punctuation, casing, and
//! ordering differences ("Smith, Jon" vs "jon smith") never count against a
//! pair. Scores use partial-ratio similarity on the 0-100 scale.

use rapidfuzz::fuzz::partial_ratio;

use super::canonical::normalize;
use crate::config::MatchingConfig;

/// Outcome of matching one target name against a candidate list.
#[derive(Debug, Clone, PartialEq)]
pub struct NameMatch {
    /// Index into the candidate slice.
    pub index: usize,
    /// Partial-ratio score (100.0 for exact canonical equality).
    pub score: f64,
    /// Whether the canonical forms were identical.
    pub exact: bool,
}

/// Partial-ratio matcher with an explicit threshold (no module-level
/// tunables).
#[derive(Debug, Clone)]
pub struct NameMatcher {
    threshold: f64,
}

impl NameMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        Self::new(config.partial_ratio_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Partial-ratio similarity of the canonical forms, 0-100.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        partial_ratio(normalize(a).chars(), normalize(b).chars())
    }

    /// Best candidate for `target`: exact canonical equality wins outright,
    /// otherwise the highest score at or above the threshold.
    pub fn best_match(&self, target: &str, candidates: &[String]) -> Option<NameMatch> {
        let canonical_target = normalize(target);

        let mut best: Option<NameMatch> = None;
        for (index, candidate) in candidates.iter().enumerate() {
            let canonical_candidate = normalize(candidate);
            if canonical_candidate == canonical_target {
                return Some(NameMatch {
                    index,
                    score: 100.0,
                    exact: true,
                });
            }

            let score = partial_ratio(canonical_target.chars(), canonical_candidate.chars());
            if score >= self.threshold && best.as_ref().map_or(true, |found| score > found.score) {
                best = Some(NameMatch {
                    index,
                    score,
                    exact: false,
                });
            }
        }

        best
    }
}

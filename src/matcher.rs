//! Identity matching: ranking candidates against a target name, same-person
//! decisions, and list deduplication.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use utoipa::ToSchema;

use crate::utils::similarity::score_canonical;
use crate::utils::{calculate_similarity_scores, canonical_form, generate_name_variants, SimilarityScores};

/// Composite score a candidate needs to be accepted as a match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Floor applied to the threshold in strict mode.
pub const STRICT_SIMILARITY_THRESHOLD: f64 = 0.9;

/// A candidate accepted by [`NameMatcher::find_best_matches`].
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NameMatch {
    /// The candidate exactly as it was supplied
    pub name: String,
    /// Best composite score over all variant pairs
    pub score: f64,
    /// Full score bundle of the best variant pair
    pub scores: SimilarityScores,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NameMatcher {
    threshold: f64,
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

/// Canonical forms of a name's variants, in sorted variant order, empties dropped.
fn variant_forms(name: &str) -> Vec<String> {
    generate_name_variants(name)
        .iter()
        .map(|variant| canonical_form(variant))
        .filter(|form| !form.is_empty())
        .collect()
}

impl NameMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Threshold used when `strict` is requested; never looser than the base threshold.
    pub fn strict_threshold(&self) -> f64 {
        self.threshold.max(STRICT_SIMILARITY_THRESHOLD)
    }

    /// Rank `candidates` against `target`.
    ///
    /// Every candidate is scored by its best variant pair against the
    /// target's variants. Candidates below the threshold are dropped; the
    /// rest are returned best first (ties keep input order), at most `top_k`.
    ///
    /// ```
    /// use isern_network::matcher::NameMatcher;
    ///
    /// let matcher = NameMatcher::default();
    /// let roster = ["Victor Basili", "Dieter Rombach", "Daniel Port"];
    /// let matches = matcher.find_best_matches("Dan Port", &roster, 5);
    /// assert_eq!(matches.len(), 1);
    /// assert_eq!(matches[0].name, "Daniel Port");
    /// ```
    pub fn find_best_matches<S>(&self, target: &str, candidates: &[S], top_k: usize) -> Vec<NameMatch>
    where
        S: AsRef<str> + Sync,
    {
        if target.trim().is_empty() || candidates.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let target_forms = variant_forms(target);
        if target_forms.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<NameMatch> = candidates
            .par_iter()
            .filter_map(|candidate| {
                let candidate = candidate.as_ref();
                let (score, scores) = best_variant_pair(&target_forms, &variant_forms(candidate))?;
                (score >= self.threshold).then(|| NameMatch {
                    name: candidate.to_string(),
                    score,
                    scores,
                })
            })
            .collect();

        // sort_by is stable: equal scores keep candidate order
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_k);
        matches
    }

    /// The single best candidate for `target`, if any clears the threshold.
    pub fn best_match<S>(&self, target: &str, candidates: &[S]) -> Option<NameMatch>
    where
        S: AsRef<str> + Sync,
    {
        self.find_best_matches(target, candidates, 1).into_iter().next()
    }

    /// Whether two names plausibly denote the same person.
    ///
    /// True when the composite clears the threshold, when token-sort and
    /// Jaro-Winkler both clear it, or when the two variant sets share a
    /// spelling.
    ///
    /// ```
    /// use isern_network::matcher::NameMatcher;
    ///
    /// let matcher = NameMatcher::default();
    /// assert!(matcher.is_likely_same_person("Mike Smith", "Michael Smith", false));
    /// assert!(!matcher.is_likely_same_person("Victor Basili", "Dieter Rombach", false));
    /// ```
    pub fn is_likely_same_person(&self, name1: &str, name2: &str, strict: bool) -> bool {
        let Some(scores) = calculate_similarity_scores(name1, name2) else {
            return false;
        };

        let threshold = if strict { self.strict_threshold() } else { self.threshold };

        let high_composite = scores.composite >= threshold;
        let high_fuzzy_and_phonetic =
            scores.token_sort_ratio >= threshold && scores.jaro_winkler >= threshold;

        high_composite || high_fuzzy_and_phonetic || variants_overlap(name1, name2)
    }

    /// Collapse likely duplicates, keeping the most complete spelling of each person.
    ///
    /// Single left-to-right pass: each name not yet grouped seeds a group and
    /// absorbs every later ungrouped name that matches the seed. Grouping is
    /// not transitive. Representatives are returned sorted.
    pub fn deduplicate_names<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        let mut grouped = vec![false; names.len()];
        let mut representatives = Vec::new();

        for i in 0..names.len() {
            if grouped[i] {
                continue;
            }
            grouped[i] = true;
            let seed = names[i].as_ref();
            let mut group = vec![seed];

            for j in i + 1..names.len() {
                if grouped[j] {
                    continue;
                }
                let other = names[j].as_ref();
                if self.is_likely_same_person(seed, other, false) {
                    tracing::debug!("Grouping {:?} with {:?}", other, seed);
                    group.push(other);
                    grouped[j] = true;
                }
            }

            if let Some(best) = group
                .into_iter()
                .max_by_key(|name| (name.chars().count(), name.matches(' ').count(), *name))
            {
                representatives.push(best.to_string());
            }
        }

        representatives.sort();
        representatives
    }
}

/// Best composite over the cross product; the first maximum in order wins.
fn best_variant_pair(target_forms: &[String], candidate_forms: &[String]) -> Option<(f64, SimilarityScores)> {
    let mut best: Option<(f64, SimilarityScores)> = None;
    for target_form in target_forms {
        for candidate_form in candidate_forms {
            let scores = score_canonical(target_form, candidate_form);
            let current = best.map(|(score, _)| score).unwrap_or(0.0);
            if scores.composite > current {
                best = Some((scores.composite, scores));
            }
        }
    }
    best
}

fn variants_overlap(name1: &str, name2: &str) -> bool {
    let forms1: BTreeSet<String> = variant_forms(name1).into_iter().collect();
    variant_forms(name2).iter().any(|form| forms1.contains(form))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_threshold() {
        assert_eq!(NameMatcher::default().strict_threshold(), 0.9);
        assert_eq!(NameMatcher::new(0.95).strict_threshold(), 0.95);
        assert_eq!(NameMatcher::new(0.5).strict_threshold(), 0.9);
    }

    #[test]
    fn test_find_best_matches_empty_inputs() {
        let matcher = NameMatcher::default();
        let empty: [&str; 0] = [];
        assert!(matcher.find_best_matches("Dan Port", &empty, 5).is_empty());
        assert!(matcher.find_best_matches("", &["Dan Port"], 5).is_empty());
        assert!(matcher.find_best_matches("  ", &["Dan Port"], 5).is_empty());
        assert!(matcher.find_best_matches("Dan Port", &["Dan Port"], 0).is_empty());
    }

    #[test]
    fn test_find_best_matches_order_and_truncation() {
        let matcher = NameMatcher::default();
        let candidates = ["Basili, Victor", "Dieter Rombach", "Victor R. Basili", "Victor Basili"];
        let matches = matcher.find_best_matches("Victor Basili", &candidates, 10);
        let names: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Basili, Victor", "Victor R. Basili", "Victor Basili"]);
        assert!(matches.iter().all(|m| (m.score - 1.0).abs() < 1e-9));

        let top = matcher.find_best_matches("Victor Basili", &candidates, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "Basili, Victor");
    }

    #[test]
    fn test_reflexive() {
        let matcher = NameMatcher::default();
        for name in ["Ross Jeffery", "Koji Torii", "李明", "Galileo"] {
            assert!(matcher.is_likely_same_person(name, name, true), "{name}");
        }
        assert!(!matcher.is_likely_same_person("", "", false));
    }

    #[test]
    fn test_deduplicate_keeps_longest() {
        let matcher = NameMatcher::default();
        let names = ["V. Basili", "Victor Basili", "Dieter Rombach"];
        assert_eq!(matcher.deduplicate_names(&names), vec!["Dieter Rombach", "Victor Basili"]);
        let empty: [String; 0] = [];
        assert!(matcher.deduplicate_names(&empty).is_empty());
    }
}

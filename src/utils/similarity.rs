//! Composite similarity between two person names.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::fuzz;
use super::normalize::canonical_form;
use super::phonetic::{metaphone, soundex};

pub const TOKEN_SORT_WEIGHT: f64 = 0.30;
pub const TOKEN_SET_WEIGHT: f64 = 0.25;
pub const JARO_WINKLER_WEIGHT: f64 = 0.20;
pub const PARTIAL_WEIGHT: f64 = 0.15;
pub const RATIO_WEIGHT: f64 = 0.10;

/// Every metric computed for one pair of names, each in `[0, 1]`.
///
/// `soundex` and `metaphone` are equality indicators (0.0 or 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SimilarityScores {
    pub token_sort_ratio: f64,
    pub token_set_ratio: f64,
    pub partial_ratio: f64,
    pub ratio: f64,
    pub soundex: f64,
    pub metaphone: f64,
    pub jaro: f64,
    pub jaro_winkler: f64,
    pub composite: f64,
}

/// Score two raw names against each other.
///
/// Both names are canonicalized first; `None` is returned when either one
/// canonicalizes to nothing.
///
/// # Examples
///
/// ```
/// use isern_network::utils::calculate_similarity_scores;
///
/// let scores = calculate_similarity_scores("Victor Basili", "BASILI, Victor").unwrap();
/// assert_eq!(scores.token_sort_ratio, 1.0);
/// assert!(calculate_similarity_scores("Prof.", "Victor Basili").is_none());
/// ```
pub fn calculate_similarity_scores(name1: &str, name2: &str) -> Option<SimilarityScores> {
    let norm1 = canonical_form(name1);
    let norm2 = canonical_form(name2);
    if norm1.is_empty() || norm2.is_empty() {
        return None;
    }
    Some(score_canonical(&norm1, &norm2))
}

/// Score two strings that are already in canonical joined form.
pub(crate) fn score_canonical(norm1: &str, norm2: &str) -> SimilarityScores {
    let token_sort_ratio = fuzz::token_sort_ratio(norm1, norm2);
    let token_set_ratio = fuzz::token_set_ratio(norm1, norm2);
    let partial_ratio = fuzz::partial_ratio(norm1, norm2);
    let ratio = fuzz::ratio(norm1, norm2);
    let jaro = strsim::jaro(norm1, norm2);
    let jaro_winkler = strsim::jaro_winkler(norm1, norm2);

    let composite = token_sort_ratio * TOKEN_SORT_WEIGHT
        + token_set_ratio * TOKEN_SET_WEIGHT
        + jaro_winkler * JARO_WINKLER_WEIGHT
        + partial_ratio * PARTIAL_WEIGHT
        + ratio * RATIO_WEIGHT;

    SimilarityScores {
        token_sort_ratio,
        token_set_ratio,
        partial_ratio,
        ratio,
        soundex: codes_equal(soundex(norm1), soundex(norm2)),
        metaphone: codes_equal(metaphone(norm1), metaphone(norm2)),
        jaro,
        jaro_winkler,
        composite,
    }
}

/// 1.0 when both codes exist and agree; a name with no encodable letters scores 0.0.
fn codes_equal(a: Option<String>, b: Option<String>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) if a == b => 1.0,
        _ => 0.0,
    }
}

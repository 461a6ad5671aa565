//! Indel-based string ratios.
//!
//! All scores are in `[0, 1]` and operate on Unicode scalar values. The plain
//! ratio is the normalized Indel similarity `2·LCS / (len_a + len_b)`; the
//! other ratios are built on top of it the same way the common fuzzy-matching
//! libraries build them (best partial window, sorted tokens, token sets).

use std::collections::BTreeSet;

/// Length of the longest common subsequence of two char slices.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let len_a = a.len();
    let len_b = b.len();

    let mut dp = vec![vec![0; len_b + 1]; len_a + 1];

    for i in 1..=len_a {
        for j in 1..=len_b {
            if a[i - 1] == b[j - 1] {
                dp[i][j] = dp[i - 1][j - 1] + 1;
            } else {
                dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
            }
        }
    }

    dp[len_a][len_b]
}

fn indel_similarity(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2 * lcs_length(a, b)) as f64 / total as f64
}

/// Normalized Indel similarity of two strings; two empty strings score 1.0.
///
/// ```
/// use isern_network::utils::fuzz::ratio;
///
/// assert_eq!(ratio("port", "port"), 1.0);
/// assert!((ratio("dan port", "daniel port") - 16.0 / 19.0).abs() < 1e-12);
/// ```
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    indel_similarity(&a, &b)
}

/// Best [`ratio`] of the shorter string against any alignment with the longer one.
///
/// Alignments are every full-length window of the longer string plus the
/// partial windows hanging off either end. When both strings have the same
/// length both directions are tried.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let best = partial_ratio_windows(shorter, longer);
    if best < 1.0 && a.len() == b.len() {
        return best.max(partial_ratio_windows(longer, shorter));
    }
    best
}

fn partial_ratio_windows(needle: &[char], haystack: &[char]) -> f64 {
    let n = needle.len();
    let m = haystack.len();
    if n == 0 {
        return 0.0;
    }
    let needle_chars: BTreeSet<char> = needle.iter().copied().collect();
    let mut best = 0.0_f64;

    // Windows that hang off the left edge
    for end in 1..n {
        if !needle_chars.contains(&haystack[end - 1]) {
            continue;
        }
        best = best.max(indel_similarity(needle, &haystack[..end]));
        if best >= 1.0 {
            return best;
        }
    }

    // Full-length windows
    for start in 0..m - n {
        if !needle_chars.contains(&haystack[start + n - 1]) {
            continue;
        }
        best = best.max(indel_similarity(needle, &haystack[start..start + n]));
        if best >= 1.0 {
            return best;
        }
    }

    // Windows that hang off the right edge
    for start in m - n..m {
        if !needle_chars.contains(&haystack[start]) {
            continue;
        }
        best = best.max(indel_similarity(needle, &haystack[start..]));
        if best >= 1.0 {
            return best;
        }
    }

    best
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

/// [`ratio`] after sorting the whitespace-separated tokens of each string.
///
/// ```
/// use isern_network::utils::fuzz::token_sort_ratio;
///
/// assert_eq!(token_sort_ratio("basili victor", "victor basili"), 1.0);
/// ```
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a).join(" "), &sorted_tokens(b).join(" "))
}

/// Token-set comparison.
///
/// Splits both strings into token sets and compares the shared tokens with
/// the shared tokens plus each side's remainder. Returns 1.0 when the token
/// sets overlap and one is contained in the other; 0.0 when either string has
/// no tokens.
///
/// ```
/// use isern_network::utils::fuzz::token_set_ratio;
///
/// assert_eq!(token_set_ratio("victor basili", "victor r basili"), 1.0);
/// assert_eq!(token_set_ratio("", "victor basili"), 0.0);
/// ```
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 1.0;
    }

    let sect = intersection.join(" ");
    let with_sect = |diff: &[&str]| {
        let diff = diff.join(" ");
        if sect.is_empty() {
            diff
        } else {
            format!("{sect} {diff}")
        }
    };
    let sect_ab = with_sect(&diff_ab);
    let sect_ba = with_sect(&diff_ba);

    let mut best = ratio(&sect_ab, &sect_ba);
    if !sect.is_empty() {
        best = best.max(ratio(&sect, &sect_ab)).max(ratio(&sect, &sect_ba));
    }
    best
}

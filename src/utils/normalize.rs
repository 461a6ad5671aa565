//! Name canonicalization for member matching.
//!
//! Raw author strings arrive from scraped member pages and bibliographic
//! records in every imaginable shape: "Prof. Dr. Dieter Rombach",
//! "V.R. Basili", "Smith, Michael J.", "Qing Wang 0001". This module folds
//! them into a [`CanonicalName`], an ordered (first, middle, last) triple of
//! lower-case ASCII-folded tokens.
//!
//! Processing order:
//! 1. Transliterate to ASCII (NFD with combining marks removed, then `deunicode`)
//! 2. Collapse whitespace
//! 3. Strip leading honorifics (Dr, Prof, Mr, ...)
//! 4. Strip trailing suffixes (Jr, Sr, III, PhD, DBLP homonym numbers, ...)
//! 5. Split into first / middle / last
//! 6. Lower-case and drop everything except word characters, whitespace and hyphens

use deunicode::deunicode;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use utoipa::ToSchema;

/// Honorifics removed from the front of a name (compared lower-case, trailing period ignored).
const HONORIFICS: &[&str] = &["dr", "prof", "professor", "mr", "mrs", "ms", "miss"];

/// Suffixes removed from the end of a name.
const SUFFIXES: &[&str] = &["jr", "sr", "iii", "iv", "phd", "md"];

/// Family name particles that stay attached to the last name ("da Silva", "bin Ali").
const FAMILY_PARTICLES: &[&str] = &[
    "van", "von", "de", "del", "della", "di", "da", "dos", "das", "la", "le", "du", "des", "ten",
    "ter", "bin", "vander",
];

/// A parsed, folded personal name.
///
/// Each part is a space-separated token sequence; `middle` (and, for
/// single-token names, `last`) may be empty. An empty `CanonicalName` is the
/// fail-soft result for empty or unusable input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
pub struct CanonicalName {
    pub first: String,
    pub middle: String,
    pub last: String,
}

impl CanonicalName {
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.middle.is_empty() && self.last.is_empty()
    }

    pub fn has_middle(&self) -> bool {
        !self.middle.is_empty()
    }

    /// The space-joined projection of the non-empty parts.
    pub fn joined(&self) -> String {
        [&self.first, &self.middle, &self.last]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<&str>>()
            .join(" ")
    }

    pub fn first_initial(&self) -> Option<char> {
        self.first.chars().next()
    }

    pub fn middle_initial(&self) -> Option<char> {
        self.middle.chars().next()
    }
}

/// Canonicalize a raw name into its (first, middle, last) triple.
///
/// Never fails: empty input, or input that consists only of honorifics and
/// punctuation, yields an empty [`CanonicalName`].
///
/// # Examples
///
/// ```
/// use isern_network::utils::canonicalize;
///
/// let name = canonicalize("Prof. Dr. José María García Jr.");
/// assert_eq!(name.first, "jose");
/// assert_eq!(name.middle, "maria");
/// assert_eq!(name.last, "garcia");
/// assert_eq!(canonicalize("Smith, Michael J.").joined(), "michael j smith");
/// assert!(canonicalize("   ").is_empty());
/// assert_eq!(canonicalize("Иван Петров").joined(), "ivan petrov");
/// ```
pub fn canonicalize(raw: &str) -> CanonicalName {
    let folded = fold_ascii(raw);
    let tokens: Vec<&str> = folded.split_whitespace().collect();
    if tokens.is_empty() {
        return CanonicalName::default();
    }

    let tokens = strip_suffixes(strip_honorifics(&tokens));
    let (first, middle, last) = split_parts(tokens);

    CanonicalName {
        first: clean_part(&first),
        middle: clean_part(&middle),
        last: clean_part(&last),
    }
}

/// Canonicalize and return the joined form in one step.
///
/// ```
/// use isern_network::utils::canonical_form;
///
/// assert_eq!(canonical_form("Dr. Magne Jørgensen"), "magne jorgensen");
/// assert_eq!(canonical_form("V.R. Basili"), "vr basili");
/// ```
pub fn canonical_form(raw: &str) -> String {
    canonicalize(raw).joined()
}

fn bare_token(token: &str) -> String {
    token
        .trim_end_matches(|c| c == '.' || c == ',')
        .to_lowercase()
}

fn strip_honorifics<'a>(tokens: &[&'a str]) -> Vec<&'a str> {
    let start = tokens
        .iter()
        .take_while(|token| HONORIFICS.contains(&bare_token(token).as_str()))
        .count();
    tokens[start..].to_vec()
}

fn strip_suffixes(mut tokens: Vec<&str>) -> Vec<&str> {
    while tokens.len() > 1 {
        let Some(last) = tokens.last() else { break };
        let bare = bare_token(last);
        // DBLP disambiguates homonyms with a numeric token ("Qing Wang 0001").
        let is_homonym_number = !bare.is_empty() && bare.chars().all(|c| c.is_ascii_digit());
        if SUFFIXES.contains(&bare.as_str()) || is_homonym_number {
            tokens.pop();
        } else {
            break;
        }
    }
    tokens
}

/// Split tokens into (first, middle, last) strings, still un-folded.
fn split_parts(tokens: Vec<&str>) -> (String, String, String) {
    let joined = tokens.join(" ");

    // "Last, First Middle" form; anything with more than one comma is left positional.
    if let Some((before, after)) = joined.split_once(',') {
        let before = before.trim();
        let after_tokens: Vec<&str> = after.split_whitespace().collect();
        if !after.contains(',') && !before.is_empty() && !after_tokens.is_empty() {
            return (
                after_tokens[0].to_string(),
                after_tokens[1..].join(" "),
                before.to_string(),
            );
        }
    }

    let tokens: Vec<&str> = joined
        .split_whitespace()
        .map(|t| t.trim_end_matches(','))
        .filter(|t| !t.is_empty())
        .collect();

    match tokens.len() {
        0 => (String::new(), String::new(), String::new()),
        1 => (tokens[0].to_string(), String::new(), String::new()),
        n => {
            let mut last_start = n - 1;
            while last_start > 1 && FAMILY_PARTICLES.contains(&tokens[last_start - 1].to_lowercase().as_str()) {
                last_start -= 1;
            }
            (
                tokens[0].to_string(),
                tokens[1..last_start].join(" "),
                tokens[last_start..].join(" "),
            )
        }
    }
}

/// Fold one name part: transliterate, lower-case, strip punctuation.
fn clean_part(part: &str) -> String {
    normalize_name(part)
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Normalize a string for matching purposes.
///
/// Transformations applied:
/// 1. Unicode NFD normalization
/// 2. Remove combining diacritical marks
/// 3. Transliterate what is left to ASCII (ł, ø, ß, Cyrillic, CJK, ...)
/// 4. Convert to lowercase
/// 5. Collapse whitespace
///
/// Punctuation is preserved; see [`canonicalize`] for the full pipeline.
///
/// # Examples
///
/// ```
/// use isern_network::utils::normalize_name;
///
/// assert_eq!(normalize_name("Eray Tüzün"), "eray tuzun");
/// assert_eq!(normalize_name("Dag Sjøberg"), "dag sjoberg");
/// assert_eq!(normalize_name("  Tomi   Männistö "), "tomi mannisto");
/// ```
pub fn normalize_name(name: &str) -> String {
    fold_ascii(name)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Closest ASCII rendering of `s`, case preserved.
///
/// Accents are stripped through NFD first so decomposed and precomposed
/// input fold the same way.
fn fold_ascii(s: &str) -> String {
    let stripped: String = s.nfd().filter(|c| !is_combining_mark(*c)).collect();
    if stripped.is_ascii() {
        stripped
    } else {
        deunicode(&stripped)
    }
}

/// Check if a character is a combining diacritical mark.
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Normalize a publication title into a deduplication key.
pub fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

//! Phonetic encoders: American Soundex and the original Metaphone.
//!
//! Both work on the ASCII letters of an already canonicalized name and
//! return `None` when there is nothing to encode.

use rphonetic::{Encoder, Metaphone, Soundex};

fn letters_only(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_ascii_alphabetic()).filter(|w| !w.is_empty())
}

/// Four-character Soundex code of the whole string, letters of every word
/// run together.
///
/// ```
/// use isern_network::utils::phonetic::soundex;
///
/// assert_eq!(soundex("robert").as_deref(), Some("R163"));
/// assert_eq!(soundex("rupert").as_deref(), Some("R163"));
/// assert_eq!(soundex("ashcraft").as_deref(), Some("A261"));
/// assert_eq!(soundex("0042"), None);
/// ```
pub fn soundex(s: &str) -> Option<String> {
    let letters: String = letters_only(s).collect();
    if letters.is_empty() {
        return None;
    }
    let code = Soundex::default().encode(&letters);
    (!code.is_empty()).then_some(code)
}

/// Metaphone code of every word, joined with single spaces.
///
/// ```
/// use isern_network::utils::phonetic::metaphone;
///
/// assert_eq!(metaphone("thomas").as_deref(), Some("0MS"));
/// assert_eq!(metaphone("knight").as_deref(), Some("NT"));
/// assert_eq!(metaphone("victor basili").as_deref(), Some("FKTR BSL"));
/// assert_eq!(metaphone(""), None);
/// ```
pub fn metaphone(s: &str) -> Option<String> {
    let encoder = Metaphone::default();
    let words: Vec<String> = letters_only(s)
        .map(|word| encoder.encode(word))
        .filter(|code| !code.is_empty())
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

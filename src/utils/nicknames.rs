//! Static nickname table with bidirectional lookup.
//!
//! Keys are canonical (ASCII-folded, lower-case) first names; values are the
//! short forms and cross-language equivalents they are commonly published
//! under. The table is built once per process.

use once_cell::sync::Lazy;
use std::collections::{BTreeMap, BTreeSet};

const NICKNAME_ENTRIES: &[(&str, &[&str])] = &[
    // English
    ("alexander", &["alex", "al", "xander", "sander", "lex"]),
    ("alexandra", &["alex", "sandra", "sasha", "lexie"]),
    ("andrew", &["andy", "drew", "andre"]),
    ("anthony", &["tony", "ant"]),
    ("barbara", &["barb", "babs", "bobbie"]),
    ("benjamin", &["ben", "benny", "benji"]),
    ("christopher", &["chris", "kit", "topher"]),
    ("daniel", &["dan", "danny", "dane"]),
    ("david", &["dave", "davey", "davide"]),
    ("elizabeth", &["liz", "beth", "betty", "eliza", "libby"]),
    ("frederick", &["fred", "rick", "freddy"]),
    ("gregory", &["greg", "gregor"]),
    ("jennifer", &["jen", "jenny", "jenna"]),
    ("jonathan", &["jon", "johnny", "nathan"]),
    ("katherine", &["kate", "kathy", "katie", "kathryn", "kat"]),
    ("matthew", &["matt", "mateo"]),
    ("michael", &["mike", "mick", "mickey", "michel", "mikael"]),
    ("nicholas", &["nick", "nicky", "nico", "nicolas"]),
    ("patricia", &["pat", "patty", "tricia", "patsy"]),
    ("rebecca", &["becky", "becca", "becki"]),
    ("richard", &["rick", "dick", "rich", "ricky"]),
    ("robert", &["rob", "bob", "bobby", "roberto"]),
    ("stephanie", &["steph", "stefanie"]),
    ("theodore", &["ted", "theo", "thaddeus"]),
    ("thomas", &["tom", "tommy", "tomas"]),
    ("william", &["will", "bill", "billy", "liam", "willem"]),
    // Italian
    ("giovanni", &["john", "gian", "gianni"]),
    ("giuseppe", &["joseph", "joe", "pepe"]),
    ("francesco", &["francis", "franco"]),
    ("antonio", &["anthony", "tony"]),
    ("marco", &["mark", "marcus"]),
    ("andrea", &["andrew", "andre"]),
    ("matteo", &["matthew", "matt"]),
    ("alessandro", &["alexander", "alex"]),
    ("stefano", &["stephen", "steve"]),
    ("roberto", &["robert", "rob"]),
    // German
    ("wilhelm", &["william", "will"]),
    ("johann", &["john", "johannes"]),
    ("friedrich", &["frederick", "fritz"]),
    ("heinrich", &["henry", "henri"]),
    ("ludwig", &["louis", "luis"]),
    ("karl", &["charles", "carl"]),
    ("andreas", &["andrew", "andre"]),
    ("stefan", &["stephen", "steve"]),
    ("christoph", &["christopher", "chris"]),
    // French
    ("jean", &["john", "johannes"]),
    ("pierre", &["peter", "pedro"]),
    ("jacques", &["james", "jacob"]),
    ("philippe", &["philip", "filip"]),
    ("michel", &["michael", "mike"]),
    ("francois", &["francis", "franco"]),
    ("andre", &["andrew", "andre"]),
    ("charles", &["karl", "carlos"]),
    ("henri", &["henry", "heinrich"]),
    ("louis", &["ludwig", "luis"]),
    // Spanish
    ("jose", &["joseph", "joe"]),
    ("juan", &["john", "johannes"]),
    ("francisco", &["francis", "franco"]),
    ("manuel", &["emmanuel", "manuel"]),
    ("pedro", &["peter", "pierre"]),
    ("luis", &["louis", "ludwig"]),
    ("carlos", &["charles", "karl"]),
    ("miguel", &["michael", "mike"]),
    ("rafael", &["raphael", "rafa"]),
];

static NICKNAMES: Lazy<BTreeMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| NICKNAME_ENTRIES.iter().copied().collect());

/// nickname -> every canonical name listing it
static CANONICAL_NAMES: Lazy<BTreeMap<&'static str, BTreeSet<&'static str>>> = Lazy::new(|| {
    let mut reverse: BTreeMap<&'static str, BTreeSet<&'static str>> = BTreeMap::new();
    for &(canonical, nicknames) in NICKNAME_ENTRIES {
        for &nickname in nicknames {
            reverse.entry(nickname).or_default().insert(canonical);
        }
    }
    reverse
});

/// Nicknames listed for a canonical first name, or an empty slice.
pub fn nicknames_of(first: &str) -> &'static [&'static str] {
    NICKNAMES.get(first).copied().unwrap_or(&[])
}

/// Canonical first names under which `nickname` is listed, in sorted order.
pub fn canonical_names_of(nickname: &str) -> Vec<&'static str> {
    CANONICAL_NAMES
        .get(nickname)
        .map(|names| names.iter().copied().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_lookup() {
        assert!(nicknames_of("daniel").contains(&"dan"));
        assert!(nicknames_of("michael").contains(&"mike"));
        assert!(nicknames_of("michael").contains(&"mikael"));
        assert!(nicknames_of("dan").is_empty());
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(canonical_names_of("dan"), vec!["daniel"]);
        assert_eq!(canonical_names_of("mike"), vec!["michael", "michel", "miguel"]);
        assert_eq!(canonical_names_of("john"), vec!["giovanni", "jean", "johann", "juan"]);
        assert!(canonical_names_of("victor").is_empty());
    }

    #[test]
    fn test_keys_are_ascii_lowercase() {
        for (canonical, nicknames) in NICKNAME_ENTRIES {
            assert!(canonical.chars().all(|c| c.is_ascii_lowercase()), "{canonical}");
            assert!(nicknames.iter().all(|n| n.chars().all(|c| c.is_ascii_lowercase())));
        }
    }

    #[test]
    fn test_no_duplicate_keys() {
        assert_eq!(NICKNAMES.len(), NICKNAME_ENTRIES.len());
    }
}

use isern_network::matcher::NameMatcher;
use isern_network::utils::{calculate_similarity_scores, canonical_form, canonicalize, generate_name_variants};

const NAMES: &[&str] = &[
    "Dan Port",
    "Daniel Port",
    "Victor Basili",
    "V.R. Basili",
    "Prof. Dr. H. Dieter Rombach",
    "Rombach, Dieter",
    "Magne Jørgensen",
    "Tomi Männistö",
    "Mike Smith",
    "Michael Smith",
    "Ken-ichi Matsumoto",
    "Fabio Q. B. da Silva",
    "Сергей Иванов",
    "李明",
];

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_short_first_name_is_same_person() {
    let scores = calculate_similarity_scores("Dan Port", "Daniel Port").unwrap();
    assert!(scores.composite >= 0.85, "composite {}", scores.composite);
    assert!(NameMatcher::default().is_likely_same_person("Dan Port", "Daniel Port", false));
}

#[test]
fn test_initials_match_full_name() {
    let variants = generate_name_variants("Victor Basili");
    assert!(variants.contains("v basili"));

    let scores = calculate_similarity_scores("v basili", "V.R. Basili").unwrap();
    assert!(scores.composite >= 0.85, "composite {}", scores.composite);

    let roster = ["Dieter Rombach", "Victor Basili", "Ross Jeffery"];
    let best = NameMatcher::default().best_match("V.R. Basili", &roster).unwrap();
    assert_eq!(best.name, "Victor Basili");
}

#[test]
fn test_dedupe_nickname_and_initial() {
    let names = ["Michael Smith", "Mike Smith", "M. Smith", "John Doe"];
    assert_eq!(
        NameMatcher::default().deduplicate_names(&names),
        vec!["John Doe".to_string(), "Michael Smith".to_string()]
    );
}

#[test]
fn test_dedupe_grouping_is_not_transitive() {
    let matcher = NameMatcher::default();
    assert!(matcher.is_likely_same_person("Jan Kowalski", "Jan Kowalsky", false));
    assert!(matcher.is_likely_same_person("Jan Kowalsky", "Jon Kowalsky", false));
    assert!(!matcher.is_likely_same_person("Jan Kowalski", "Jon Kowalsky", false));

    // The seed decides: the third name is compared with the first only.
    assert_eq!(
        matcher.deduplicate_names(&["Jan Kowalski", "Jan Kowalsky", "Jon Kowalsky"]),
        vec!["Jan Kowalsky".to_string(), "Jon Kowalsky".to_string()]
    );
    assert_eq!(
        matcher.deduplicate_names(&["Jan Kowalsky", "Jan Kowalski", "Jon Kowalsky"]),
        vec!["Jon Kowalsky".to_string()]
    );
}

#[test]
fn test_nickname_match_through_roster() {
    let roster = ["Michael Smith", "Michelle Smithers", "John Doe"];
    let matches = NameMatcher::default().find_best_matches("Mike Smith", &roster, 5);
    assert_eq!(matches[0].name, "Michael Smith");
    assert!((matches[0].score - 1.0).abs() < 1e-9);
}

#[test]
fn test_identical_non_latin_names_match() {
    let matcher = NameMatcher::default();
    for name in ["Сергей Иванов", "李明"] {
        let matches = matcher.find_best_matches(name, &[name], 5);
        assert_eq!(matches.len(), 1, "{name}");
        assert!((matches[0].score - 1.0).abs() < 1e-9, "{name}");
        assert!(matcher.is_likely_same_person(name, name, true), "{name}");
    }
}

#[test]
fn test_transliterated_spelling_matches_original_script() {
    let matcher = NameMatcher::default();
    assert!(matcher.is_likely_same_person("Сергей Иванов", "Sergei Ivanov", true));

    let roster = ["Ivan Petrov", "Sergei Ivanov", "Victor Basili"];
    let best = matcher.best_match("Иван Петров", &roster).unwrap();
    assert_eq!(best.name, "Ivan Petrov");
    assert!(matcher.best_match("李明", &roster).is_none());
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_deterministic() {
    for name in NAMES {
        assert_eq!(canonicalize(name), canonicalize(name));
        assert_eq!(generate_name_variants(name), generate_name_variants(name));
    }
    for a in NAMES {
        for b in NAMES {
            assert_eq!(calculate_similarity_scores(a, b), calculate_similarity_scores(a, b));
        }
    }
}

#[test]
fn test_reflexive() {
    let matcher = NameMatcher::default();
    for name in NAMES {
        assert!(matcher.is_likely_same_person(name, name, false), "{name}");
        assert!(matcher.is_likely_same_person(name, name, true), "{name}");
    }
}

#[test]
fn test_same_person_is_symmetric() {
    let matcher = NameMatcher::default();
    for a in NAMES {
        for b in NAMES {
            for strict in [false, true] {
                assert_eq!(
                    matcher.is_likely_same_person(a, b, strict),
                    matcher.is_likely_same_person(b, a, strict),
                    "{a} / {b} (strict: {strict})"
                );
            }
        }
    }
}

#[test]
fn test_strict_never_accepts_more() {
    let matcher = NameMatcher::default();
    for a in NAMES {
        for b in NAMES {
            if matcher.is_likely_same_person(a, b, true) {
                assert!(matcher.is_likely_same_person(a, b, false), "{a} / {b}");
            }
        }
    }
}

#[test]
fn test_variants_contain_canonical_form() {
    for name in NAMES {
        let canonical = canonical_form(name);
        assert!(generate_name_variants(name).contains(&canonical), "{name} -> {canonical}");
    }
}

#[test]
fn test_variant_sets_are_idempotent() {
    for name in NAMES {
        let once = generate_name_variants(name);
        let joined = canonicalize(name).joined();
        assert_eq!(generate_name_variants(&joined), once, "{name}");
    }
}

#[test]
fn test_scores_are_bounded() {
    for a in NAMES {
        for b in NAMES {
            let scores = calculate_similarity_scores(a, b).unwrap();
            for value in [
                scores.token_sort_ratio,
                scores.token_set_ratio,
                scores.partial_ratio,
                scores.ratio,
                scores.soundex,
                scores.metaphone,
                scores.jaro,
                scores.jaro_winkler,
                scores.composite,
            ] {
                assert!((0.0..=1.0 + 1e-12).contains(&value), "{a} / {b}: {value}");
            }
        }
    }
}

#[test]
fn test_ranked_matches_clear_threshold() {
    let matcher = NameMatcher::default();
    for target in NAMES {
        let matches = matcher.find_best_matches(target, NAMES, NAMES.len());
        assert!(matches.iter().all(|m| m.score >= matcher.threshold()));
        assert!(matches.windows(2).all(|pair| pair[0].score >= pair[1].score));
        assert!(matches.iter().any(|m| m.name == *target), "{target}");
    }
}

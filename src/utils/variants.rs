//! Variant generation: the plausible renderings of one person's name.

use std::collections::BTreeSet;

use super::nicknames::{canonical_names_of, nicknames_of};
use super::normalize::{canonicalize, CanonicalName};

/// Generate the set of plausible spellings of a name.
///
/// The set always contains the canonical joined form (unless the name is
/// empty, in which case the set is empty) plus reorderings, middle-name
/// inclusion/omission, nickname substitutions in both directions, and
/// initial forms.
///
/// # Examples
///
/// ```
/// use isern_network::utils::generate_name_variants;
///
/// let variants = generate_name_variants("Victor R. Basili");
/// assert!(variants.contains("victor r basili"));
/// assert!(variants.contains("basili victor"));
/// assert!(variants.contains("v basili"));
/// assert!(variants.contains("v. r. basili"));
///
/// let variants = generate_name_variants("Dan Port");
/// assert!(variants.contains("daniel port"));
/// assert!(generate_name_variants("").is_empty());
/// ```
pub fn generate_name_variants(name: &str) -> BTreeSet<String> {
    variants_of(&canonicalize(name))
}

/// Variant set of an already canonicalized name.
pub fn variants_of(name: &CanonicalName) -> BTreeSet<String> {
    let mut variants = BTreeSet::new();
    if name.is_empty() {
        return variants;
    }

    let mut raw = vec![name.joined()];
    if !name.first.is_empty() && !name.last.is_empty() {
        push_combinations(name, &mut raw);
    }

    for variant in raw {
        let cleaned = variant.split_whitespace().collect::<Vec<&str>>().join(" ");
        if !cleaned.is_empty() {
            variants.insert(cleaned);
        }
    }
    variants
}

fn push_combinations(name: &CanonicalName, out: &mut Vec<String>) {
    let CanonicalName { first, middle, last } = name;
    let mut add = |variant: String| out.push(variant);

    add(format!("{first} {last}"));
    add(format!("{last} {first}"));

    let middle_initial = name.middle_initial();
    if let Some(m) = middle_initial {
        add(format!("{first} {m} {last}"));
        add(format!("{first} {m}. {last}"));
        add(format!("{last} {first} {m}"));
        add(format!("{first} {middle} {last}"));
    }

    let substitutes = nicknames_of(first)
        .iter()
        .copied()
        .chain(canonical_names_of(first));
    for other in substitutes {
        add(format!("{other} {last}"));
        if let Some(m) = middle_initial {
            add(format!("{other} {m} {last}"));
            add(format!("{other} {middle} {last}"));
        }
    }

    if let Some(f) = name.first_initial() {
        add(format!("{f} {last}"));
        add(format!("{f}. {last}"));
        if let Some(m) = middle_initial {
            add(format!("{f} {m} {last}"));
            add(format!("{f}. {m}. {last}"));
        }
    }
}

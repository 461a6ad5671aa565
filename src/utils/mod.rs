pub mod fuzz;
pub mod nicknames;
pub mod normalize;
pub mod phonetic;
pub mod similarity;
pub mod variants;

pub use normalize::{canonical_form, canonicalize, normalize_name, title_key, CanonicalName};
pub use similarity::{calculate_similarity_scores, SimilarityScores};
pub use variants::{generate_name_variants, variants_of};

pub mod config;
pub mod discovery;
pub mod errors;
pub mod graph;
pub mod handlers;
pub mod matcher;
pub mod models;
pub mod utils;

pub use config::Settings;
pub use errors::{DocumentError, ExportError, RosterError, SourceError};
pub use graph::{label_distances, CollaborationGraph, Distance, DistanceLabels, Edge, EdgeSet, NetworkStatistics};
pub use handlers::{router, AppState};
pub use matcher::{NameMatch, NameMatcher, DEFAULT_SIMILARITY_THRESHOLD};
pub use models::{CollaborationReport, GraphDocument, NumbersDocument, Publication, Roster};
pub use utils::{calculate_similarity_scores, canonicalize, generate_name_variants, CanonicalName, SimilarityScores};

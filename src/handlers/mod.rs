pub mod matching;
pub mod members;
pub mod network;
pub mod web;

pub use matching::*;
pub use members::*;
pub use network::*;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::graph::{label_distances, CollaborationGraph, DistanceLabels, EdgeSet};
use crate::matcher::NameMatcher;
use crate::models::Roster;

/// Read-only network shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<Roster>,
    pub graph: Arc<CollaborationGraph>,
    pub labels: Arc<DistanceLabels>,
    pub founders: Arc<Vec<String>>,
    pub matcher: NameMatcher,
    /// When the network was loaded (RFC 3339)
    pub generated_at: Arc<str>,
}

impl AppState {
    /// Build the graph over `roster` and `edges` and label distances from `founders`.
    pub fn new(roster: Roster, edges: &EdgeSet, founders: Vec<String>, matcher: NameMatcher) -> Self {
        let graph = CollaborationGraph::new(roster.members(), edges);
        let labels = label_distances(&graph, founders.as_slice());
        Self {
            roster: Arc::new(roster),
            graph: Arc::new(graph),
            labels: Arc::new(labels),
            founders: Arc::new(founders),
            matcher,
            generated_at: Arc::from(chrono::Utc::now().to_rfc3339()),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ISERN Collaboration Network API",
        description = "Coauthorship network of ISERN members, ISERN numbers and name matching"
    ),
    paths(
        network::get_network,
        network::get_statistics,
        network::get_numbers,
        members::list_members,
        members::get_member,
        matching::match_names,
        matching::dedupe_names,
        matching::similarity,
    ),
    tags(
        (name = "network", description = "Collaboration graph and ISERN numbers"),
        (name = "members", description = "Roster members"),
        (name = "matching", description = "Name similarity and identity matching")
    )
)]
pub struct ApiDoc;

/// All routes: HTML pages, JSON API and Swagger UI.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(web::home))
        .route("/members/{name}", get(web::member_page))
        .route("/api/network", get(get_network))
        .route("/api/statistics", get(get_statistics))
        .route("/api/numbers", get(get_numbers))
        .route("/api/members", get(list_members))
        .route("/api/members/{name}", get(get_member))
        .route("/api/match", post(match_names))
        .route("/api/dedupe", post(dedupe_names))
        .route("/api/similarity", get(similarity))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

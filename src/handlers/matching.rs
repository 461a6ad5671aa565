use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::AppState;
use crate::matcher::NameMatch;
use crate::utils::{calculate_similarity_scores, SimilarityScores};

const DEFAULT_TOP_K: usize = 5;

#[derive(Debug, Deserialize, ToSchema)]
pub struct MatchRequest {
    pub target: String,
    /// Names to rank; the roster when omitted
    pub candidates: Option<Vec<String>>,
    /// Maximum number of matches (default: 5)
    pub top_k: Option<usize>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DedupeRequest {
    pub names: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DedupeResponse {
    /// One representative per person, sorted
    pub representatives: Vec<String>,
    /// How many input names were folded into another
    pub merged: usize,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SimilarityQuery {
    pub a: String,
    pub b: String,
}

#[utoipa::path(
    post,
    path = "/api/match",
    tag = "matching",
    request_body = MatchRequest,
    responses(
        (status = 200, description = "Candidates above the threshold, best first", body = Vec<NameMatch>)
    )
)]
pub async fn match_names(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Json<Vec<NameMatch>> {
    let top_k = request.top_k.unwrap_or(DEFAULT_TOP_K);
    let matches = match &request.candidates {
        Some(candidates) => state.matcher.find_best_matches(&request.target, candidates, top_k),
        None => state.matcher.find_best_matches(&request.target, state.roster.members(), top_k),
    };
    Json(matches)
}

#[utoipa::path(
    post,
    path = "/api/dedupe",
    tag = "matching",
    request_body = DedupeRequest,
    responses(
        (status = 200, description = "Representatives of each group of likely duplicates", body = DedupeResponse)
    )
)]
pub async fn dedupe_names(
    State(state): State<AppState>,
    Json(request): Json<DedupeRequest>,
) -> Json<DedupeResponse> {
    let representatives = state.matcher.deduplicate_names(&request.names);
    Json(DedupeResponse {
        merged: request.names.len() - representatives.len(),
        representatives,
    })
}

#[utoipa::path(
    get,
    path = "/api/similarity",
    tag = "matching",
    params(SimilarityQuery),
    responses(
        (status = 200, description = "Score breakdown, or null when either name is empty after normalization", body = SimilarityScores)
    )
)]
pub async fn similarity(Query(query): Query<SimilarityQuery>) -> Json<Option<SimilarityScores>> {
    Json(calculate_similarity_scores(&query.a, &query.b))
}

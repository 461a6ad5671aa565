use axum::{extract::State, Json};

use super::AppState;
use crate::graph::NetworkStatistics;
use crate::models::{GraphDocument, NumbersDocument};

#[utoipa::path(
    get,
    path = "/api/network",
    tag = "network",
    responses(
        (status = 200, description = "Nodes and edges of the coauthorship graph", body = GraphDocument)
    )
)]
pub async fn get_network(State(state): State<AppState>) -> Json<GraphDocument> {
    Json(GraphDocument::from_graph(&state.graph, state.generated_at.as_ref()))
}

#[utoipa::path(
    get,
    path = "/api/statistics",
    tag = "network",
    responses(
        (status = 200, description = "Network-level statistics", body = NetworkStatistics)
    )
)]
pub async fn get_statistics(State(state): State<AppState>) -> Json<NetworkStatistics> {
    Json(state.graph.statistics())
}

#[utoipa::path(
    get,
    path = "/api/numbers",
    tag = "network",
    responses(
        (status = 200, description = "ISERN number of every member; unreachable members carry \"infinity\"", body = NumbersDocument)
    )
)]
pub async fn get_numbers(State(state): State<AppState>) -> Json<NumbersDocument> {
    Json(NumbersDocument::new(
        state.labels.as_ref().clone(),
        state.founders.as_slice(),
        state.generated_at.as_ref(),
    ))
}

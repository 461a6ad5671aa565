use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::{IntoParams, ToSchema};

use super::AppState;
use crate::graph::Distance;
use crate::utils::normalize_name;

#[derive(Debug, Deserialize, IntoParams)]
pub struct MemberQuery {
    /// Name to look for; matches substrings and fuzzy spellings
    pub search: Option<String>,
}

/// One roster member in a listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MemberEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Integer, or "infinity" when no founder is reachable
    #[schema(value_type = Object)]
    pub isern_number: Distance,
    pub collaboration_count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MemberDetail {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[schema(value_type = Object)]
    pub isern_number: Distance,
    pub collaborators: Vec<String>,
    pub degree_centrality: f64,
}

fn number_of(state: &AppState, name: &str) -> Distance {
    state.labels.get(name).unwrap_or(Distance::Unreachable)
}

fn entry(state: &AppState, name: &str) -> MemberEntry {
    MemberEntry {
        name: name.to_string(),
        organization: state.roster.organization(name).map(str::to_string),
        isern_number: number_of(state, name),
        collaboration_count: state.graph.degree(name),
    }
}

/// Roster members matching `search`, in roster order.
pub(crate) fn search_members<'a>(state: &'a AppState, search: &str) -> Vec<&'a str> {
    let needle = normalize_name(search);
    if needle.is_empty() {
        return state.roster.iter().collect();
    }

    let fuzzy: HashSet<String> = state
        .matcher
        .find_best_matches(search, state.roster.members(), state.roster.len())
        .into_iter()
        .map(|found| found.name)
        .collect();

    state
        .roster
        .iter()
        .filter(|name| fuzzy.contains(*name) || normalize_name(name).contains(&needle))
        .collect()
}

#[utoipa::path(
    get,
    path = "/api/members",
    tag = "members",
    params(MemberQuery),
    responses(
        (status = 200, description = "Roster members", body = Vec<MemberEntry>)
    )
)]
pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<MemberQuery>,
) -> Json<Vec<MemberEntry>> {
    let names: Vec<&str> = match query.search.as_deref() {
        Some(search) => search_members(&state, search),
        None => state.roster.iter().collect(),
    };
    Json(names.into_iter().map(|name| entry(&state, name)).collect())
}

#[utoipa::path(
    get,
    path = "/api/members/{name}",
    tag = "members",
    params(
        ("name" = String, Path, description = "Exact member name")
    ),
    responses(
        (status = 200, description = "Member found", body = MemberDetail),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MemberDetail>, StatusCode> {
    if !state.graph.contains(&name) {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(MemberDetail {
        organization: state.roster.organization(&name).map(str::to_string),
        isern_number: number_of(&state, &name),
        collaborators: state.graph.neighbors(&name).into_iter().map(str::to_string).collect(),
        degree_centrality: state.graph.degree_centrality(&name),
        name,
    }))
}

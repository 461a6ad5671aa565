use askama::Template;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;
use std::collections::HashSet;

use super::render;
use crate::graph::Distance;
use crate::handlers::members::search_members;
use crate::handlers::AppState;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    total_members: usize,
    total_collaborations: usize,
    network_density: String,
    connected_members: usize,
    isolated_members: usize,
    connected_components: usize,
    largest_component_size: usize,
    founders: Vec<String>,
    levels: Vec<Level>,
    search_term: String,
}

struct Level {
    label: String,
    members: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub search: Option<String>,
}

fn level_label(distance: Distance) -> String {
    match distance {
        Distance::Finite(0) => "ISERN number 0 (founders)".to_string(),
        Distance::Finite(n) => format!("ISERN number {n}"),
        Distance::Unreachable => "Disconnected".to_string(),
    }
}

pub async fn home(State(state): State<AppState>, Query(query): Query<HomeQuery>) -> Result<Response, StatusCode> {
    let search_term = query.search.unwrap_or_default().trim().to_string();
    let shown: Option<HashSet<&str>> = if search_term.is_empty() {
        None
    } else {
        Some(search_members(&state, &search_term).into_iter().collect())
    };

    let levels = state
        .labels
        .levels()
        .into_iter()
        .map(|(distance, members)| Level {
            label: level_label(distance),
            members: members
                .into_iter()
                .filter(|name| shown.as_ref().map_or(true, |shown| shown.contains(name.as_str())))
                .collect(),
        })
        .filter(|level| !level.members.is_empty())
        .collect();

    let stats = state.graph.statistics();
    render(HomeTemplate {
        total_members: stats.total_members,
        total_collaborations: stats.total_collaborations,
        network_density: format!("{:.3}", stats.network_density),
        connected_members: stats.connected_members,
        isolated_members: stats.isolated_members,
        connected_components: stats.connected_components,
        largest_component_size: stats.largest_component_size,
        founders: state.founders.as_ref().clone(),
        levels,
        search_term,
    })
}

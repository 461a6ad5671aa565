use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use super::{number_label, render};
use crate::handlers::AppState;

#[derive(Template)]
#[template(path = "member.html")]
struct MemberTemplate {
    name: String,
    organization: String,
    isern_number: String,
    is_founder: bool,
    degree_centrality: String,
    collaborators: Vec<CollaboratorItem>,
}

struct CollaboratorItem {
    name: String,
    isern_number: String,
}

pub async fn member_page(State(state): State<AppState>, Path(name): Path<String>) -> Result<Response, StatusCode> {
    if !state.graph.contains(&name) {
        return Err(StatusCode::NOT_FOUND);
    }

    let collaborators = state
        .graph
        .neighbors(&name)
        .into_iter()
        .map(|collaborator| CollaboratorItem {
            name: collaborator.to_string(),
            isern_number: number_label(state.labels.get(collaborator)),
        })
        .collect();

    render(MemberTemplate {
        organization: state.roster.organization(&name).unwrap_or("-").to_string(),
        isern_number: number_label(state.labels.get(&name)),
        is_founder: state.founders.iter().any(|founder| *founder == name),
        degree_centrality: format!("{:.3}", state.graph.degree_centrality(&name)),
        collaborators,
        name,
    })
}

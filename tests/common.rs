use axum::Router;
use isern_network::graph::EdgeSet;
use isern_network::handlers::{router, AppState};
use isern_network::matcher::NameMatcher;
use isern_network::models::{Roster, RosterFile};

/// Small network: a founder chain, one isolated member.
///
/// Victor Basili - Dieter Rombach - Forrest Shull, Koji Torii - Ken-ichi Matsumoto,
/// Daniel Port alone.
pub fn create_test_state() -> AppState {
    let roster: RosterFile = serde_json::from_value(serde_json::json!({
        "isern_members": [
            "Victor Basili",
            "Dieter Rombach",
            "Forrest Shull",
            "Koji Torii",
            "Ken-ichi Matsumoto",
            "Daniel Port"
        ],
        "members": [
            {"name": "Victor Basili", "organization": "University of Maryland (USA)"},
            {"name": "Koji Torii", "organization": "NAIST (Japan)"}
        ]
    }))
    .expect("valid roster");

    let mut edges = EdgeSet::new();
    edges.insert("Victor Basili", "Dieter Rombach");
    edges.insert("Forrest Shull", "Dieter Rombach");
    edges.insert("Koji Torii", "Ken-ichi Matsumoto");

    AppState::new(
        Roster::from_file(roster),
        &edges,
        vec!["Victor Basili".to_string(), "Koji Torii".to_string()],
        NameMatcher::default(),
    )
}

/// Create the application router for testing
pub fn create_test_app() -> Router {
    router(create_test_state())
}

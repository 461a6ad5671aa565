mod common;

use axum_test::TestServer;
use serde_json::{json, Value};

/// Helper to create a test server
fn setup() -> TestServer {
    TestServer::new(common::create_test_app()).unwrap()
}

// ============================================================================
// Network API Tests
// ============================================================================

#[tokio::test]
async fn test_statistics() {
    let server = setup();

    let response = server.get("/api/statistics").await;
    response.assert_status_ok();

    let stats: Value = response.json();
    assert_eq!(stats["total_members"], 6);
    assert_eq!(stats["total_collaborations"], 3);
    assert_eq!(stats["connected_members"], 5);
    assert_eq!(stats["isolated_members"], 1);
    assert_eq!(stats["connected_components"], 3);
    assert_eq!(stats["largest_component_size"], 3);
    assert!((stats["network_density"].as_f64().unwrap() - 0.2).abs() < 1e-9);
}

#[tokio::test]
async fn test_numbers() {
    let server = setup();

    let response = server.get("/api/numbers").await;
    response.assert_status_ok();

    let document: Value = response.json();
    let numbers = &document["isern_numbers"];
    assert_eq!(numbers["Victor Basili"], 0);
    assert_eq!(numbers["Koji Torii"], 0);
    assert_eq!(numbers["Dieter Rombach"], 1);
    assert_eq!(numbers["Ken-ichi Matsumoto"], 1);
    assert_eq!(numbers["Forrest Shull"], 2);
    assert_eq!(numbers["Daniel Port"], "infinity");

    assert_eq!(document["founding_members"], json!(["Victor Basili", "Koji Torii"]));
    assert_eq!(document["total_members"], 6);
    assert_eq!(document["connected_members"], 5);
    assert_eq!(document["metadata"]["max_number"], 2);
}

#[tokio::test]
async fn test_network_edges_are_ordered() {
    let server = setup();

    let response = server.get("/api/network").await;
    response.assert_status_ok();

    let network: Value = response.json();
    assert_eq!(network["nodes"].as_array().unwrap().len(), 6);
    assert_eq!(
        network["edges"],
        json!([
            {"source": "Dieter Rombach", "target": "Forrest Shull"},
            {"source": "Dieter Rombach", "target": "Victor Basili"},
            {"source": "Ken-ichi Matsumoto", "target": "Koji Torii"}
        ])
    );
    assert_eq!(network["metadata"]["num_edges"], 3);
}

// ============================================================================
// Member API Tests
// ============================================================================

#[tokio::test]
async fn test_list_members_in_roster_order() {
    let server = setup();

    let response = server.get("/api/members").await;
    response.assert_status_ok();

    let members: Vec<Value> = response.json();
    assert_eq!(members.len(), 6);
    assert_eq!(members[0]["name"], "Victor Basili");
    assert_eq!(members[0]["organization"], "University of Maryland (USA)");
    assert_eq!(members[0]["isern_number"], 0);
    assert_eq!(members[0]["collaboration_count"], 1);
    assert_eq!(members[5]["name"], "Daniel Port");
    assert_eq!(members[5]["isern_number"], "infinity");
    assert!(members[5].get("organization").is_none());
}

#[tokio::test]
async fn test_search_members() {
    let server = setup();

    let response = server.get("/api/members").add_query_param("search", "rombach").await;
    response.assert_status_ok();
    let members: Vec<Value> = response.json();
    assert!(members.iter().any(|m| m["name"] == "Dieter Rombach"));

    // fuzzy: a short first name still finds the member
    let response = server.get("/api/members").add_query_param("search", "Dan Port").await;
    response.assert_status_ok();
    let members: Vec<Value> = response.json();
    assert!(members.iter().any(|m| m["name"] == "Daniel Port"));
    assert!(!members.iter().any(|m| m["name"] == "Victor Basili"));
}

#[tokio::test]
async fn test_get_member() {
    let server = setup();

    let response = server.get("/api/members/Dieter%20Rombach").await;
    response.assert_status_ok();

    let member: Value = response.json();
    assert_eq!(member["name"], "Dieter Rombach");
    assert_eq!(member["isern_number"], 1);
    assert_eq!(member["collaborators"], json!(["Forrest Shull", "Victor Basili"]));
    assert!((member["degree_centrality"].as_f64().unwrap() - 0.4).abs() < 1e-9);
}

#[tokio::test]
async fn test_get_unknown_member() {
    let server = setup();

    let response = server.get("/api/members/Nobody%20Known").await;
    response.assert_status_not_found();
}

// ============================================================================
// Matching API Tests
// ============================================================================

#[tokio::test]
async fn test_match_against_roster() {
    let server = setup();

    let response = server.post("/api/match").json(&json!({"target": "V. Basili"})).await;
    response.assert_status_ok();

    let matches: Vec<Value> = response.json();
    assert!(!matches.is_empty());
    assert_eq!(matches[0]["name"], "Victor Basili");
    assert!(matches[0]["score"].as_f64().unwrap() >= 0.85);
    assert!(matches[0]["scores"]["composite"].is_number());
}

#[tokio::test]
async fn test_match_with_candidates_and_top_k() {
    let server = setup();

    let response = server
        .post("/api/match")
        .json(&json!({
            "target": "Mike Smith",
            "candidates": ["John Doe", "Michael Smith", "Michael Smith"],
            "top_k": 1
        }))
        .await;
    response.assert_status_ok();

    let matches: Vec<Value> = response.json();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["name"], "Michael Smith");
}

#[tokio::test]
async fn test_match_empty_target() {
    let server = setup();

    let response = server.post("/api/match").json(&json!({"target": "   "})).await;
    response.assert_status_ok();

    let matches: Vec<Value> = response.json();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_dedupe() {
    let server = setup();

    let response = server
        .post("/api/dedupe")
        .json(&json!({"names": ["Michael Smith", "Mike Smith", "M. Smith", "John Doe"]}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["representatives"], json!(["John Doe", "Michael Smith"]));
    assert_eq!(body["merged"], 2);
}

#[tokio::test]
async fn test_similarity() {
    let server = setup();

    let response = server
        .get("/api/similarity")
        .add_query_param("a", "Dan Port")
        .add_query_param("b", "Daniel Port")
        .await;
    response.assert_status_ok();
    let scores: Value = response.json();
    assert!(scores["composite"].as_f64().unwrap() >= 0.85);
    assert_eq!(scores["soundex"], 0.0);

    let response = server
        .get("/api/similarity")
        .add_query_param("a", "Dr.")
        .add_query_param("b", "Victor Basili")
        .await;
    response.assert_status_ok();
    let scores: Value = response.json();
    assert!(scores.is_null());
}

// ============================================================================
// HTML and OpenAPI Tests
// ============================================================================

#[tokio::test]
async fn test_home_page_groups_levels() {
    let server = setup();

    let response = server.get("/").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("ISERN number 0 (founders)"));
    assert!(html.contains("ISERN number 2"));
    assert!(html.contains("Disconnected"));
    assert!(html.contains("Daniel Port"));
}

#[tokio::test]
async fn test_home_page_search() {
    let server = setup();

    let response = server.get("/").add_query_param("search", "Shull").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("Forrest Shull"));
    assert!(!html.contains("Disconnected"));
}

#[tokio::test]
async fn test_member_page() {
    let server = setup();

    let response = server.get("/members/Victor%20Basili").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("<h1>Victor Basili</h1>"));
    assert!(html.contains("University of Maryland (USA)"));
    assert!(html.contains("(founding member)"));
    assert!(html.contains("Dieter Rombach"));

    server.get("/members/Nobody").await.assert_status_not_found();
}

#[tokio::test]
async fn test_openapi_document() {
    let server = setup();

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();

    let doc: Value = response.json();
    assert!(doc["paths"]["/api/match"].is_object());
    assert!(doc["paths"]["/api/members/{name}"].is_object());
}

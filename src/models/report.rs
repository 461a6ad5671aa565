//! Persisted network documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use utoipa::ToSchema;

use crate::errors::DocumentError;
use crate::graph::{CollaborationGraph, DistanceLabels, Edge, EdgeSet, NetworkStatistics};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GraphMetadata {
    pub timestamp: String,
    pub num_nodes: usize,
    pub num_edges: usize,
    pub connected_components: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
}

/// Node/edge listing of the coauthorship graph (`isern_coauthorship_graph.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GraphDocument {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<Edge>,
    pub metadata: GraphMetadata,
}

impl GraphDocument {
    pub fn from_graph(graph: &CollaborationGraph, timestamp: impl Into<String>) -> Self {
        let mut nodes: Vec<GraphNode> = graph
            .members()
            .map(|name| GraphNode {
                id: name.to_string(),
                label: name.to_string(),
            })
            .collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        let edges: Vec<Edge> = graph.edges().iter().cloned().collect();

        Self {
            metadata: GraphMetadata {
                timestamp: timestamp.into(),
                num_nodes: nodes.len(),
                num_edges: edges.len(),
                connected_components: graph.components().len(),
                data_source: Some("DBLP".to_string()),
            },
            nodes,
            edges,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| DocumentError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|node| node.id.as_str()).collect()
    }

    /// Edges re-normalized into a set; reversed or repeated pairs collapse.
    pub fn edge_set(&self) -> EdgeSet {
        self.edges.iter().cloned().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NumbersMetadata {
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
}

/// Distance labels plus context (`isern_numbers.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NumbersDocument {
    /// Member name to distance; unreachable members carry `"infinity"`
    #[schema(value_type = Object)]
    pub isern_numbers: DistanceLabels,
    pub founding_members: Vec<String>,
    pub total_members: usize,
    pub connected_members: usize,
    pub metadata: NumbersMetadata,
}

impl NumbersDocument {
    pub fn new<S: AsRef<str>>(labels: DistanceLabels, founders: &[S], timestamp: impl Into<String>) -> Self {
        let max_number = labels.iter().filter_map(|(_, d)| d.finite()).max();
        Self {
            total_members: labels.len(),
            connected_members: labels.reachable_count(),
            founding_members: founders.iter().map(|f| f.as_ref().to_string()).collect(),
            isern_numbers: labels,
            metadata: NumbersMetadata {
                timestamp: timestamp.into(),
                max_number,
                data_source: Some("DBLP".to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportMetadata {
    pub timestamp: String,
    pub method: String,
    pub description: String,
}

/// Per-member line of the full collaboration report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MemberSummary {
    pub collaboration_count: usize,
    pub collaborators: Vec<String>,
    pub degree_centrality: f64,
    #[serde(default)]
    pub betweenness_centrality: f64,
    #[serde(default)]
    pub closeness_centrality: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub isern_number: Option<crate::graph::Distance>,
}

/// Full network report (`isern_full_collaboration_network.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CollaborationReport {
    pub metadata: ReportMetadata,
    pub network_statistics: NetworkStatistics,
    pub members: BTreeMap<String, MemberSummary>,
}

impl CollaborationReport {
    pub fn new(
        graph: &CollaborationGraph,
        labels: Option<&DistanceLabels>,
        organizations: impl Fn(&str) -> Option<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        let betweenness = graph.betweenness_centrality();
        let members = graph
            .members()
            .map(|name| {
                let collaborators: Vec<String> =
                    graph.neighbors(name).into_iter().map(str::to_string).collect();
                let summary = MemberSummary {
                    collaboration_count: collaborators.len(),
                    collaborators,
                    degree_centrality: graph.degree_centrality(name),
                    betweenness_centrality: betweenness.get(name).copied().unwrap_or(0.0),
                    closeness_centrality: graph.closeness_centrality(name),
                    organization: organizations(name),
                    isern_number: labels.and_then(|labels| labels.get(name)),
                };
                (name.to_string(), summary)
            })
            .collect();

        Self {
            metadata: ReportMetadata {
                timestamp: timestamp.into(),
                method: "full_member_to_member_collaboration_discovery".to_string(),
                description: "Complete ISERN collaboration network from DBLP data".to_string(),
            },
            network_statistics: graph.statistics(),
            members,
        }
    }
}

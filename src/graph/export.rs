//! Writers for the network output files.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use super::distance::DistanceLabels;
use super::edges::EdgeSet;
use super::network::CollaborationGraph;
use crate::errors::ExportError;
use crate::models::CollaborationReport;

fn write_file(path: &Path, content: &str) -> Result<(), ExportError> {
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, content).map_err(io_error)
}

/// Pretty-printed JSON, non-ASCII kept as-is.
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), ExportError> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(value).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_file(path, &content)
}

/// Tab-separated edge list with a `Member1\tMember2` header.
pub fn render_edge_list(edges: &EdgeSet) -> String {
    let mut out = String::from("Member1\tMember2\n");
    for edge in edges {
        let _ = writeln!(out, "{}\t{}", edge.source, edge.target);
    }
    out
}

pub fn write_edge_list(path: impl AsRef<Path>, edges: &EdgeSet) -> Result<(), ExportError> {
    write_file(path.as_ref(), &render_edge_list(edges))
}

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";
const GRAPHML_SCHEMA: &str =
    "http://graphml.graphdrawing.org/xmlns http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd";

fn emit<W: io::Write>(writer: &mut Writer<W>, event: Event<'_>) -> io::Result<()> {
    writer.write_event(event).map_err(io::Error::other)
}

fn graphml_events<W: io::Write>(
    writer: &mut Writer<W>,
    graph: &CollaborationGraph,
    labels: Option<&DistanceLabels>,
) -> io::Result<()> {
    emit(writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new("graphml");
    root.push_attribute(("xmlns", GRAPHML_NS));
    root.push_attribute(("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"));
    root.push_attribute(("xsi:schemaLocation", GRAPHML_SCHEMA));
    emit(writer, Event::Start(root))?;

    if labels.is_some() {
        let mut key = BytesStart::new("key");
        key.push_attribute(("id", "d0"));
        key.push_attribute(("for", "node"));
        key.push_attribute(("attr.name", "isern_number"));
        key.push_attribute(("attr.type", "long"));
        emit(writer, Event::Empty(key))?;
    }

    let mut body = BytesStart::new("graph");
    body.push_attribute(("edgedefault", "undirected"));
    emit(writer, Event::Start(body))?;

    for name in graph.members() {
        let mut node = BytesStart::new("node");
        node.push_attribute(("id", name));
        match labels.and_then(|labels| labels.get(name)).and_then(|d| d.finite()) {
            Some(number) => {
                emit(writer, Event::Start(node))?;
                let mut data = BytesStart::new("data");
                data.push_attribute(("key", "d0"));
                emit(writer, Event::Start(data))?;
                emit(writer, Event::Text(BytesText::new(&number.to_string())))?;
                emit(writer, Event::End(BytesEnd::new("data")))?;
                emit(writer, Event::End(BytesEnd::new("node")))?;
            }
            None => emit(writer, Event::Empty(node))?,
        }
    }

    for edge in &graph.edges() {
        let mut element = BytesStart::new("edge");
        element.push_attribute(("source", edge.source.as_str()));
        element.push_attribute(("target", edge.target.as_str()));
        emit(writer, Event::Empty(element))?;
    }

    emit(writer, Event::End(BytesEnd::new("graph")))?;
    emit(writer, Event::End(BytesEnd::new("graphml")))
}

/// GraphML document; nodes carry an `isern_number` attribute when labels are given
/// (unreachable members get none).
pub fn render_graphml(graph: &CollaborationGraph, labels: Option<&DistanceLabels>) -> io::Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    graphml_events(&mut writer, graph, labels)?;
    String::from_utf8(writer.into_inner()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

pub fn write_graphml(
    path: impl AsRef<Path>,
    graph: &CollaborationGraph,
    labels: Option<&DistanceLabels>,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let content = render_graphml(graph, labels).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_file(path, &content)
}

/// Plain-text overview: headline statistics and the top collaborators.
pub fn render_summary(report: &CollaborationReport) -> String {
    let stats = &report.network_statistics;
    let mut out = String::new();
    out.push_str("ISERN Collaboration Network Summary\n");
    out.push_str("===================================\n\n");
    let _ = writeln!(out, "Total Members: {}", stats.total_members);
    let _ = writeln!(out, "Total Collaborations: {}", stats.total_collaborations);
    let _ = writeln!(out, "Network Density: {:.3}", stats.network_density);
    let _ = writeln!(out, "Connected Members: {}", stats.connected_members);
    let _ = writeln!(out, "Isolated Members: {}\n", stats.isolated_members);

    out.push_str("Top Collaborators:\n");
    let mut ranked: Vec<(&String, usize)> = report
        .members
        .iter()
        .map(|(name, summary)| (name, summary.collaboration_count))
        .filter(|(_, count)| *count > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    for (name, count) in ranked.into_iter().take(20) {
        let _ = writeln!(out, "  {name}: {count} collaborations");
    }

    let mut bridges: Vec<(&String, f64)> = report
        .members
        .iter()
        .map(|(name, summary)| (name, summary.betweenness_centrality))
        .filter(|(_, centrality)| *centrality > 0.0)
        .collect();
    if !bridges.is_empty() {
        bridges.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        out.push_str("\nKey Bridge Connectors:\n");
        for (name, centrality) in bridges.into_iter().take(5) {
            let _ = writeln!(out, "  {name}: {centrality:.3}");
        }
    }
    out
}

pub fn write_summary(path: impl AsRef<Path>, report: &CollaborationReport) -> Result<(), ExportError> {
    write_file(path.as_ref(), &render_summary(report))
}

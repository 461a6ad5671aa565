//! Collaboration graph over the roster and network-level statistics.

use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, VecDeque};
use utoipa::ToSchema;

use super::edges::{Edge, EdgeSet};

/// Summary numbers for the whole network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NetworkStatistics {
    pub total_members: usize,
    pub total_collaborations: usize,
    pub network_density: f64,
    pub connected_components: usize,
    pub connected_members: usize,
    pub isolated_members: usize,
    pub largest_component_size: usize,
}

/// Undirected graph whose vertices are the roster plus every edge endpoint.
pub struct CollaborationGraph {
    graph: UnGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl CollaborationGraph {
    /// Build the graph; vertices keep `members` order, then unseen endpoints in sorted order.
    pub fn new<S: AsRef<str>>(members: &[S], edges: &EdgeSet) -> Self {
        let mut graph = Self {
            graph: UnGraph::new_undirected(),
            node_map: HashMap::new(),
        };

        for member in members {
            graph.get_or_create_node(member.as_ref());
        }
        for edge in edges {
            let source = graph.get_or_create_node(&edge.source);
            let target = graph.get_or_create_node(&edge.target);
            graph.graph.add_edge(source, target, ());
        }
        graph
    }

    fn get_or_create_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(name) {
            idx
        } else {
            let idx = self.graph.add_node(name.to_string());
            self.node_map.insert(name.to_string(), idx);
            idx
        }
    }

    pub(crate) fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    pub(crate) fn name(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    pub(crate) fn neighbor_indices(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    /// Vertex names in insertion order.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// Sorted collaborators of `name`; empty for unknown names.
    pub fn neighbors(&self, name: &str) -> Vec<&str> {
        let Some(idx) = self.node_index(name) else {
            return Vec::new();
        };
        let mut neighbors: Vec<&str> = self.graph.neighbors(idx).map(|n| self.name(n)).collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    pub fn degree(&self, name: &str) -> usize {
        self.neighbors(name).len()
    }

    /// Fraction of the other members `name` collaborates with.
    pub fn degree_centrality(&self, name: &str) -> f64 {
        let n = self.node_count();
        if n < 2 {
            return 0.0;
        }
        self.degree(name) as f64 / (n - 1) as f64
    }

    /// Closeness with the Wasserman-Faust correction for disconnected graphs:
    /// `(r-1)/Σd · (r-1)/(n-1)` where `r` counts the vertices reachable from `name`
    /// (itself included). Isolated and unknown members score 0.
    pub fn closeness_centrality(&self, name: &str) -> f64 {
        let n = self.node_count();
        let Some(idx) = self.node_index(name) else {
            return 0.0;
        };
        let distances = dijkstra(&self.graph, idx, None, |_| 1usize);
        let total: usize = distances.values().sum();
        if total == 0 || n < 2 {
            return 0.0;
        }
        let others = (distances.len() - 1) as f64;
        (others / total as f64) * (others / (n - 1) as f64)
    }

    /// Normalized betweenness of every vertex (Brandes), keyed by name.
    ///
    /// Each unordered pair contributes the fraction of its shortest paths that
    /// pass through a vertex; totals are divided by `(n-1)(n-2)/2`.
    pub fn betweenness_centrality(&self) -> BTreeMap<String, f64> {
        let n = self.node_count();
        let mut centrality = vec![0.0_f64; n];

        for source in self.graph.node_indices() {
            let mut order = Vec::with_capacity(n);
            let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];
            let mut paths = vec![0.0_f64; n];
            let mut distance: Vec<Option<usize>> = vec![None; n];
            paths[source.index()] = 1.0;
            distance[source.index()] = Some(0);

            let mut queue = VecDeque::from([source]);
            while let Some(v) = queue.pop_front() {
                order.push(v);
                let Some(dv) = distance[v.index()] else { continue };
                for w in self.graph.neighbors(v) {
                    if distance[w.index()].is_none() {
                        distance[w.index()] = Some(dv + 1);
                        queue.push_back(w);
                    }
                    if distance[w.index()] == Some(dv + 1) {
                        paths[w.index()] += paths[v.index()];
                        predecessors[w.index()].push(v);
                    }
                }
            }

            let mut dependency = vec![0.0_f64; n];
            while let Some(w) = order.pop() {
                for &v in &predecessors[w.index()] {
                    dependency[v.index()] += paths[v.index()] / paths[w.index()] * (1.0 + dependency[w.index()]);
                }
                if w != source {
                    centrality[w.index()] += dependency[w.index()];
                }
            }
        }

        // Every pair was walked from both ends.
        let scale = if n > 2 { 1.0 / ((n - 1) * (n - 2)) as f64 } else { 0.0 };
        self.graph
            .node_indices()
            .map(|idx| (self.name(idx).to_string(), centrality[idx.index()] * scale))
            .collect()
    }

    pub fn density(&self) -> f64 {
        let n = self.node_count();
        if n < 2 {
            return 0.0;
        }
        (2 * self.edge_count()) as f64 / (n * (n - 1)) as f64
    }

    /// Edges as an ordered set.
    pub fn edges(&self) -> EdgeSet {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .filter_map(|(a, b)| Edge::new(self.name(a), self.name(b)))
            .collect()
    }

    /// Connected components, largest first; members sorted within each,
    /// equal sizes ordered by their first member.
    pub fn components(&self) -> Vec<Vec<String>> {
        let mut component_of = vec![usize::MAX; self.node_count()];
        let mut components: Vec<Vec<String>> = Vec::new();

        for start in self.graph.node_indices() {
            if component_of[start.index()] != usize::MAX {
                continue;
            }
            let id = components.len();
            let mut members = Vec::new();
            let mut stack = vec![start];
            while let Some(node) = stack.pop() {
                if component_of[node.index()] != usize::MAX {
                    continue;
                }
                component_of[node.index()] = id;
                members.push(self.name(node).to_string());
                for neighbor in self.graph.neighbors(node) {
                    if component_of[neighbor.index()] == usize::MAX {
                        stack.push(neighbor);
                    }
                }
            }
            members.sort();
            components.push(members);
        }

        components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.first().cmp(&b.first())));
        components
    }

    pub fn statistics(&self) -> NetworkStatistics {
        let components = self.components();
        let connected_members = self.members().filter(|m| self.degree(m) > 0).count();
        let largest_component_size = if self.edge_count() > 0 {
            components.first().map(Vec::len).unwrap_or(0)
        } else {
            0
        };

        NetworkStatistics {
            total_members: self.node_count(),
            total_collaborations: self.edge_count(),
            network_density: self.density(),
            connected_components: components.len(),
            connected_members,
            isolated_members: self.node_count() - connected_members,
            largest_component_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CollaborationGraph {
        let mut edges = EdgeSet::new();
        edges.insert("A", "B");
        edges.insert("B", "C");
        edges.insert("E", "F");
        CollaborationGraph::new(&["A", "B", "C", "D"], &edges)
    }

    #[test]
    fn test_vertices_include_edge_endpoints() {
        let graph = sample();
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.members().collect::<Vec<_>>(), vec!["A", "B", "C", "D", "E", "F"]);
        assert!(graph.contains("F"));
    }

    #[test]
    fn test_neighbors_and_degree() {
        let graph = sample();
        assert_eq!(graph.neighbors("B"), vec!["A", "C"]);
        assert_eq!(graph.degree("D"), 0);
        assert!(graph.neighbors("Z").is_empty());
        assert!((graph.degree_centrality("B") - 2.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_components_largest_first() {
        let components = sample().components();
        assert_eq!(
            components,
            vec![
                vec!["A".to_string(), "B".to_string(), "C".to_string()],
                vec!["E".to_string(), "F".to_string()],
                vec!["D".to_string()],
            ]
        );
    }

    #[test]
    fn test_statistics() {
        let stats = sample().statistics();
        assert_eq!(stats.total_members, 6);
        assert_eq!(stats.total_collaborations, 3);
        assert_eq!(stats.connected_components, 3);
        assert_eq!(stats.connected_members, 5);
        assert_eq!(stats.isolated_members, 1);
        assert_eq!(stats.largest_component_size, 3);
        assert!((stats.network_density - 6.0 / 30.0).abs() < 1e-12);
    }

    fn path(names: &[&str], extra: &[&str]) -> CollaborationGraph {
        let mut edges = EdgeSet::new();
        for pair in names.windows(2) {
            edges.insert(pair[0], pair[1]);
        }
        let members: Vec<&str> = names.iter().chain(extra).copied().collect();
        CollaborationGraph::new(&members, &edges)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_betweenness_on_paths() {
        let three = path(&["A", "B", "C"], &[]).betweenness_centrality();
        assert!(close(three["A"], 0.0));
        assert!(close(three["B"], 1.0));
        assert!(close(three["C"], 0.0));

        let four = path(&["A", "B", "C", "D"], &[]).betweenness_centrality();
        assert!(close(four["B"], 2.0 / 3.0));
        assert!(close(four["C"], 2.0 / 3.0));
        assert!(close(four["D"], 0.0));

        // an isolated member still counts towards n
        let with_isolated = path(&["A", "B", "C"], &["D"]).betweenness_centrality();
        assert!(close(with_isolated["B"], 1.0 / 3.0));
        assert!(close(with_isolated["D"], 0.0));
    }

    #[test]
    fn test_betweenness_splits_between_equal_paths() {
        let mut edges = EdgeSet::new();
        edges.insert("A", "B");
        edges.insert("A", "C");
        edges.insert("B", "D");
        edges.insert("C", "D");
        let square = CollaborationGraph::new(&["A", "B", "C", "D"], &edges).betweenness_centrality();
        // A-D runs through B or C with equal weight
        for name in ["A", "B", "C", "D"] {
            assert!(close(square[name], 1.0 / 6.0), "{name}");
        }
    }

    #[test]
    fn test_closeness_on_paths() {
        let graph = path(&["A", "B", "C"], &[]);
        assert!(close(graph.closeness_centrality("A"), 2.0 / 3.0));
        assert!(close(graph.closeness_centrality("B"), 1.0));

        let graph = path(&["A", "B", "C"], &["D"]);
        assert!(close(graph.closeness_centrality("A"), 4.0 / 9.0));
        assert!(close(graph.closeness_centrality("B"), 2.0 / 3.0));
        assert_eq!(graph.closeness_centrality("D"), 0.0);
        assert_eq!(graph.closeness_centrality("Z"), 0.0);
    }

    #[test]
    fn test_statistics_without_edges() {
        let graph = CollaborationGraph::new(&["A", "B"], &EdgeSet::new());
        let stats = graph.statistics();
        assert_eq!(stats.largest_component_size, 0);
        assert_eq!(stats.network_density, 0.0);
        assert_eq!(stats.isolated_members, 2);
        assert_eq!(graph.edges(), EdgeSet::new());
    }
}

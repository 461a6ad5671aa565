use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use utoipa::ToSchema;

/// An undirected collaboration between two members, stored with the
/// lexicographically smaller name as `source`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    /// Order the endpoints; self-loops are rejected.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Option<Self> {
        let (a, b) = (a.into(), b.into());
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { source: a, target: b }),
            std::cmp::Ordering::Greater => Some(Self { source: b, target: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn touches(&self, name: &str) -> bool {
        self.source == name || self.target == name
    }

    /// The endpoint opposite `name`, if `name` is an endpoint.
    pub fn other(&self, name: &str) -> Option<&str> {
        if self.source == name {
            Some(&self.target)
        } else if self.target == name {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// Set of collaboration edges, iterated in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSet {
    edges: BTreeSet<Edge>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the pair {a, b}. Returns false for self-loops and pairs already present.
    pub fn insert(&mut self, a: &str, b: &str) -> bool {
        match Edge::new(a, b) {
            Some(edge) => self.edges.insert(edge),
            None => false,
        }
    }

    pub fn contains(&self, a: &str, b: &str) -> bool {
        Edge::new(a, b).is_some_and(|edge| self.edges.contains(&edge))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Every name that appears in at least one edge.
    pub fn endpoints(&self) -> BTreeSet<&str> {
        self.edges
            .iter()
            .flat_map(|edge| [edge.source.as_str(), edge.target.as_str()])
            .collect()
    }

    /// Sorted neighbour lists keyed by endpoint.
    pub fn adjacency(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        let mut adjacency: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for edge in &self.edges {
            adjacency.entry(&edge.source).or_default().insert(&edge.target);
            adjacency.entry(&edge.target).or_default().insert(&edge.source);
        }
        adjacency
    }
}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<T: IntoIterator<Item = Edge>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<Edge> for EdgeSet {
    fn extend<T: IntoIterator<Item = Edge>>(&mut self, iter: T) {
        for edge in iter {
            if edge.source != edge.target {
                self.insert(&edge.source, &edge.target);
            }
        }
    }
}

impl<'a> IntoIterator for &'a EdgeSet {
    type Item = &'a Edge;
    type IntoIter = std::collections::btree_set::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_orders_endpoints() {
        let edge = Edge::new("Victor Basili", "Dieter Rombach").unwrap();
        assert_eq!(edge.source, "Dieter Rombach");
        assert_eq!(edge.target, "Victor Basili");
        assert_eq!(edge.other("Dieter Rombach"), Some("Victor Basili"));
        assert_eq!(edge.other("Koji Torii"), None);
        assert!(Edge::new("A", "A").is_none());
    }

    #[test]
    fn test_edge_set_is_undirected() {
        let mut edges = EdgeSet::new();
        assert!(edges.insert("B", "A"));
        assert!(!edges.insert("A", "B"));
        assert!(!edges.insert("C", "C"));
        assert!(edges.contains("A", "B"));
        assert!(edges.contains("B", "A"));
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn test_extend_normalizes_unordered_edges() {
        let edges: EdgeSet = vec![
            Edge { source: "B".into(), target: "A".into() },
            Edge { source: "A".into(), target: "B".into() },
            Edge { source: "C".into(), target: "C".into() },
        ]
        .into_iter()
        .collect();
        assert_eq!(edges.len(), 1);
        let first = edges.iter().next().unwrap();
        assert_eq!((first.source.as_str(), first.target.as_str()), ("A", "B"));
    }

    #[test]
    fn test_adjacency_and_endpoints() {
        let mut edges = EdgeSet::new();
        edges.insert("A", "B");
        edges.insert("B", "C");
        let adjacency = edges.adjacency();
        assert_eq!(adjacency["B"].iter().copied().collect::<Vec<_>>(), vec!["A", "C"]);
        assert_eq!(edges.endpoints().into_iter().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }
}

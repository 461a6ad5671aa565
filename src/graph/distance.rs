//! Graph distance from the founder set ("ISERN number").

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;

use super::network::CollaborationGraph;

const UNREACHABLE_LABEL: &str = "infinity";

/// Hop count from the nearest founder.
///
/// Serialized as a plain integer, or as the string `"infinity"` when no
/// founder can be reached. Orders finite distances first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Distance {
    Finite(u32),
    Unreachable,
}

impl Distance {
    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn finite(&self) -> Option<u32> {
        match self {
            Distance::Finite(d) => Some(*d),
            Distance::Unreachable => None,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{d}"),
            Distance::Unreachable => f.write_str(UNREACHABLE_LABEL),
        }
    }
}

impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Distance::Finite(d) => serializer.serialize_u32(*d),
            Distance::Unreachable => serializer.serialize_str(UNREACHABLE_LABEL),
        }
    }
}

struct DistanceVisitor;

impl<'de> Visitor<'de> for DistanceVisitor {
    type Value = Distance;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or \"infinity\"")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Distance, E> {
        u32::try_from(v)
            .map(Distance::Finite)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Distance, E> {
        u32::try_from(v)
            .map(Distance::Finite)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Distance, E> {
        if v == UNREACHABLE_LABEL {
            Ok(Distance::Unreachable)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for Distance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DistanceVisitor)
    }
}

/// Distance per vertex, sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistanceLabels(BTreeMap<String, Distance>);

impl DistanceLabels {
    pub fn get(&self, name: &str) -> Option<Distance> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Distance)> {
        self.0.iter().map(|(name, d)| (name.as_str(), *d))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of vertices with a finite distance.
    pub fn reachable_count(&self) -> usize {
        self.0.values().filter(|d| d.is_finite()).count()
    }

    /// Members grouped by distance, unreachable last.
    pub fn levels(&self) -> BTreeMap<Distance, Vec<String>> {
        let mut levels: BTreeMap<Distance, Vec<String>> = BTreeMap::new();
        for (name, distance) in &self.0 {
            levels.entry(*distance).or_default().push(name.clone());
        }
        levels
    }

    pub fn into_inner(self) -> BTreeMap<String, Distance> {
        self.0
    }
}

impl FromIterator<(String, Distance)> for DistanceLabels {
    fn from_iter<T: IntoIterator<Item = (String, Distance)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Multi-source BFS from every founder present in the graph.
///
/// Founders are seeded at distance 0 in list order (duplicates ignored);
/// the first discovery of a vertex fixes its distance. Vertices no founder
/// reaches are [`Distance::Unreachable`]. Founders that are not vertices of
/// the graph are skipped.
pub fn label_distances<S: AsRef<str>>(graph: &CollaborationGraph, founders: &[S]) -> DistanceLabels {
    let mut distance: Vec<Option<u32>> = vec![None; graph.node_count()];
    let mut queue = VecDeque::new();
    let mut seeded = HashSet::new();

    for founder in founders {
        let founder = founder.as_ref();
        if !seeded.insert(founder) {
            continue;
        }
        match graph.node_index(founder) {
            Some(idx) => {
                distance[idx.index()] = Some(0);
                queue.push_back(idx);
            }
            None => tracing::debug!("Founder {:?} is not in the network, skipping", founder),
        }
    }

    while let Some(current) = queue.pop_front() {
        let Some(current_distance) = distance[current.index()] else {
            continue;
        };
        for neighbor in graph.neighbor_indices(current) {
            if distance[neighbor.index()].is_none() {
                distance[neighbor.index()] = Some(current_distance + 1);
                queue.push_back(neighbor);
            }
        }
    }

    graph
        .members()
        .filter_map(|name| graph.node_index(name).map(|idx| (name, idx)))
        .map(|(name, idx)| {
            let label = distance[idx.index()].map_or(Distance::Unreachable, Distance::Finite);
            (name.to_string(), label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeSet;

    fn chain() -> CollaborationGraph {
        let mut edges = EdgeSet::new();
        edges.insert("A", "B");
        edges.insert("B", "C");
        CollaborationGraph::new(&["A", "B", "C"], &edges)
    }

    #[test]
    fn test_chain_distances() {
        let labels = label_distances(&chain(), &["A"]);
        assert_eq!(labels.get("A"), Some(Distance::Finite(0)));
        assert_eq!(labels.get("B"), Some(Distance::Finite(1)));
        assert_eq!(labels.get("C"), Some(Distance::Finite(2)));
    }

    #[test]
    fn test_nearest_founder_wins() {
        let labels = label_distances(&chain(), &["A", "C", "A"]);
        assert_eq!(labels.get("B"), Some(Distance::Finite(1)));
        assert_eq!(labels.get("C"), Some(Distance::Finite(0)));
    }

    #[test]
    fn test_missing_founders_are_skipped() {
        let labels = label_distances(&chain(), &["Nobody"]);
        assert_eq!(labels.len(), 3);
        assert!(labels.iter().all(|(_, d)| d == Distance::Unreachable));

        let empty: [&str; 0] = [];
        assert_eq!(label_distances(&chain(), &empty).reachable_count(), 0);
    }

    #[test]
    fn test_serde_representation() {
        let labels: DistanceLabels = [
            ("A".to_string(), Distance::Finite(0)),
            ("D".to_string(), Distance::Unreachable),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"{"A":0,"D":"infinity"}"#);
        let back: DistanceLabels = serde_json::from_str(&json).unwrap();
        assert_eq!(back, labels);
        assert!(serde_json::from_str::<Distance>(r#""far""#).is_err());
        assert!(serde_json::from_str::<Distance>("-1").is_err());
    }

    #[test]
    fn test_levels_put_unreachable_last() {
        let mut edges = EdgeSet::new();
        edges.insert("A", "B");
        let graph = CollaborationGraph::new(&["A", "B", "C"], &edges);
        let levels = label_distances(&graph, &["A"]).levels();
        let keys: Vec<Distance> = levels.keys().copied().collect();
        assert_eq!(keys, vec![Distance::Finite(0), Distance::Finite(1), Distance::Unreachable]);
        assert_eq!(levels[&Distance::Unreachable], vec!["C".to_string()]);
    }
}

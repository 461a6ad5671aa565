pub mod distance;
pub mod edges;
pub mod export;
pub mod network;

pub use distance::{label_distances, Distance, DistanceLabels};
pub use edges::{Edge, EdgeSet};
pub use network::{CollaborationGraph, NetworkStatistics};

//! Coauthor sources and member-to-member collaboration discovery.

pub mod collaborations;
pub mod dblp;
pub mod source;

pub use collaborations::{discover_collaborations, CoauthorMatch, DiscoveryResult, MemberCollaborations};
pub use dblp::DblpClient;
pub use source::{CoauthorSource, RecordedSource, RecordingSource};

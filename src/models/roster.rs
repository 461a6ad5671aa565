use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use utoipa::ToSchema;

use crate::errors::RosterError;

/// Provenance block stored alongside the member list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RosterMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_members: Option<usize>,
}

/// One scraped member entry with its affiliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MemberRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

/// On-disk roster document. Only `isern_members` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterFile {
    pub isern_members: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RosterMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberRecord>,
}

/// The fixed set of known member names for one run.
///
/// Names are trimmed, empty names dropped, and exact duplicates removed;
/// first-seen order is kept because discovery walks members in roster order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    members: Vec<String>,
    organizations: BTreeMap<String, String>,
}

impl Roster {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let members = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty() && seen.insert(name.clone()))
            .collect();

        Self {
            members,
            organizations: BTreeMap::new(),
        }
    }

    pub fn from_file(file: RosterFile) -> Self {
        let mut roster = Self::new(&file.isern_members);
        for record in file.members {
            let name = record.name.trim();
            if let Some(org) = record.organization.filter(|org| !org.trim().is_empty()) {
                if roster.contains(name) {
                    roster.organizations.insert(name.to_string(), org.trim().to_string());
                }
            }
        }
        roster
    }

    /// Read and validate a roster file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: RosterFile = serde_json::from_str(&content).map_err(|source| RosterError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let roster = Self::from_file(file);
        if roster.is_empty() {
            return Err(RosterError::Empty {
                path: path.to_path_buf(),
            });
        }

        tracing::info!("Loaded {} roster members from {}", roster.len(), path.display());
        Ok(roster)
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|member| member == name)
    }

    pub fn organization(&self, name: &str) -> Option<&str> {
        self.organizations.get(name).map(String::as_str)
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

use crate::utils::title_key;

/// A bibliographic record reduced to what collaboration discovery needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Publication {
    pub title: String,
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl Publication {
    pub fn new(title: impl Into<String>, authors: Vec<String>) -> Self {
        Self {
            title: title.into(),
            authors,
            year: None,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Deduplication key: lower-cased, trimmed title.
    pub fn key(&self) -> String {
        title_key(&self.title)
    }
}

/// Keep the first publication seen for each title key.
pub fn dedupe_publications(publications: Vec<Publication>) -> Vec<Publication> {
    let mut seen = HashSet::new();
    publications
        .into_iter()
        .filter(|publication| seen.insert(publication.key()))
        .collect()
}

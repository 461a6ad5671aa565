use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use crate::errors::{DocumentError, SourceError};
use crate::models::Publication;

/// Supplier of publication records for a roster member.
#[async_trait]
pub trait CoauthorSource: Send + Sync {
    /// Publications attributed to `member`, deduplicated by title.
    async fn publications(&self, member: &str) -> Result<Vec<Publication>, SourceError>;
}

/// Publications captured earlier, replayed without network access.
///
/// Serialized as a plain `{member: [publication, ...]}` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordedSource {
    records: BTreeMap<String, Vec<Publication>>,
}

impl RecordedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, member: impl Into<String>, publications: Vec<Publication>) {
        self.records.insert(member.into(), publications);
    }

    pub fn with(mut self, member: impl Into<String>, publications: Vec<Publication>) -> Self {
        self.insert(member, publications);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
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
}

#[async_trait]
impl CoauthorSource for RecordedSource {
    async fn publications(&self, member: &str) -> Result<Vec<Publication>, SourceError> {
        self.records
            .get(member)
            .cloned()
            .ok_or_else(|| SourceError::Missing(member.to_string()))
    }
}

/// Wraps another source and keeps a copy of every successful answer.
pub struct RecordingSource<S> {
    inner: S,
    records: Mutex<RecordedSource>,
}

impl<S: CoauthorSource> RecordingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            records: Mutex::new(RecordedSource::new()),
        }
    }

    /// Everything recorded so far.
    pub fn recorded(&self) -> RecordedSource {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

#[async_trait]
impl<S: CoauthorSource> CoauthorSource for RecordingSource<S> {
    async fn publications(&self, member: &str) -> Result<Vec<Publication>, SourceError> {
        let publications = self.inner.publications(member).await?;
        let mut records = self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        records.insert(member, publications.clone());
        Ok(publications)
    }
}

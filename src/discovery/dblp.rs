//! DBLP search API client.
//!
//! Every member is looked up with a few query variants against
//! `https://dblp.org/search/publ/api` (JSON format):
//!
//! - `author:"Full Name"`
//! - `"Last" "First"`
//! - `author:"F. Last"` (when the first name is more than an initial)
//!
//! Optionally the author search API is consulted first and every alias that
//! the matcher accepts as the same person (strict mode) adds another
//! `author:"..."` query. Results are merged and deduplicated by title.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::source::CoauthorSource;
use crate::config::DblpConfig;
use crate::errors::SourceError;
use crate::matcher::NameMatcher;
use crate::models::{dedupe_publications, Publication};

// --- DBLP API Response Structures ---

#[derive(Debug, Deserialize)]
struct DblpResponse<T> {
    result: DblpResult<T>,
}

#[derive(Debug, Deserialize)]
struct DblpResult<T> {
    hits: DblpHits<T>,
}

#[derive(Debug, Deserialize)]
struct DblpHits<T> {
    #[serde(default = "Vec::new")]
    hit: Vec<DblpHit<T>>,
}

#[derive(Debug, Deserialize)]
struct DblpHit<T> {
    info: Option<T>,
}

/// DBLP renders some values as a bare string and others as `{"text": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrStruct {
    String(String),
    Struct { text: String },
}

impl StringOrStruct {
    fn into_text(self) -> String {
        match self {
            StringOrStruct::String(s) | StringOrStruct::Struct { text: s } => s,
        }
    }
}

/// A single value or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PublicationInfo {
    title: Option<OneOrMany<String>>,
    authors: Option<AuthorList>,
    year: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthorList {
    author: OneOrMany<StringOrStruct>,
}

#[derive(Debug, Deserialize)]
struct AuthorInfo {
    author: Option<String>,
    aliases: Option<AliasList>,
}

#[derive(Debug, Deserialize)]
struct AliasList {
    alias: OneOrMany<String>,
}

impl PublicationInfo {
    /// Records without authors are useless for coauthor discovery.
    fn into_publication(self) -> Option<Publication> {
        let authors: Vec<String> = self
            .authors?
            .author
            .into_vec()
            .into_iter()
            .map(|author| author.into_text().trim().to_string())
            .filter(|author| !author.is_empty())
            .collect();
        if authors.is_empty() {
            return None;
        }

        let title = self
            .title
            .and_then(|title| title.into_vec().into_iter().next())
            .unwrap_or_else(|| "No title".to_string());

        Some(Publication {
            title,
            authors,
            year: self.year.and_then(|year| year.trim().parse().ok()),
        })
    }
}

/// Query variants for one member, most specific first.
///
/// ```
/// use isern_network::discovery::dblp::search_queries;
///
/// assert_eq!(
///     search_queries("Victor Basili"),
///     vec![
///         r#"author:"Victor Basili""#.to_string(),
///         r#""Basili" "Victor""#.to_string(),
///         r#"author:"V. Basili""#.to_string(),
///     ]
/// );
/// assert_eq!(search_queries("Plato"), vec![r#"author:"Plato""#.to_string()]);
/// ```
pub fn search_queries(member: &str) -> Vec<String> {
    let full = member.split_whitespace().collect::<Vec<&str>>().join(" ");
    let parts: Vec<&str> = full.split(' ').collect();

    let mut queries = vec![format!("author:\"{full}\"")];
    if parts.len() >= 2 {
        let first = parts[0];
        let last = parts[parts.len() - 1];
        queries.push(format!("\"{last}\" \"{first}\""));
        let mut first_chars = first.trim_end_matches('.').chars();
        if let (Some(initial), Some(_)) = (first_chars.next(), first_chars.next()) {
            let query = format!("author:\"{initial}. {last}\"");
            if !queries.contains(&query) {
                queries.push(query);
            }
        }
    }
    queries
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// 500 ms doubled per attempt, capped at [`MAX_BACKOFF`].
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(2u64.saturating_pow(attempt).saturating_mul(500)).min(MAX_BACKOFF)
}

/// DBLP-backed [`CoauthorSource`].
#[derive(Debug, Clone)]
pub struct DblpClient {
    client: Client,
    config: DblpConfig,
    matcher: NameMatcher,
}

impl DblpClient {
    pub fn new(config: DblpConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("isern-network/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            config,
            matcher: NameMatcher::default(),
        })
    }

    pub fn with_matcher(mut self, matcher: NameMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn config(&self) -> &DblpConfig {
        &self.config
    }

    /// GET with JSON decoding; retries 429/5xx with exponential backoff,
    /// honouring `Retry-After` when present.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &str) -> Result<T, SourceError> {
        let hits = self.config.max_hits.to_string();
        let mut attempt = 0;

        loop {
            let response = self
                .client
                .get(url)
                .query(&[("q", query), ("format", "json"), ("h", hits.as_str())])
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                let body = response.text().await?;
                return Ok(serde_json::from_str(&body)?);
            }

            if !is_retryable(status) || attempt >= self.config.max_retries {
                return Err(SourceError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            let backoff = retry_after.unwrap_or_else(|| backoff_delay(attempt));
            warn!("DBLP answered {} for {:?}, retrying in {:?}", status, query, backoff);
            sleep(backoff).await;
            attempt += 1;
        }
    }

    /// Publications returned by one search query.
    pub async fn search(&self, query: &str) -> Result<Vec<Publication>, SourceError> {
        let response: DblpResponse<PublicationInfo> = self.get_json(&self.config.api_url, query).await?;
        Ok(response
            .result
            .hits
            .hit
            .into_iter()
            .filter_map(|hit| hit.info)
            .filter_map(PublicationInfo::into_publication)
            .collect())
    }

    /// DBLP author names and aliases the matcher strictly accepts as `member`.
    pub async fn author_aliases(&self, member: &str) -> Result<Vec<String>, SourceError> {
        let response: DblpResponse<AuthorInfo> = self.get_json(&self.config.author_api_url, member).await?;

        let mut aliases: Vec<String> = Vec::new();
        for info in response.result.hits.hit.into_iter().filter_map(|hit| hit.info) {
            let names = info
                .author
                .into_iter()
                .chain(info.aliases.map(|a| a.alias.into_vec()).unwrap_or_default());
            for name in names {
                let name = name.trim().to_string();
                if name != member
                    && !aliases.contains(&name)
                    && self.matcher.is_likely_same_person(member, &name, true)
                {
                    aliases.push(name);
                }
            }
        }
        Ok(aliases)
    }

    async fn queries_for(&self, member: &str) -> Vec<String> {
        let mut queries = search_queries(member);
        if !self.config.resolve_aliases {
            return queries;
        }

        match self.author_aliases(member).await {
            Ok(aliases) => {
                debug!("Resolved {} DBLP aliases for {}", aliases.len(), member);
                for alias in aliases {
                    let query = format!("author:\"{alias}\"");
                    if !queries.contains(&query) {
                        queries.push(query);
                    }
                }
            }
            Err(e) => warn!("Alias lookup failed for {}: {}", member, e),
        }
        sleep(self.config.request_delay).await;
        queries
    }
}

#[async_trait]
impl CoauthorSource for DblpClient {
    async fn publications(&self, member: &str) -> Result<Vec<Publication>, SourceError> {
        let mut publications = Vec::new();
        let mut last_error = None;
        let mut succeeded = 0;

        for query in self.queries_for(member).await {
            match self.search(&query).await {
                Ok(found) => {
                    debug!("{} hits for {}", found.len(), query);
                    publications.extend(found);
                    succeeded += 1;
                }
                Err(e) => {
                    warn!("DBLP query {} failed: {}", query, e);
                    last_error = Some(e);
                }
            }
            sleep(self.config.request_delay).await;
        }

        match last_error {
            Some(e) if succeeded == 0 => Err(e),
            _ => Ok(dedupe_publications(publications)),
        }
    }
}

//! Environment-driven settings.
//!
//! Binaries call `dotenvy::dotenv().ok()` first, so every variable may also
//! come from a `.env` file. Unset or unparsable values fall back to defaults.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Founding members of ISERN: distance 0 by definition.
pub const DEFAULT_FOUNDERS: &[&str] = &[
    "Victor Basili",
    "Dieter Rombach",
    "Ross Jeffery",
    "Giovanni Cantone",
    "Markku Oivo",
    "Koji Torii",
];

pub const DEFAULT_ROSTER_PATH: &str = "isern_members_enhanced.json";
pub const DEFAULT_GRAPH_PATH: &str = "isern_coauthorship_graph.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DBLP_API_URL: &str = "https://dblp.org/search/publ/api";
pub const DEFAULT_DBLP_AUTHOR_API_URL: &str = "https://dblp.org/search/author/api";

/// DBLP client settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DblpConfig {
    /// Publication search endpoint
    pub api_url: String,
    /// Author search endpoint, used for alias lookup
    pub author_api_url: String,
    /// Hits requested per query
    pub max_hits: usize,
    /// Pause after every query
    pub request_delay: Duration,
    pub timeout: Duration,
    /// Extra attempts on 429 and 5xx answers
    pub max_retries: u32,
    /// Also search under DBLP author aliases of the member
    pub resolve_aliases: bool,
}

impl Default for DblpConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_DBLP_API_URL.to_string(),
            author_api_url: DEFAULT_DBLP_AUTHOR_API_URL.to_string(),
            max_hits: 150,
            request_delay: Duration::from_millis(200),
            timeout: Duration::from_secs(20),
            max_retries: 3,
            resolve_aliases: false,
        }
    }
}

impl DblpConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: lookup("DBLP_API_URL").unwrap_or(defaults.api_url),
            author_api_url: lookup("DBLP_AUTHOR_API_URL").unwrap_or(defaults.author_api_url),
            max_hits: parse_or(&lookup, "DBLP_MAX_HITS", defaults.max_hits),
            request_delay: Duration::from_millis(parse_or(
                &lookup,
                "DBLP_REQUEST_DELAY_MS",
                defaults.request_delay.as_millis() as u64,
            )),
            timeout: Duration::from_secs(parse_or(&lookup, "DBLP_TIMEOUT_SECS", defaults.timeout.as_secs())),
            max_retries: parse_or(&lookup, "DBLP_MAX_RETRIES", defaults.max_retries),
            resolve_aliases: parse_or(&lookup, "DBLP_RESOLVE_ALIASES", defaults.resolve_aliases),
        }
    }
}

/// Settings shared by the server and the tools.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub roster_path: PathBuf,
    pub graph_path: PathBuf,
    pub founders: Vec<String>,
    pub bind_addr: String,
    pub dblp: DblpConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let founders = lookup("ISERN_FOUNDERS")
            .map(|raw| parse_founders(&raw))
            .filter(|founders| !founders.is_empty())
            .unwrap_or_else(default_founders);

        Self {
            roster_path: lookup("ISERN_ROSTER_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ROSTER_PATH)),
            graph_path: lookup("ISERN_GRAPH_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_GRAPH_PATH)),
            founders,
            bind_addr: lookup("ISERN_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            dblp: DblpConfig::from_lookup(lookup),
        }
    }
}

pub fn default_founders() -> Vec<String> {
    DEFAULT_FOUNDERS.iter().map(|name| name.to_string()).collect()
}

/// Comma-separated founder names; blanks are dropped.
pub fn parse_founders(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid value {:?} for {}", raw, key);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.founders.len(), 6);
        assert_eq!(settings.founders[0], "Victor Basili");
        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(settings.dblp.max_hits, 150);
        assert_eq!(settings.dblp.request_delay, Duration::from_millis(200));
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("ISERN_FOUNDERS", " Ada Lovelace, ,Alan Turing "),
            ("ISERN_ROSTER_PATH", "/data/roster.json"),
            ("DBLP_MAX_HITS", "25"),
            ("DBLP_REQUEST_DELAY_MS", "0"),
            ("DBLP_RESOLVE_ALIASES", "true"),
        ]));
        assert_eq!(settings.founders, vec!["Ada Lovelace".to_string(), "Alan Turing".to_string()]);
        assert_eq!(settings.roster_path, PathBuf::from("/data/roster.json"));
        assert_eq!(settings.dblp.max_hits, 25);
        assert_eq!(settings.dblp.request_delay, Duration::ZERO);
        assert!(settings.dblp.resolve_aliases);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let settings = Settings::from_lookup(lookup_from(&[("DBLP_MAX_HITS", "many"), ("ISERN_FOUNDERS", " , ")]));
        assert_eq!(settings.dblp.max_hits, 150);
        assert_eq!(settings.founders, default_founders());
    }
}

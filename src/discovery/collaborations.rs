//! Member-to-member collaboration discovery.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use super::source::CoauthorSource;
use crate::graph::{Edge, EdgeSet};
use crate::matcher::NameMatcher;
use crate::models::{Publication, Roster};

/// A coauthor string resolved to a roster member.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CoauthorMatch {
    /// Coauthor name as it appeared in the publication record
    pub coauthor: String,
    /// Roster member it was matched to
    pub member: String,
    pub score: f64,
}

/// What one member's run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct MemberCollaborations {
    pub publication_count: usize,
    pub coauthor_count: usize,
    pub matches: Vec<CoauthorMatch>,
    pub collaborators: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryResult {
    pub edges: EdgeSet,
    pub members: BTreeMap<String, MemberCollaborations>,
    /// How many member runs found each pair (1 or 2)
    pub pair_counts: BTreeMap<Edge, u32>,
    /// Members whose source failed; they contribute no edges
    pub failed_members: Vec<String>,
}

impl DiscoveryResult {
    /// Pair counts keyed `"A|B"` with the smaller name first.
    pub fn collaboration_counts(&self) -> BTreeMap<String, u32> {
        self.pair_counts
            .iter()
            .map(|(edge, count)| (format!("{}|{}", edge.source, edge.target), *count))
            .collect()
    }
}

/// Distinct trimmed coauthor strings across `publications`, sorted, without
/// empties and without `member` itself.
pub fn distinct_coauthors(member: &str, publications: &[Publication]) -> BTreeSet<String> {
    publications
        .iter()
        .flat_map(|publication| publication.authors.iter())
        .map(|author| author.trim())
        .filter(|author| !author.is_empty() && *author != member)
        .map(str::to_string)
        .collect()
}

/// Resolve each coauthor to its single best roster match, if any.
pub fn match_coauthors<'a, I>(member: &str, coauthors: I, roster: &Roster, matcher: &NameMatcher) -> Vec<CoauthorMatch>
where
    I: IntoIterator<Item = &'a String>,
{
    coauthors
        .into_iter()
        .filter_map(|coauthor| {
            let best = matcher.find_best_matches(coauthor, roster.members(), 1).into_iter().next()?;
            if best.score < matcher.threshold() || best.name == member {
                return None;
            }
            debug!("{} -> {} ({:.3}) for {}", coauthor, best.name, best.score, member);
            Some(CoauthorMatch {
                coauthor: coauthor.clone(),
                member: best.name,
                score: best.score,
            })
        })
        .collect()
}

/// Run discovery over every roster member, in roster order.
///
/// Source failures are logged and treated as zero publications.
pub async fn discover_collaborations<C>(roster: &Roster, source: &C, matcher: &NameMatcher) -> DiscoveryResult
where
    C: CoauthorSource + ?Sized,
{
    let mut result = DiscoveryResult::default();
    let total = roster.len();

    for (i, member) in roster.iter().enumerate() {
        info!("[{}/{}] Searching collaborations for {}", i + 1, total, member);

        let publications = match source.publications(member).await {
            Ok(publications) => publications,
            Err(e) => {
                warn!("Could not fetch publications for {}: {}", member, e);
                result.failed_members.push(member.to_string());
                Vec::new()
            }
        };

        let coauthors = distinct_coauthors(member, &publications);
        let matches = match_coauthors(member, &coauthors, roster, matcher);

        let mut collaborators = BTreeSet::new();
        for found in &matches {
            collaborators.insert(found.member.clone());
        }
        for collaborator in &collaborators {
            if let Some(edge) = Edge::new(member, collaborator.as_str()) {
                *result.pair_counts.entry(edge).or_insert(0) += 1;
                result.edges.insert(member, collaborator);
            }
        }

        info!(
            "{}: {} publications, {} coauthors, {} ISERN collaborators",
            member,
            publications.len(),
            coauthors.len(),
            collaborators.len()
        );

        result.members.insert(
            member.to_string(),
            MemberCollaborations {
                publication_count: publications.len(),
                coauthor_count: coauthors.len(),
                matches,
                collaborators,
            },
        );
    }

    info!(
        "Discovery finished: {} collaborations among {} members ({} failed lookups)",
        result.edges.len(),
        total,
        result.failed_members.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::RecordedSource;

    fn publication(title: &str, authors: &[&str]) -> Publication {
        Publication::new(title, authors.iter().map(|a| a.to_string()).collect())
    }

    #[test]
    fn test_distinct_coauthors() {
        let publications = vec![
            publication("P1", &["Victor Basili", " Dieter Rombach ", ""]),
            publication("P2", &["Dieter Rombach", "Victor Basili", "Forrest Shull"]),
        ];
        let coauthors: Vec<String> = distinct_coauthors("Victor Basili", &publications).into_iter().collect();
        assert_eq!(coauthors, vec!["Dieter Rombach".to_string(), "Forrest Shull".to_string()]);
    }

    #[test]
    fn test_match_coauthors_skips_self_and_strangers() {
        let roster = Roster::new(["Victor Basili", "Dieter Rombach"]);
        let coauthors: BTreeSet<String> = ["H. Dieter Rombach", "V. Basili", "Grace Hopper"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let matches = match_coauthors("Victor Basili", &coauthors, &roster, &NameMatcher::default());
        let members: Vec<&str> = matches.iter().map(|m| m.member.as_str()).collect();
        assert!(!members.contains(&"Victor Basili"));
        assert!(!matches.iter().any(|m| m.coauthor == "Grace Hopper"));
    }

    #[tokio::test]
    async fn test_pair_counts_and_failures() {
        let roster = Roster::new(["Victor Basili", "Dieter Rombach", "Koji Torii"]);
        let source = RecordedSource::new()
            .with("Victor Basili", vec![publication("EF", &["Victor Basili", "Dieter Rombach"])])
            .with("Dieter Rombach", vec![publication("EF", &["Dieter Rombach", "Victor Basili"])]);

        let result = discover_collaborations(&roster, &source, &NameMatcher::default()).await;

        assert_eq!(result.edges.len(), 1);
        assert!(result.edges.contains("Victor Basili", "Dieter Rombach"));
        assert_eq!(result.failed_members, vec!["Koji Torii".to_string()]);
        assert_eq!(result.collaboration_counts().get("Dieter Rombach|Victor Basili"), Some(&2));
        assert_eq!(result.members["Koji Torii"].publication_count, 0);
        assert_eq!(result.members["Victor Basili"].matches[0].coauthor, "Dieter Rombach");
    }
}

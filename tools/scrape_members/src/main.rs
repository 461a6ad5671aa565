use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, warn};

use isern_network::config::DEFAULT_ROSTER_PATH;
use isern_network::graph::export::write_json;
use isern_network::matcher::NameMatcher;
use isern_network::models::{MemberRecord, RosterFile, RosterMetadata};

const MEMBERS_URL: &str = "https://isern.iese.de/isern-members-2/";

#[derive(Parser, Debug)]
#[command(name = "scrape_members")]
#[command(about = "Scrape the ISERN member page into a roster file")]
struct Args {
    /// Member page to fetch
    #[arg(short, long, default_value = MEMBERS_URL)]
    url: String,

    /// Parse a saved copy of the page instead of fetching it
    #[arg(long)]
    local: Option<PathBuf>,

    /// Roster file to write
    #[arg(short, long, default_value = DEFAULT_ROSTER_PATH)]
    output: PathBuf,

    /// Print the members without writing the roster
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct ScrapedMember {
    name: String,
    organization: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let html = match &args.local {
        Some(path) => {
            info!("Reading local file: {}", path.display());
            std::fs::read_to_string(path).with_context(|| format!("Failed to read local file: {}", path.display()))?
        }
        None => fetch_page(&args.url).await?,
    };

    let document = Html::parse_document(&html);
    let scraped = parse_members(&document);
    if scraped.is_empty() {
        anyhow::bail!("No members found on {}", args.url);
    }
    info!("Found {} unique member entries", scraped.len());

    let names: Vec<&str> = scraped.iter().map(|member| member.name.as_str()).collect();
    let isern_members = NameMatcher::default().deduplicate_names(&names);
    if isern_members.len() < names.len() {
        info!("Merged {} likely duplicate spellings", names.len() - isern_members.len());
    }

    let roster = RosterFile {
        metadata: Some(RosterMetadata {
            description: Some("ISERN members scraped from the official member page".to_string()),
            last_updated: Some(Utc::now().to_rfc3339()),
            source: Some(args.url.clone()),
            total_members: Some(isern_members.len()),
        }),
        members: scraped
            .into_iter()
            .map(|member| MemberRecord {
                name: member.name,
                organization: member.organization,
            })
            .collect(),
        isern_members,
    };

    if args.dry_run {
        for member in &roster.members {
            info!("  {} - {}", member.name, member.organization.as_deref().unwrap_or("No organization"));
        }
        info!("Dry run: {} members not written", roster.isern_members.len());
        return Ok(());
    }

    write_json(&args.output, &roster).with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Saved {} members to {}", roster.isern_members.len(), args.output.display());

    Ok(())
}

async fn fetch_page(url: &str) -> Result<String> {
    info!("Scraping ISERN members from: {}", url);
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .user_agent(concat!("isern-network/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to fetch URL")?
        .error_for_status()
        .context("Member page returned an error status")?;

    response.text().await.context("Failed to read response body")
}

const CONTENT_SELECTORS: &[&str] = &[
    "div.entry-content",
    "div.content",
    "main",
    "article",
    "div.post-content",
    "div.page-content",
];

const SKIP_WORDS: &[&str] = &[
    "home", "contact", "about", "menu", "search", "login", "copyright", "privacy", "cookie", "navigation",
    "toggle", "skip to", "main content",
];

const ORGANIZATION_KEYWORDS: &[&str] = &[
    "university", "institute", "college", "school", "research", "emeritus", "corporation", "center", "centre",
    "gmbh", "ltd",
];

/// Member entries from the page, first occurrence of each name kept.
fn parse_members(document: &Html) -> Vec<ScrapedMember> {
    let content = CONTENT_SELECTORS
        .iter()
        .filter_map(|selector| Selector::parse(selector).ok())
        .find_map(|selector| document.select(&selector).next());

    let mut members = Vec::new();
    if let Ok(selector) = Selector::parse("li, p, tr, div.member") {
        let elements: Vec<ElementRef> = match content {
            Some(area) => area.select(&selector).collect(),
            None => document.select(&selector).collect(),
        };
        info!("Checking {} candidate elements", elements.len());

        for element in elements {
            let text = clean_text(&element.text().collect::<Vec<_>>().join(" "));
            if let Some(member) = parse_member_entry(&text, bold_text(element).as_deref()) {
                members.push(member);
            }
        }
    }

    let mut seen = HashSet::new();
    members.retain(|member| seen.insert(member.name.clone()));

    if members.is_empty() {
        warn!("No member entries found");
    }
    members
}

fn bold_text(element: ElementRef) -> Option<String> {
    let selector = Selector::parse("strong, b").ok()?;
    element
        .select(&selector)
        .next()
        .map(|bold| clean_text(&bold.text().collect::<String>()))
}

fn clean_text(text: &str) -> String {
    text.replace('\u{a0}', " ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `Xxx Yyy [Zzz ...]`: two or more capitalized words.
fn is_person_name(text: &str) -> bool {
    let words: Vec<&str> = text.split(' ').collect();
    words.len() >= 2 && words.iter().all(|word| is_capitalized_word(word))
}

fn is_capitalized_word(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            let rest: Vec<char> = chars.collect();
            !rest.is_empty() && rest.iter().all(|c| c.is_lowercase())
        }
        _ => false,
    }
}

/// First run of two or more capitalized words inside `text`; punctuation
/// attached to a word ends the run after it.
fn find_person_name(text: &str) -> Option<String> {
    let mut run: Vec<&str> = Vec::new();
    for token in text.split_whitespace() {
        let word = token.trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '(' | ')' | '.'));
        let capitalized = is_capitalized_word(word);
        if capitalized {
            run.push(word);
        }
        if !capitalized || word.len() != token.len() {
            if run.len() >= 2 {
                return Some(run.join(" "));
            }
            run.clear();
        }
    }
    (run.len() >= 2).then(|| run.join(" "))
}

fn strip_leading_separators(text: &str) -> &str {
    text.trim_start_matches(|c: char| c == ',' || c == '-' || c == '–' || c.is_whitespace())
        .trim_end()
}

fn remainder_as_organization(text: &str, name: &str) -> Option<String> {
    let rest = text.replacen(name, "", 1);
    let rest = strip_leading_separators(&rest);
    (!rest.is_empty()).then(|| rest.to_string())
}

fn parse_member_entry(text: &str, bold: Option<&str>) -> Option<ScrapedMember> {
    if text.chars().count() < 5 || text.len() > 300 {
        return None;
    }
    let lower = text.to_lowercase();
    if text.len() < 50 && SKIP_WORDS.iter().any(|word| lower.contains(word)) {
        return None;
    }

    let contains_name = find_person_name(text).is_some();
    let member = if text.contains(',') && contains_name {
        extract_member_info(text, bold)
    } else if is_person_name(text) {
        Some(ScrapedMember {
            name: text.to_string(),
            organization: None,
        })
    } else if contains_name && ORGANIZATION_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
        extract_member_info(text, bold)
    } else {
        None
    };

    member.filter(|member| member.name.chars().count() > 3)
}

/// Split an entry into name and organization.
///
/// Tried in order: `Organization (Country), Name`; a bold name followed by
/// the organization; a bare name; the first capitalized word run.
fn extract_member_info(text: &str, bold: Option<&str>) -> Option<ScrapedMember> {
    if let Some((organization, name)) = text.split_once(',') {
        let name = name.trim();
        if !name.is_empty() {
            return Some(ScrapedMember {
                name: name.to_string(),
                organization: Some(organization.trim().to_string()).filter(|org| !org.is_empty()),
            });
        }
    }

    if let Some(bold) = bold.filter(|bold| is_person_name(bold)) {
        return Some(ScrapedMember {
            name: bold.to_string(),
            organization: remainder_as_organization(text, bold),
        });
    }

    if is_person_name(text) {
        return Some(ScrapedMember {
            name: text.to_string(),
            organization: None,
        });
    }

    let name = find_person_name(text)?;
    Some(ScrapedMember {
        organization: remainder_as_organization(text, &name),
        name,
    })
}

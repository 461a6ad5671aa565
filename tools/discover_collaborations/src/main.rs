use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use isern_network::config::Settings;
use isern_network::discovery::{
    discover_collaborations, DblpClient, DiscoveryResult, RecordedSource, RecordingSource,
};
use isern_network::graph::export::{write_edge_list, write_graphml, write_json, write_summary};
use isern_network::graph::{label_distances, CollaborationGraph, DistanceLabels};
use isern_network::matcher::NameMatcher;
use isern_network::models::{CollaborationReport, GraphDocument, NumbersDocument, Roster};

#[derive(Parser, Debug)]
#[command(name = "discover_collaborations")]
#[command(about = "Discover collaborations between ISERN members on DBLP and compute ISERN numbers")]
struct Args {
    /// Roster file (defaults to ISERN_ROSTER_PATH or isern_members_enhanced.json)
    #[arg(short, long)]
    roster: Option<PathBuf>,

    /// Founding member; repeat for several (defaults to ISERN_FOUNDERS or the six founders)
    #[arg(short, long = "founder")]
    founders: Vec<String>,

    /// Directory for the output files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// DBLP hits per query
    #[arg(long)]
    max_hits: Option<usize>,

    /// Pause between DBLP requests, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Also search under DBLP author aliases
    #[arg(long)]
    resolve_aliases: bool,

    /// Replay publications saved with --save-cache instead of querying DBLP
    #[arg(long)]
    from_cache: Option<PathBuf>,

    /// Save every DBLP answer to this file
    #[arg(long)]
    save_cache: Option<PathBuf>,

    /// Log the results without writing any file
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut settings = Settings::from_env();
    if let Some(roster) = &args.roster {
        settings.roster_path = roster.clone();
    }
    if !args.founders.is_empty() {
        settings.founders = args.founders.clone();
    }
    if let Some(max_hits) = args.max_hits {
        settings.dblp.max_hits = max_hits;
    }
    if let Some(delay_ms) = args.delay_ms {
        settings.dblp.request_delay = Duration::from_millis(delay_ms);
    }
    settings.dblp.resolve_aliases |= args.resolve_aliases;

    let roster = Roster::load(&settings.roster_path)
        .with_context(|| format!("Failed to load roster {}", settings.roster_path.display()))?;
    info!("Founding members: {}", settings.founders.join(", "));

    let matcher = NameMatcher::default();
    let result = match &args.from_cache {
        Some(path) => {
            let source = RecordedSource::load(path).context("Failed to load publication cache")?;
            info!("Replaying {} cached members from {}", source.len(), path.display());
            discover_collaborations(&roster, &source, &matcher).await
        }
        None => {
            let client = DblpClient::new(settings.dblp.clone())
                .context("Failed to build DBLP client")?
                .with_matcher(matcher);
            run_live(&roster, client, &matcher, args.save_cache.as_deref()).await?
        }
    };

    let graph = CollaborationGraph::new(roster.members(), &result.edges);
    let labels = label_distances(&graph, &settings.founders);
    log_results(&result, &graph, &labels);

    if args.dry_run {
        info!("Dry run: no files written");
        return Ok(());
    }

    write_outputs(&args.output_dir, &roster, &graph, &labels, &settings.founders, &result)?;
    Ok(())
}

async fn run_live(
    roster: &Roster,
    client: DblpClient,
    matcher: &NameMatcher,
    save_cache: Option<&Path>,
) -> Result<DiscoveryResult> {
    let Some(path) = save_cache else {
        return Ok(discover_collaborations(roster, &client, matcher).await);
    };

    let recording = RecordingSource::new(client);
    let result = discover_collaborations(roster, &recording, matcher).await;
    write_json(path, &recording.recorded()).context("Failed to save publication cache")?;
    info!("Saved publication cache to {}", path.display());
    Ok(result)
}

fn log_results(result: &DiscoveryResult, graph: &CollaborationGraph, labels: &DistanceLabels) {
    let stats = graph.statistics();
    info!("Total members: {}", stats.total_members);
    info!("Total collaborations: {}", stats.total_collaborations);
    info!("Network density: {:.3}", stats.network_density);
    info!("Connected members: {}", stats.connected_members);
    info!("Isolated members: {}", stats.isolated_members);
    info!("Connected components: {}", stats.connected_components);

    for (distance, members) in labels.levels() {
        info!("ISERN number {}: {} members", distance, members.len());
    }

    let reconfirmed = result.pair_counts.values().filter(|count| **count > 1).count();
    info!("{} collaborations were found from both sides", reconfirmed);
    if !result.failed_members.is_empty() {
        warn!(
            "No publications retrieved for {} members: {}",
            result.failed_members.len(),
            result.failed_members.join(", ")
        );
    }
}

fn write_outputs(
    dir: &Path,
    roster: &Roster,
    graph: &CollaborationGraph,
    labels: &DistanceLabels,
    founders: &[String],
    result: &DiscoveryResult,
) -> Result<()> {
    let timestamp = Utc::now().to_rfc3339();
    let report = CollaborationReport::new(
        graph,
        Some(labels),
        |name| roster.organization(name).map(str::to_string),
        timestamp.as_str(),
    );

    write_json(dir.join("isern_numbers.json"), &NumbersDocument::new(labels.clone(), founders, timestamp.as_str()))?;
    write_json(dir.join("isern_coauthorship_graph.json"), &GraphDocument::from_graph(graph, timestamp.as_str()))?;
    write_json(dir.join("isern_full_collaboration_network.json"), &report)?;
    write_json(dir.join("isern_collaboration_counts.json"), &result.collaboration_counts())?;
    write_json(dir.join("isern_member_collaborations.json"), &result.members)?;
    write_edge_list(dir.join("isern_collaboration_edges.txt"), &result.edges)?;
    write_graphml(dir.join("isern_collaboration_network.graphml"), graph, Some(labels))?;
    write_summary(dir.join("isern_collaboration_summary.txt"), &report)?;

    info!("Results written to {}", dir.display());
    Ok(())
}

use anyhow::Context;
use dotenvy::dotenv;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};

use isern_network::config::Settings;
use isern_network::graph::EdgeSet;
use isern_network::handlers::{router, AppState};
use isern_network::matcher::NameMatcher;
use isern_network::models::{GraphDocument, Roster};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let settings = Settings::from_env();

    let roster = Roster::load(&settings.roster_path)
        .with_context(|| format!("cannot start without a roster ({})", settings.roster_path.display()))?;

    let edges = match GraphDocument::load(&settings.graph_path) {
        Ok(document) => {
            info!(
                "Loaded {} collaborations from {}",
                document.edges.len(),
                settings.graph_path.display()
            );
            document.edge_set()
        }
        Err(e) => {
            warn!("{}; serving the roster without collaborations", e);
            EdgeSet::new()
        }
    };

    let state = AppState::new(roster, &edges, settings.founders.clone(), NameMatcher::default());
    info!(
        "Network ready: {} members, {} collaborations, {} reachable from {} founders",
        state.graph.node_count(),
        state.graph.edge_count(),
        state.labels.reachable_count(),
        state.founders.len()
    );

    let app = router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;

    info!("Server is running on http://{}", settings.bind_addr);
    info!("Swagger UI available at http://{}/swagger-ui", settings.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down");
}

//! HTTP API server command.

use crate::acquire::TranscriptAcquirer;
use crate::answer::SentenceSearch;
use crate::cli::Output;
use crate::config::Settings;
use crate::server::{router, AppState};
use std::sync::Arc;
use tracing::info;

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    let acquirer = TranscriptAcquirer::new(&settings)?;
    info!("Scratch directory root: {}", acquirer.scratch_root().display());
    let state = Arc::new(AppState::new(acquirer, Arc::new(SentenceSearch)));

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("cuecite API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Transcript", "POST /api/youtube-transcript");
    Output::kv("Annotate", "POST /api/annotate");
    Output::kv("Inspect", "POST /api/citations/inspect");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}

use std::sync::Arc;

use anyhow::Context;

use jetset::config::AppConfig;
use jetset::conversation::spawn_expiry_task;
use jetset::llm::create_provider;
use jetset::server::{AppState, router};
use jetset::store::{MemoryStore, ProfileStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env();

    eprintln!("✈️  JetSet v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}", config.port);
    eprintln!("   Language: {}", config.assistant.language);
    match &config.enrichment {
        Some(enrichment) => eprintln!(
            "   Enrichment: {} (timeout {:?})",
            enrichment.model, config.classifier.enrichment_timeout
        ),
        None => eprintln!("   Enrichment: disabled (set GEMINI_API_KEY to enable)"),
    }

    let llm = config.enrichment.as_ref().map(create_provider);
    let store: Arc<dyn ProfileStore> = MemoryStore::new();

    let port = config.port;
    let state = AppState::new(config, store, llm);

    // Drop idle and finished conversations in the background.
    let _expiry_handle = spawn_expiry_task(Arc::clone(&state.sessions));

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    tracing::info!(port, "JetSet server started");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

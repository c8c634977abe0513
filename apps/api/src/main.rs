mod analysis;
mod config;
mod enhancer;
mod errors;
mod extract;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::lexicon::Lexicon;
use crate::config::{Config, EnhancerMode};
use crate::enhancer::{Enhancer, LlmEnhancer, LocalEnhancer};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    let lexicon = match &config.lexicon_path {
        Some(path) => Lexicon::from_file(path)
            .with_context(|| format!("failed to load lexicon from {}", path.display()))?,
        None => Lexicon::default(),
    };
    info!(
        "Lexicon v{} loaded ({} stopwords, {} action verbs)",
        lexicon.version,
        lexicon.stopwords.len(),
        lexicon.action_verbs.len()
    );

    let enhancer = build_enhancer(&config, &lexicon)?;
    info!("Enhancer backend: {}", enhancer.backend());

    let state = AppState {
        enhancer,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("127.0.0.1:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Local heuristics by default; the hosted model when `ENHANCER_MODE=llm`.
fn build_enhancer(config: &Config, lexicon: &Lexicon) -> Result<Arc<dyn Enhancer>> {
    match config.mode {
        EnhancerMode::Local => {
            let local = LocalEnhancer::new(lexicon, config.enhancer_seed)
                .context("lexicon is not usable")?;
            Ok(Arc::new(local))
        }
        EnhancerMode::Llm => {
            let api_key = config
                .anthropic_api_key
                .clone()
                .context("ANTHROPIC_API_KEY is required in llm mode")?;
            let llm = match &config.anthropic_api_url {
                Some(url) => LlmClient::with_url(api_key, url.clone())?,
                None => LlmClient::new(api_key)?,
            };
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Ok(Arc::new(LlmEnhancer::new(llm)))
        }
    }
}

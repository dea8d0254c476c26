mod compiler;
mod config;
mod documents;
mod errors;
mod generation;
mod github;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compiler::pdflatex::PdflatexCompiler;
use crate::config::Config;
use crate::documents::DocumentStore;
use crate::github::GitHubClient;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_env_filter(&config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting GitHire API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client (explicit credentials, no ambient globals)
    let llm = LlmClient::new(config.gemini_api_key.clone());
    info!(
        "LLM client initialized (models: {} / {})",
        llm_client::RESUME_MODEL,
        llm_client::EMAIL_MODEL
    );

    // Initialize GitHub project fetcher
    let github = GitHubClient::new();

    // Initialize the document compiler backend.
    // Availability is re-resolved per request; this is an advisory check only.
    let compiler = Arc::new(PdflatexCompiler::new(
        config.tex_auto_install,
        Duration::from_secs(config.compile_timeout_secs),
    ));
    match which::which("pdflatex") {
        Ok(path) => info!("pdflatex found at {}", path.display()),
        Err(_) => warn!(
            "pdflatex not found on PATH; compilation will fail until it is installed \
             (TEX_AUTO_INSTALL={})",
            config.tex_auto_install
        ),
    }

    // Build app state
    let state = AppState {
        llm,
        github,
        compiler,
        documents: DocumentStore::new(),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Default `EnvFilter` directive scoped to this crate. The package name uses
/// a hyphen but tracing targets use the module path, which does not, so the
/// name must be normalized or the directive matches nothing.
fn default_env_filter(rust_log: &str) -> String {
    format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), rust_log)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_env_filter_targets_crate_module_path() {
        let directive = default_env_filter("info");
        let target = directive.split('=').next().unwrap();

        assert_eq!(target, module_path!().split("::").next().unwrap());
        assert!(!target.contains('-'));
        assert_eq!(directive, format!("{target}=info"));
    }
}

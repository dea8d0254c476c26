use std::sync::Arc;

use crate::compiler::DocumentCompiler;
use crate::config::Config;
use crate::documents::DocumentStore;
use crate::github::GitHubClient;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub github: GitHubClient,
    /// Pluggable markup-to-PDF backend. Default: PdflatexCompiler.
    pub compiler: Arc<dyn DocumentCompiler>,
    pub documents: DocumentStore,
    /// Held for handlers that need runtime settings; currently advisory only.
    #[allow(dead_code)]
    pub config: Config,
}

/// LLM Client — the single point of entry for all Gemini API calls in GitHire.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All LLM interactions MUST go through this module.
///
/// The API key is passed in at construction (process start to process end),
/// never read from ambient global state.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Model used for resume rendering. Intentionally hardcoded to prevent drift.
pub const RESUME_MODEL: &str = "gemini-2.5-pro";
/// Model used for cold-email composition. Cheaper and fast; the task is short.
pub const EMAIL_MODEL: &str = "gemini-1.5-flash";

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    #[serde(rename = "systemInstruction")]
    system_instruction: ContentParts<'a>,
    contents: Vec<ContentParts<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentParts<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    pub usage: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_tokens: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text of the first candidate's first text part.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.iter().find_map(|p| p.text.as_deref()))
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single LLM client shared by the resume renderer and the email composer.
/// Wraps the Gemini `generateContent` API with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    /// Points the client at a stub server instead of the real API.
    #[cfg(test)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let mut client = Self::new(api_key);
        client.base_url = base_url;
        client
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff;
    /// exhausting the retries on a 429 surfaces as [`LlmError::RateLimited`].
    pub async fn call(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = GeminiRequest {
            system_instruction: ContentParts {
                parts: vec![TextPart { text: system }],
            },
            contents: vec![ContentParts {
                parts: vec![TextPart { text: prompt }],
            }],
        };

        let url = format!("{}/{model}:generateContent", self.base_url);

        let mut last_error = match self.send_once(&url, &request_body).await {
            Ok(response) => return Ok(response),
            Err(e) if !is_retryable(&e) => return Err(e),
            Err(e) => e,
        };

        for attempt in 1..MAX_RETRIES {
            // Exponential backoff: 1s, 2s, 4s
            let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
            warn!(
                "LLM call attempt {} failed, retrying after {}ms...",
                attempt,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;

            match self.send_once(&url, &request_body).await {
                Ok(response) => return Ok(response),
                Err(e) if !is_retryable(&e) => return Err(e),
                Err(e) => last_error = e,
            }
        }

        Err(exhausted(last_error))
    }

    /// One request/response cycle. Retryable conditions (transport errors,
    /// 429, 5xx) come back as errors for [`Self::call`] to classify.
    async fn send_once(
        &self,
        url: &str,
        request_body: &GeminiRequest<'_>,
    ) -> Result<LlmResponse, LlmError> {
        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(request_body)
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() == 429 || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the structured error message
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        if let Some(usage) = &llm_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_tokens, usage.output_tokens
            );
        }

        Ok(llm_response)
    }

    /// Convenience method that calls the LLM and returns the response text
    /// with any markdown code fences stripped. Models routinely wrap LaTeX
    /// output in ```latex fences despite instructions not to.
    pub async fn call_text(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
    ) -> Result<String, LlmError> {
        let response = self.call(model, prompt, system).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        let text = strip_code_fences(text);
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }
}

/// Whether an error is worth another attempt: transport faults, rate
/// limiting, and server-side errors. 4xx responses are final.
fn is_retryable(error: &LlmError) -> bool {
    match error {
        LlmError::Http(_) => true,
        LlmError::Api { status, .. } => *status == 429 || *status >= 500,
        _ => false,
    }
}

/// Maps the last error seen after exhausting retries: a final 429 becomes
/// [`LlmError::RateLimited`], anything else passes through.
fn exhausted(last_error: LlmError) -> LlmError {
    match last_error {
        LlmError::Api { status: 429, .. } => LlmError::RateLimited {
            retries: MAX_RETRIES,
        },
        e => e,
    }
}

/// Strips ```latex ... ```, ```tex ... ``` or ``` ... ``` fences from LLM output.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let stripped = ["```latex", "```tex", "```"]
        .iter()
        .find_map(|fence| text.strip_prefix(fence));
    match stripped {
        Some(inner) => inner
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(inner.trim_start()),
        None => text,
    }
}

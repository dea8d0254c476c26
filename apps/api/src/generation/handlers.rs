//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::compiler::CompileOutcome;
use crate::errors::AppError;
use crate::generation::email::compose_email;
use crate::generation::resume::{render_resume, ApplicantProfile};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub profile: ApplicantProfile,
    pub recruiter_name: Option<String>,
    pub company_name: String,
    pub job_title: String,
    /// Raw job description text, as typed or uploaded by the user.
    #[serde(default)]
    pub jd_text: Option<String>,
    pub github_username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub document_id: Uuid,
    pub latex_source: String,
    pub email_text: String,
}

#[derive(Debug, Deserialize)]
pub struct CompileRequest {
    pub markup: String,
}

#[derive(Debug, Serialize)]
pub struct CompileResponse {
    pub document_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate
///
/// Full pipeline: fetch GitHub projects → render LaTeX resume → compile to
/// PDF → compose cold email. If compilation fails, the email step is skipped
/// and the diagnostics (plus the offending LaTeX) come back as a 422.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    validate_generate(&request)?;

    let projects = match request.github_username.as_deref() {
        Some(username) if !username.trim().is_empty() => state
            .github
            .fetch_projects(username.trim())
            .await
            .map_err(|e| AppError::GitHub(e.to_string()))?,
        _ => Vec::new(),
    };

    let jd_text = request.jd_text.as_deref().unwrap_or_default();
    let latex = render_resume(&state.llm, &request.profile, jd_text, &projects).await?;

    let (pdf_path, workspace) = match state.compiler.compile(&latex).await {
        CompileOutcome::Success {
            pdf_path,
            workspace,
        } => (pdf_path, workspace),
        CompileOutcome::Failure { diagnostics } => {
            return Err(AppError::CompilationFailed {
                diagnostics,
                latex_source: Some(latex),
            });
        }
    };

    // Register the document before the email step so its workspace stays
    // reachable for disposal no matter what fails afterwards.
    let document_id = state.documents.insert(pdf_path, workspace).await;

    // Email is only composed once the resume actually exists.
    let email_text = match compose_email(
        &state.llm,
        request.recruiter_name.as_deref(),
        &request.company_name,
        &request.job_title,
        "resume.pdf",
    )
    .await
    {
        Ok(text) => text,
        Err(e) => {
            // The caller never learns the id on this path, so the kept
            // workspace would be orphaned unless it is disposed of here.
            state.documents.dispose(document_id).await;
            return Err(e);
        }
    };

    Ok(Json(GenerateResponse {
        document_id,
        latex_source: latex,
        email_text,
    }))
}

/// POST /api/v1/compile
///
/// Direct markup-to-PDF endpoint: compiles caller-supplied LaTeX and stores
/// the result for download. 422 with diagnostics on failure.
pub async fn handle_compile(
    State(state): State<AppState>,
    Json(request): Json<CompileRequest>,
) -> Result<Json<CompileResponse>, AppError> {
    if request.markup.trim().is_empty() {
        return Err(AppError::Validation("markup cannot be empty".to_string()));
    }

    match state.compiler.compile(&request.markup).await {
        CompileOutcome::Success {
            pdf_path,
            workspace,
        } => {
            let document_id = state.documents.insert(pdf_path, workspace).await;
            Ok(Json(CompileResponse { document_id }))
        }
        CompileOutcome::Failure { diagnostics } => Err(AppError::CompilationFailed {
            diagnostics,
            latex_source: None,
        }),
    }
}

fn validate_generate(request: &GenerateRequest) -> Result<(), AppError> {
    let required = [
        ("profile.name", &request.profile.name),
        ("profile.contact", &request.profile.contact),
        ("profile.education", &request.profile.education),
        ("company_name", &request.company_name),
        ("job_title", &request.job_title),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} cannot be empty")));
        }
    }
    if request.profile.skills.iter().all(|s| s.trim().is_empty()) {
        return Err(AppError::Validation(
            "profile.skills cannot be empty".to_string(),
        ));
    }
    Ok(())
}

//! Email composer — delegates cold-email writing to the LLM.

use crate::errors::AppError;
use crate::generation::prompts::{EMAIL_PROMPT_TEMPLATE, EMAIL_SYSTEM};
use crate::llm_client::{EMAIL_MODEL, LlmClient};

/// Salutation used when the form left the recruiter blank.
const DEFAULT_RECRUITER: &str = "Hiring Manager";

/// Builds the fully interpolated cold-email prompt.
pub fn build_email_prompt(
    recruiter_name: Option<&str>,
    company: &str,
    job_title: &str,
    resume_filename: &str,
) -> String {
    let recruiter = match recruiter_name {
        Some(name) if !name.trim().is_empty() => name.trim(),
        _ => DEFAULT_RECRUITER,
    };
    EMAIL_PROMPT_TEMPLATE
        .replace("{recruiter_name}", recruiter)
        .replace("{company}", company)
        .replace("{job_title}", job_title)
        .replace("{resume_filename}", resume_filename)
}

/// Composes a plain-text cold email referencing the attached resume.
pub async fn compose_email(
    llm: &LlmClient,
    recruiter_name: Option<&str>,
    company: &str,
    job_title: &str,
    resume_filename: &str,
) -> Result<String, AppError> {
    let prompt = build_email_prompt(recruiter_name, company, job_title, resume_filename);
    llm.call_text(EMAIL_MODEL, &prompt, EMAIL_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_with_recruiter_name() {
        let prompt = build_email_prompt(Some("Sarah Johnson"), "Acme", "Engineer", "resume.pdf");
        assert!(prompt.contains("Sarah Johnson"));
        assert!(prompt.contains("Acme"));
        assert!(prompt.contains("resume.pdf"));
    }

    #[test]
    fn test_prompt_defaults_missing_recruiter() {
        let prompt = build_email_prompt(None, "Acme", "Engineer", "resume.pdf");
        assert!(prompt.contains("Hiring Manager"));

        let prompt = build_email_prompt(Some("   "), "Acme", "Engineer", "resume.pdf");
        assert!(prompt.contains("Hiring Manager"));
    }
}

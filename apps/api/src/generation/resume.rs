//! Resume renderer — delegates LaTeX generation to the LLM.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::prompts::{RESUME_PROMPT_TEMPLATE, RESUME_SYSTEM};
use crate::github::{format_projects, Project};
use crate::llm_client::{LlmClient, RESUME_MODEL};

/// The applicant details collected by the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub name: String,
    pub contact: String,
    pub education: String,
    pub skills: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// Builds the fully interpolated resume prompt.
pub fn build_resume_prompt(
    profile: &ApplicantProfile,
    jd_text: &str,
    projects: &[Project],
) -> String {
    RESUME_PROMPT_TEMPLATE
        .replace("{name}", &profile.name)
        .replace("{contact}", &profile.contact)
        .replace("{education}", &profile.education)
        .replace("{skills}", &profile.skills.join(", "))
        .replace("{achievements}", &profile.achievements.join(", "))
        .replace("{projects}", &format_projects(projects))
        .replace("{jd_text}", jd_text)
}

/// Renders a LaTeX resume for the applicant, tailored to the job description
/// and enriched with the optional GitHub project list.
pub async fn render_resume(
    llm: &LlmClient,
    profile: &ApplicantProfile,
    jd_text: &str,
    projects: &[Project],
) -> Result<String, AppError> {
    let prompt = build_resume_prompt(profile, jd_text, projects);
    llm.call_text(RESUME_MODEL, &prompt, RESUME_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> ApplicantProfile {
        ApplicantProfile {
            name: "Ada Lovelace".to_string(),
            contact: "ada@example.com".to_string(),
            education: "BSc Mathematics".to_string(),
            skills: vec!["Rust".to_string(), "LaTeX".to_string()],
            achievements: vec!["First programmer".to_string()],
        }
    }

    #[test]
    fn test_prompt_interpolates_all_fields() {
        let projects = vec![Project {
            name: "engine".to_string(),
            description: "analytical engine notes".to_string(),
        }];
        let prompt = build_resume_prompt(&sample_profile(), "Looking for a Rust dev", &projects);

        assert!(prompt.contains("Ada Lovelace"));
        assert!(prompt.contains("Rust, LaTeX"));
        assert!(prompt.contains("engine: analytical engine notes"));
        assert!(prompt.contains("Looking for a Rust dev"));
        assert!(!prompt.contains("{name}"));
        assert!(!prompt.contains("{jd_text}"));
    }

    #[test]
    fn test_prompt_with_no_projects_or_jd() {
        let prompt = build_resume_prompt(&sample_profile(), "", &[]);
        assert!(prompt.contains("Projects:\n\n"));
        assert!(!prompt.contains("{projects}"));
    }
}

//! GitHub project fetcher — pulls a user's public repositories to enrich
//! the resume prompt with a project list.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GITHUB_API_BASE: &str = "https://api.github.com";
/// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("githire-api/", env!("CARGO_PKG_VERSION"));
/// Only the first few repositories make it into the prompt.
const MAX_PROJECTS: usize = 5;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned status {status} for user '{username}'")]
    Api { status: u16, username: String },
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    name: String,
    description: Option<String>,
}

/// A public repository summarized for the resume prompt.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub name: String,
    pub description: String,
}

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
}

impl GitHubClient {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Fetches up to [`MAX_PROJECTS`] public repositories for `username`.
    pub async fn fetch_projects(&self, username: &str) -> Result<Vec<Project>, GitHubError> {
        let url = format!("{GITHUB_API_BASE}/users/{username}/repos");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::Api {
                status: status.as_u16(),
                username: username.to_string(),
            });
        }

        let repos: Vec<RepoResponse> = response.json().await?;
        let projects: Vec<Project> = repos
            .into_iter()
            .take(MAX_PROJECTS)
            .map(|r| Project {
                name: r.name,
                description: r.description.unwrap_or_default(),
            })
            .collect();

        debug!("Fetched {} projects for '{username}'", projects.len());
        Ok(projects)
    }
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats projects as "name: description" lines for prompt interpolation.
pub fn format_projects(projects: &[Project]) -> String {
    projects
        .iter()
        .map(|p| format!("{}: {}", p.name, p.description))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_response_parsing_truncates_and_defaults() {
        let raw = r#"[
            {"name": "alpha", "description": "first project", "stargazers_count": 3},
            {"name": "beta", "description": null},
            {"name": "gamma", "description": "third"},
            {"name": "delta", "description": "fourth"},
            {"name": "epsilon", "description": "fifth"},
            {"name": "zeta", "description": "sixth"}
        ]"#;
        let repos: Vec<RepoResponse> = serde_json::from_str(raw).unwrap();
        let projects: Vec<Project> = repos
            .into_iter()
            .take(MAX_PROJECTS)
            .map(|r| Project {
                name: r.name,
                description: r.description.unwrap_or_default(),
            })
            .collect();

        assert_eq!(projects.len(), 5);
        assert_eq!(projects[1].name, "beta");
        assert_eq!(projects[1].description, "");
    }

    #[test]
    fn test_format_projects() {
        let projects = vec![
            Project {
                name: "alpha".to_string(),
                description: "first project".to_string(),
            },
            Project {
                name: "beta".to_string(),
                description: String::new(),
            },
        ];
        assert_eq!(format_projects(&projects), "alpha: first project\nbeta: ");
    }

    #[test]
    fn test_format_projects_empty() {
        assert_eq!(format_projects(&[]), "");
    }
}

use base64::Engine;
use reqwest::Client;
use serde::Deserialize;

use crate::types::{Profile, Repository};

const API_BASE: &str = "https://api.github.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const REPOS_PER_PAGE: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("GitHub request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("GitHub returned status {status} for {path}")]
    Status {
        status: reqwest::StatusCode,
        path: String,
    },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid file content: {0}")]
    InvalidContent(String),
}

impl GithubError {
    /// Transient failures worth retrying at a higher level.
    pub fn is_retryable(&self) -> bool {
        match self {
            GithubError::Request(e) => e.is_timeout() || e.is_connect(),
            GithubError::Status { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

/// Thin client over the GitHub REST API. Unauthenticated access works but
/// is rate limited; a token raises the limit and unlocks private data.
pub struct GithubClient {
    client: Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(token: Option<String>) -> Self {
        let client = Client::builder()
            .user_agent("gitfolio")
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self { client, token }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, GithubError> {
        let url = format!("{API_BASE}{path}");
        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        let response = request.send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GithubError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(GithubError::Status {
                status,
                path: path.to_string(),
            });
        }
        Ok(response.json().await?)
    }

    pub async fn fetch_profile(&self, username: &str) -> Result<Profile, GithubError> {
        tracing::debug!(username, "fetching profile");
        self.get_json(&format!("/users/{username}")).await
    }

    /// Most recently updated repositories, bounded for cost control.
    pub async fn fetch_repos(&self, username: &str) -> Result<Vec<Repository>, GithubError> {
        tracing::debug!(username, "fetching repositories");
        self.get_json(&format!(
            "/users/{username}/repos?sort=updated&per_page={REPOS_PER_PAGE}"
        ))
        .await
    }

    /// File paths in the repository tree. Tries `main` first, then `master`
    /// when the default branch lookup comes back 404.
    pub async fn fetch_repo_tree(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<String>, GithubError> {
        let result: Result<TreeResponse, GithubError> = self
            .get_json(&format!("/repos/{owner}/{repo}/git/trees/main?recursive=1"))
            .await;
        let tree = match result {
            Ok(tree) => tree,
            Err(GithubError::NotFound(_)) => {
                tracing::debug!(owner, repo, "main branch missing, trying master");
                self.get_json(&format!(
                    "/repos/{owner}/{repo}/git/trees/master?recursive=1"
                ))
                .await?
            }
            Err(e) => return Err(e),
        };
        Ok(tree
            .tree
            .into_iter()
            .filter(|entry| entry.kind == "blob")
            .map(|entry| entry.path)
            .collect())
    }

    /// Decoded text content of a file in the repository.
    pub async fn fetch_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<String, GithubError> {
        let response: ContentResponse = self
            .get_json(&format!("/repos/{owner}/{repo}/contents/{path}"))
            .await?;
        if response.encoding != "base64" {
            return Err(GithubError::InvalidContent(format!(
                "unexpected encoding {}",
                response.encoding
            )));
        }
        let raw: String = response.content.chars().filter(|c| *c != '\n').collect();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(raw)
            .map_err(|e| GithubError::InvalidContent(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| GithubError::InvalidContent(e.to_string()))
    }
}

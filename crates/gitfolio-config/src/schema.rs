use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_OUTPUT_DIR: &str = "generated_portfolios";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// GitHub API token. Unauthenticated requests work but are rate-limited.
    #[serde(
        rename = "githubToken",
        alias = "github_token",
        skip_serializing_if = "Option::is_none"
    )]
    pub github_token: Option<String>,

    #[serde(
        rename = "anthropicApiKey",
        alias = "anthropic_api_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub anthropic_api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Directory portfolio artifacts are written to.
    #[serde(
        rename = "outputDir",
        alias = "output_dir",
        skip_serializing_if = "Option::is_none"
    )]
    pub output_dir: Option<PathBuf>,

    #[serde(
        rename = "logLevel",
        alias = "log_level",
        skip_serializing_if = "Option::is_none"
    )]
    pub log_level: Option<String>,
}

impl Config {
    /// Later sources win field-by-field (global file, then project file,
    /// then environment).
    pub fn merge(&mut self, other: Config) {
        if other.github_token.is_some() {
            self.github_token = other.github_token;
        }
        if other.anthropic_api_key.is_some() {
            self.anthropic_api_key = other.anthropic_api_key;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }
}

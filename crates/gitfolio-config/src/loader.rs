use crate::schema::Config;
use anyhow::{Context, Result};
use jsonc_parser::{parse_to_serde_value, ParseOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_NAMES: &[&str] = &["gitfolio.json", "gitfolio.jsonc"];

static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{env:([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

pub struct ConfigLoader {
    config: Config,
    config_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            config_paths: Vec::new(),
        }
    }

    pub fn load_from_str(&mut self, content: &str) -> Result<()> {
        let config = parse_jsonc(content).context("Failed to parse config content")?;
        self.config.merge(config);
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let content = substitute_env_vars(&content);

        let config = parse_jsonc(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        self.config.merge(config);
        self.config_paths.push(path.to_path_buf());
        Ok(())
    }

    pub fn load_global(&mut self) -> Result<()> {
        let base = global_config_path();
        for ext in &["jsonc", "json"] {
            let path = base.with_extension(ext);
            if path.exists() {
                self.load_from_file(&path)?;
                break;
            }
        }
        Ok(())
    }

    pub fn load_project<P: AsRef<Path>>(&mut self, project_dir: P) -> Result<()> {
        for name in PROJECT_CONFIG_NAMES {
            let path = project_dir.as_ref().join(name);
            if path.exists() {
                self.load_from_file(&path)?;
                break;
            }
        }
        Ok(())
    }

    /// Environment variables override anything from config files.
    pub fn load_env(&mut self) {
        let mut overrides = Config::default();
        if let Some(token) = non_empty_env("GITHUB_TOKEN") {
            overrides.github_token = Some(token);
        }
        if let Some(key) = non_empty_env("ANTHROPIC_API_KEY") {
            overrides.anthropic_api_key = Some(key);
        }
        if let Some(model) = non_empty_env("GITFOLIO_MODEL") {
            overrides.model = Some(model);
        }
        if let Some(dir) = non_empty_env("GITFOLIO_OUTPUT_DIR") {
            overrides.output_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = non_empty_env("GITFOLIO_LOG_LEVEL") {
            overrides.log_level = Some(level);
        }
        self.config.merge(overrides);
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Global config, then project config, then environment overrides.
pub fn load_config<P: AsRef<Path>>(project_dir: P) -> Result<Config> {
    let mut loader = ConfigLoader::new();
    loader.load_global()?;
    loader.load_project(project_dir)?;
    loader.load_env();
    Ok(loader.into_config())
}

fn parse_jsonc(content: &str) -> Result<Config> {
    let value = parse_to_serde_value(content, &ParseOptions::default())
        .map_err(|e| anyhow::anyhow!("{}", e))?
        .unwrap_or(serde_json::Value::Null);
    if value.is_null() {
        return Ok(Config::default());
    }
    Ok(serde_json::from_value(value)?)
}

fn substitute_env_vars(content: &str) -> String {
    ENV_VAR_PATTERN
        .replace_all(content, |caps: &regex::Captures<'_>| {
            env::var(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}

fn global_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gitfolio")
        .join("config")
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

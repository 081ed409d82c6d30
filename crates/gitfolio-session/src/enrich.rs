use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use gitfolio_agent::Agent;
use gitfolio_github::{ProfilePayload, Skill};
use gitfolio_util::truncate_text;

/// Per-repository lookups are capped to keep token and API cost bounded.
pub const MAX_ENRICHED_REPOS: usize = 5;

const MAX_DESCRIPTION_CHARS: usize = 150;
const DEFAULT_SKILL_LEVEL: u32 = 80;

static LANGUAGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)language[s]?.*?:.*?(\w+)").unwrap());

static README_PARAGRAPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)# .+?\n\n(.+?)\n\n").unwrap());

/// Best-effort augmentation of a profile payload.
///
/// Each repository is enriched independently and strictly sequentially;
/// a failure for one repository keeps its basic record and never aborts
/// the batch. Language occurrences accumulate across repositories into
/// the derived skills list.
pub struct ProfileEnricher {
    agent: Arc<dyn Agent>,
}

impl ProfileEnricher {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }

    pub async fn enrich(&self, username: &str, payload: &mut ProfilePayload) {
        payload.sort_repos();

        // Insertion-ordered histogram so skill ties keep first-seen order.
        let mut histogram: Vec<(String, u32)> = Vec::new();

        let count = payload.repos.len().min(MAX_ENRICHED_REPOS);
        for idx in 0..count {
            let repo_name = payload.repos[idx].name.clone();
            if repo_name.is_empty() {
                continue;
            }

            let language = self.detect_language(username, &repo_name).await;
            // A pattern hit in the structure output wins; the repository's
            // own recorded language is the fallback.
            let language = language.or_else(|| {
                payload.repos[idx]
                    .language
                    .clone()
                    .filter(|l| !l.trim().is_empty())
            });
            if let Some(lang) = language {
                match histogram.iter_mut().find(|(name, _)| *name == lang) {
                    Some((_, n)) => *n += 1,
                    None => histogram.push((lang, 1)),
                }
            }

            let repo = &mut payload.repos[idx];
            let mut description = repo.description.clone().unwrap_or_default();
            if description.is_empty() {
                description = self
                    .readme_excerpt(username, &repo_name)
                    .await
                    .unwrap_or_default();
            }
            if description.is_empty() {
                let lang = repo.language.as_deref().unwrap_or("code");
                let stars = repo.stars;
                description = format!("A {lang} project with {stars} stars.");
            }
            repo.detailed_description = Some(description);
            repo.languages = histogram.iter().map(|(name, _)| name.clone()).collect();
        }

        payload.skills = derive_skills(&histogram, payload);
    }

    /// Asks the agent for the repository structure and scans the free-text
    /// answer for a language indicator. `none`/`unknown` do not count.
    async fn detect_language(&self, username: &str, repo: &str) -> Option<String> {
        let prompt = format!(
            "Fetch the structure of repository https://github.com/{username}/{repo} using the fetch_repo_structure tool with owner={username}, repo={repo}, then state the primary programming language."
        );
        let answer = match self.agent.run(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(repo, error = %e, "repository structure fetch failed");
                return None;
            }
        };
        let lang = LANGUAGE_PATTERN
            .captures(&answer)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())?;
        if lang.is_empty() || matches!(lang.to_lowercase().as_str(), "none" | "unknown") {
            return None;
        }
        Some(lang)
    }

    /// First paragraph after the first top-level README heading, truncated.
    async fn readme_excerpt(&self, username: &str, repo: &str) -> Option<String> {
        let prompt = format!(
            "Fetch the content of the README.md file from repository https://github.com/{username}/{repo} using the fetch_file_content tool with owner={username}, repo={repo}, path=README.md"
        );
        let answer = match self.agent.run(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::debug!(repo, error = %e, "README fetch failed");
                return None;
            }
        };
        let paragraph = README_PARAGRAPH
            .captures(&answer)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())?;
        if paragraph.is_empty() {
            return None;
        }
        Some(truncate_text(&paragraph, MAX_DESCRIPTION_CHARS))
    }
}

fn derive_skills(histogram: &[(String, u32)], payload: &ProfilePayload) -> Vec<Skill> {
    if !histogram.is_empty() {
        let mut sorted = histogram.to_vec();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        return sorted
            .into_iter()
            .map(|(name, count)| Skill {
                name,
                level: (count * 20).min(100),
            })
            .collect();
    }

    if payload.repos.is_empty() {
        return Vec::new();
    }

    // No language signal from enrichment; fall back to the distinct
    // recorded languages at a fixed default level.
    let mut seen = Vec::new();
    for repo in &payload.repos {
        if let Some(lang) = repo.language.as_deref() {
            let lang = lang.trim();
            if !lang.is_empty() && !seen.iter().any(|s| s == lang) {
                seen.push(lang.to_string());
            }
        }
    }
    seen.into_iter()
        .map(|name| Skill {
            name,
            level: DEFAULT_SKILL_LEVEL,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gitfolio_agent::AgentError;
    use gitfolio_github::{Profile, Repository};
    use std::collections::VecDeque;
    use tokio::sync::Mutex;

    struct ScriptedAgent {
        responses: Mutex<VecDeque<Result<String, String>>>,
    }

    impl ScriptedAgent {
        fn new(responses: Vec<Result<&str, &str>>) -> Self {
            Self {
                responses: Mutex::new(
                    responses
                        .into_iter()
                        .map(|r| r.map(str::to_string).map_err(str::to_string))
                        .collect(),
                ),
            }
        }
    }

    #[async_trait]
    impl Agent for ScriptedAgent {
        async fn run(&self, _prompt: &str) -> Result<String, AgentError> {
            let next = self.responses.lock().await.pop_front();
            let msg = match next {
                Some(Ok(text)) => return Ok(text),
                Some(Err(msg)) => msg,
                None => "script exhausted".to_string(),
            };
            Err(AgentError::Provider(
                gitfolio_provider::ProviderError::ApiError(msg),
            ))
        }
    }

    fn repo(name: &str, language: Option<&str>, stars: u64) -> Repository {
        Repository {
            name: name.to_string(),
            description: None,
            language: language.map(str::to_string),
            stars,
            forks: 0,
            html_url: String::new(),
            detailed_description: None,
            languages: Vec::new(),
        }
    }

    fn payload(repos: Vec<Repository>) -> ProfilePayload {
        ProfilePayload {
            profile: Profile::fallback("ada"),
            repos,
            skills: Vec::new(),
        }
    }

    #[tokio::test]
    async fn pattern_match_beats_recorded_language() {
        // Structure answer names Python even though the repo says Rust.
        let agent = Arc::new(ScriptedAgent::new(vec![
            Ok("The primary language: Python"),
            Ok("no readme paragraph here"),
        ]));
        let enricher = ProfileEnricher::new(agent);
        let mut p = payload(vec![repo("x", Some("Rust"), 1)]);
        enricher.enrich("ada", &mut p).await;
        assert_eq!(p.skills.len(), 1);
        assert_eq!(p.skills[0].name, "Python");
    }

    #[tokio::test]
    async fn recorded_language_used_when_pattern_misses() {
        let agent = Arc::new(ScriptedAgent::new(vec![
            Ok("a file listing with nothing useful"),
            Ok("still nothing"),
        ]));
        let enricher = ProfileEnricher::new(agent);
        let mut p = payload(vec![repo("x", Some("Rust"), 10)]);
        enricher.enrich("ada", &mut p).await;
        assert_eq!(p.skills, vec![Skill { name: "Rust".to_string(), level: 20 }]);
        assert_eq!(
            p.repos[0].detailed_description.as_deref(),
            Some("A Rust project with 10 stars.")
        );
    }

    #[tokio::test]
    async fn readme_paragraph_becomes_description() {
        let agent = Arc::new(ScriptedAgent::new(vec![
            Ok("Language: Rust"),
            Ok("# My Project\n\nA blazing fast widget frobnicator.\n\nMore text.\n\n"),
        ]));
        let enricher = ProfileEnricher::new(agent);
        let mut p = payload(vec![repo("x", None, 0)]);
        enricher.enrich("ada", &mut p).await;
        assert_eq!(
            p.repos[0].detailed_description.as_deref(),
            Some("A blazing fast widget frobnicator.")
        );
    }

    #[tokio::test]
    async fn per_repo_failures_keep_basic_records() {
        let agent = Arc::new(ScriptedAgent::new(vec![
            Err("network down"),
            Err("network down"),
            Err("network down"),
            Err("network down"),
        ]));
        let enricher = ProfileEnricher::new(agent);
        let mut p = payload(vec![
            repo("a", Some("Go"), 5),
            repo("b", Some("Go"), 3),
        ]);
        enricher.enrich("ada", &mut p).await;
        assert_eq!(p.repos.len(), 2);
        // Recorded languages still feed the histogram.
        assert_eq!(p.skills, vec![Skill { name: "Go".to_string(), level: 40 }]);
    }

    #[tokio::test]
    async fn empty_histogram_with_repos_yields_default_levels() {
        let h: Vec<(String, u32)> = Vec::new();
        let p = payload(vec![
            repo("a", Some("Rust"), 1),
            repo("b", Some("Rust"), 1),
            repo("c", Some("Go"), 1),
            repo("d", None, 1),
        ]);
        let skills = derive_skills(&h, &p);
        assert_eq!(
            skills,
            vec![
                Skill { name: "Rust".to_string(), level: 80 },
                Skill { name: "Go".to_string(), level: 80 },
            ]
        );
    }

    #[tokio::test]
    async fn enrichment_is_capped() {
        // Ten repos, but only the first five trigger agent calls (two each).
        let responses = (0..10)
            .map(|_| Ok("Language: Rust"))
            .collect::<Vec<_>>();
        let agent = Arc::new(ScriptedAgent::new(responses));
        let enricher = ProfileEnricher::new(agent);
        let repos = (0..10).map(|i| repo(&format!("r{i}"), None, 10 - i)).collect();
        let mut p = payload(repos);
        enricher.enrich("ada", &mut p).await;
        let enriched = p
            .repos
            .iter()
            .filter(|r| r.detailed_description.is_some())
            .count();
        assert_eq!(enriched, MAX_ENRICHED_REPOS);
    }
}

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use gitfolio_agent::{Agent, AgentError};
use gitfolio_github::{Profile, ProfilePayload, Repository};
use gitfolio_render::{render_with_year, PortfolioView};
use gitfolio_session::{PortfolioSession, StatusCallback};

struct ScriptedAgent {
    responses: Mutex<VecDeque<Result<String, String>>>,
}

impl ScriptedAgent {
    fn new(responses: Vec<Result<String, String>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
        })
    }
}

#[async_trait]
impl Agent for ScriptedAgent {
    async fn run(&self, _prompt: &str) -> Result<String, AgentError> {
        let next = self
            .responses
            .lock()
            .expect("script lock")
            .pop_front();
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

fn status_recorder() -> (StatusCallback, Arc<Mutex<Vec<String>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    let callback: StatusCallback = Arc::new(move |status: &str| {
        sink.lock().expect("status lock").push(status.to_string());
    });
    (callback, log)
}

fn ada_payload() -> ProfilePayload {
    ProfilePayload {
        profile: Profile::fallback("ada"),
        repos: vec![Repository {
            name: "x".to_string(),
            description: None,
            language: Some("Rust".to_string()),
            stars: 10,
            forks: 0,
            html_url: String::new(),
            detailed_description: None,
            languages: Vec::new(),
        }],
        skills: Vec::new(),
    }
}

#[tokio::test]
async fn portfolio_turn_end_to_end() {
    let profile_json = r#"```json
{"profile": {"login": "ada", "name": "ada", "bio": ""}, "repos": [{"name": "x", "language": "Rust", "stars": 10, "html_url": ""}]}
```"#;
    // The generation step answers with a page rendered from the same data.
    let generated = render_with_year(&PortfolioView::build(&ada_payload()), 2026);

    let agent = ScriptedAgent::new(vec![
        Ok(profile_json.to_string()),
        Ok("a plain file listing".to_string()),
        Ok("no readme here".to_string()),
        Ok(format!("```html\n{generated}\n```")),
    ]);

    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = PortfolioSession::new(agent, dir.path());
    let (on_status, statuses) = status_recorder();

    let turn = session
        .handle_message("Build a portfolio for https://github.com/ada", on_status)
        .await;

    assert!(turn.is_terminal());
    let html = turn.artifact_html.as_deref().expect("artifact");
    assert!(html.contains(r#"<h3 class="repo-name">x</h3>"#));
    assert!(html.contains("fa-star\"></i> 10"));
    assert!(html.contains("width: 20%"));
    assert!(html.contains("Rust"));

    let path = turn.artifact_path.as_deref().expect("saved path");
    assert_eq!(path, dir.path().join("ada_portfolio.html"));
    let saved = std::fs::read_to_string(path).expect("read saved");
    assert_eq!(saved, html);

    let seen = statuses.lock().expect("status lock").clone();
    assert!(seen.iter().any(|s| s.contains("Fetching GitHub profile data for ada")));
    assert!(seen.iter().any(|s| s.contains("Fetching repository details for ada")));
    assert!(seen.iter().any(|s| s.contains("Generating enhanced portfolio website for ada")));
    assert!(seen.iter().any(|s| s.contains("Validating and fixing HTML structure")));
}

#[tokio::test]
async fn exhausted_retries_fall_back_to_static_template() {
    let failures = (0..6)
        .map(|_| Err("model unavailable".to_string()))
        .collect();
    let agent = ScriptedAgent::new(failures);

    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = PortfolioSession::new(agent, dir.path());
    let (on_status, statuses) = status_recorder();

    let turn = session
        .handle_message("portfolio for github.com/ada", on_status)
        .await;

    assert!(turn.is_terminal());
    let html = turn.artifact_html.as_deref().expect("fallback artifact");
    assert!(html.contains("View on GitHub"));
    // The post-pass still guarantees a script and icon-font reference.
    assert!(html.to_lowercase().contains("<script"));
    assert!(html.to_lowercase().contains("font-awesome"));

    let seen = statuses.lock().expect("status lock").clone();
    assert!(seen.iter().any(|s| s.contains("Retrying profile fetch (1/3)")));
    assert!(seen.iter().any(|s| s.contains("Retrying profile fetch (2/3)")));
    assert!(seen
        .iter()
        .any(|s| s.contains("Error fetching profile after 3 attempts")));
    assert!(seen
        .iter()
        .any(|s| s.contains("Error generating website after 3 attempts")));
}

#[tokio::test]
async fn non_html_generation_answer_is_retried() {
    let profile_json = r#"```json
{"profile": {"login": "ada"}, "repos": []}
```"#;
    let agent = ScriptedAgent::new(vec![
        Ok(profile_json.to_string()),
        // No repos, so enrichment makes no calls; next is generation.
        Ok("I am sorry, I cannot produce that.".to_string()),
        Ok("<!DOCTYPE html>\n<html><head><title>t</title></head><body>ok</body></html>".to_string()),
    ]);

    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = PortfolioSession::new(agent, dir.path());
    let (on_status, statuses) = status_recorder();

    let turn = session
        .handle_message("portfolio please: github.com/ada", on_status)
        .await;

    assert!(turn.artifact_html.is_some());
    let seen = statuses.lock().expect("status lock").clone();
    assert!(seen
        .iter()
        .any(|s| s.contains("Retrying website generation (1/3)")));
}

#[tokio::test]
async fn general_query_bypasses_the_pipeline() {
    let agent = ScriptedAgent::new(vec![Ok("Rust is a systems language.".to_string())]);
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = PortfolioSession::new(agent, dir.path());
    let (on_status, _) = status_recorder();

    let turn = session
        .handle_message("what is Rust?", on_status)
        .await;

    assert!(turn.is_terminal());
    assert_eq!(turn.status_text, "Rust is a systems language.");
    assert!(turn.artifact_html.is_none());
    assert!(session.current_artifact().is_none());
}

#[tokio::test]
async fn agent_failure_on_general_query_terminates_cleanly() {
    let agent = ScriptedAgent::new(vec![Err("boom".to_string())]);
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = PortfolioSession::new(agent, dir.path());
    let (on_status, _) = status_recorder();

    let turn = session.handle_message("hello", on_status).await;

    assert!(turn.is_terminal());
    assert!(turn.status_text.starts_with("Error:"));
}

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gitfolio_agent::Agent;
use gitfolio_extract::{extract_html, extract_json};
use gitfolio_github::ProfilePayload;
use gitfolio_render::fallback_page;
use gitfolio_repair::{ensure_description_meta, ensure_icon_font_link, ensure_theme_script, repair};

use crate::enrich::ProfileEnricher;
use crate::intent::detect_portfolio_intent;
use crate::retry::RetryController;
use crate::turn::ConversationTurn;

/// Receives every status update as the pipeline advances, before the
/// blocking work behind it starts.
pub type StatusCallback = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Debug, thiserror::Error)]
enum StageError {
    #[error("{0}")]
    Agent(String),
    #[error("no usable payload in response: {0}")]
    Extraction(String),
}

/// One chat surface session. Owns the conversation turns and the single
/// current portfolio artifact, which each successful generation overwrites.
pub struct PortfolioSession {
    agent: Arc<dyn Agent>,
    enricher: ProfileEnricher,
    retry: RetryController,
    output_dir: PathBuf,
    generated_html: Option<String>,
    portfolio_path: Option<PathBuf>,
    current_username: Option<String>,
}

impl PortfolioSession {
    pub fn new(agent: Arc<dyn Agent>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            enricher: ProfileEnricher::new(agent.clone()),
            agent,
            retry: RetryController::default(),
            output_dir: output_dir.into(),
            generated_html: None,
            portfolio_path: None,
            current_username: None,
        }
    }

    pub fn current_artifact(&self) -> Option<(&str, Option<&Path>)> {
        self.generated_html
            .as_deref()
            .map(|html| (html, self.portfolio_path.as_deref()))
    }

    /// Runs one conversation turn to completion. Errors never escape;
    /// they terminate the turn with an error message instead.
    pub async fn handle_message(
        &mut self,
        message: &str,
        on_status: StatusCallback,
    ) -> ConversationTurn {
        let mut turn = ConversationTurn::new(message);
        self.update(&mut turn, &on_status, "Thinking...");

        match detect_portfolio_intent(message) {
            Some(username) => {
                self.current_username = Some(username.clone());
                self.generate_portfolio(&username, &mut turn, &on_status)
                    .await;
            }
            None => match self.agent.run(message).await {
                Ok(answer) => turn.finish(answer),
                Err(e) => turn.finish(format!("Error: {e}")),
            },
        }

        if !turn.is_terminal() {
            turn.finish("Error: the request could not be completed.");
        }
        turn
    }

    fn update(&self, turn: &mut ConversationTurn, on_status: &StatusCallback, status: &str) {
        turn.set_status(status);
        on_status(status);
    }

    async fn generate_portfolio(
        &mut self,
        username: &str,
        turn: &mut ConversationTurn,
        on_status: &StatusCallback,
    ) {
        self.update(
            turn,
            on_status,
            &format!("Generating portfolio website for GitHub user: {username}..."),
        );

        self.update(
            turn,
            on_status,
            &format!("Fetching GitHub profile data for {username}..."),
        );
        let mut payload = self.fetch_profile(username, turn, on_status).await;

        self.update(
            turn,
            on_status,
            &format!("Fetching repository details for {username}..."),
        );
        self.enricher.enrich(username, &mut payload).await;

        self.update(
            turn,
            on_status,
            &format!("Generating enhanced portfolio website for {username}..."),
        );
        let html = self.generate_website(username, &payload, turn, on_status).await;

        self.update(turn, on_status, "Validating and fixing HTML structure...");
        let outcome = repair(&html);
        tracing::info!(fixes = ?outcome.fixes, "HTML repair complete");

        let mut html = outcome.html;
        html = ensure_theme_script(&html);
        html = ensure_icon_font_link(&html);
        html = ensure_description_meta(&html, username);

        let path = match self.save_portfolio(username, &html) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::error!(error = %e, "failed to save portfolio");
                None
            }
        };

        self.generated_html = Some(html.clone());
        self.portfolio_path = path.clone();

        turn.finish_with_artifact(
            format!(
                "Enhanced portfolio website for {username} has been generated! You can view it below and download the HTML file."
            ),
            html,
            path,
        );
    }

    /// Profile fetch + extraction under the bounded retry policy. After
    /// exhaustion a minimal constructed profile stands in.
    async fn fetch_profile(
        &self,
        username: &str,
        turn: &mut ConversationTurn,
        on_status: &StatusCallback,
    ) -> ProfilePayload {
        let prompt = format!(
            "Fetch the GitHub profile for user {username} using the fetch_github_profile tool and return the complete JSON data."
        );
        let max = self.retry.max_attempts();

        // Status updates fire through the callback as they happen; the
        // turn log catches up once the mutable borrow is free again.
        let pending = std::sync::Mutex::new(Vec::new());
        let push = |status: String| {
            on_status(&status);
            if let Ok(mut queue) = pending.lock() {
                queue.push(status);
            }
        };

        let payload = self
            .retry
            .execute(
                || async {
                    let answer = self
                        .agent
                        .run(&prompt)
                        .await
                        .map_err(|e| StageError::Agent(e.to_string()))?;
                    let value = extract_json(&answer)
                        .map_err(|e| StageError::Extraction(e.to_string()))?;
                    serde_json::from_value::<ProfilePayload>(value)
                        .map_err(|e| StageError::Extraction(e.to_string()))
                },
                |attempt, _e| {
                    if attempt < max {
                        push(format!("Retrying profile fetch ({attempt}/{max})..."));
                    }
                },
                |e| {
                    push(format!(
                        "Error fetching profile after {max} attempts: {e}. Creating a basic profile instead."
                    ));
                },
                ProfilePayload::fallback(username),
            )
            .await;

        for status in pending.into_inner().unwrap_or_default() {
            turn.set_status(status);
        }
        payload
    }

    /// Website generation + extraction under the bounded retry policy.
    /// After exhaustion a simplified static template stands in.
    async fn generate_website(
        &self,
        username: &str,
        payload: &ProfilePayload,
        turn: &mut ConversationTurn,
        on_status: &StatusCallback,
    ) -> String {
        let data = serde_json::to_string_pretty(payload).unwrap_or_else(|_| "{}".to_string());
        let prompt = format!(
            "Generate a professional, modern portfolio website for GitHub user {username}.\n\n\
Use the generate_portfolio_website tool with this profile data:\n```json\n{data}\n```\n\n\
The portfolio should include:\n\
1. A modern, responsive design with animations and transitions\n\
2. A hero section with the user's profile picture and bio\n\
3. A skills section based on the extracted programming languages with skill bars\n\
4. A projects section showcasing the top repositories with descriptions, stars, and links\n\
5. A contact section with GitHub profile link\n\
6. A dark/light mode toggle\n\
7. Interactive elements like hover effects on projects\n\
8. Custom CSS with a cohesive color scheme\n\
9. Font Awesome icons for social links and UI elements\n\n\
Return ONLY the complete HTML code without any explanations."
        );
        let max = self.retry.max_attempts();
        let fallback = fallback_page(
            username,
            payload.profile.bio.as_deref().unwrap_or("GitHub User"),
        );

        let pending = std::sync::Mutex::new(Vec::new());
        let push = |status: String| {
            on_status(&status);
            if let Ok(mut queue) = pending.lock() {
                queue.push(status);
            }
        };

        let html = self
            .retry
            .execute(
                || async {
                    let answer = self
                        .agent
                        .run(&prompt)
                        .await
                        .map_err(|e| StageError::Agent(e.to_string()))?;
                    extract_html(&answer).map_err(|e| StageError::Extraction(e.to_string()))
                },
                |attempt, _e| {
                    if attempt < max {
                        push(format!("Retrying website generation ({attempt}/{max})..."));
                    }
                },
                |e| {
                    push(format!(
                        "Error generating website after {max} attempts: {e}. Using a simplified template."
                    ));
                },
                fallback,
            )
            .await;

        for status in pending.into_inner().unwrap_or_default() {
            turn.set_status(status);
        }
        html
    }

    /// Writes the artifact to `<output_dir>/<username>_portfolio.html`,
    /// overwriting any previous generation for the same username.
    fn save_portfolio(&self, username: &str, html: &str) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{username}_portfolio.html"));
        std::fs::write(&path, html)?;
        Ok(path)
    }
}

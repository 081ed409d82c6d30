use std::path::PathBuf;

/// State of one conversation turn.
///
/// The session owns the turn and mutates its status as the pipeline
/// advances. Once a terminal state is reached the turn freezes and later
/// status updates are ignored.
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    pub user_text: String,
    pub status_text: String,
    /// Every status the turn went through, in order.
    pub status_log: Vec<String>,
    pub artifact_html: Option<String>,
    pub artifact_path: Option<PathBuf>,
    terminal: bool,
}

impl ConversationTurn {
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            status_text: String::new(),
            status_log: Vec::new(),
            artifact_html: None,
            artifact_path: None,
            terminal: false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        if self.terminal {
            return;
        }
        let status = status.into();
        self.status_log.push(status.clone());
        self.status_text = status;
    }

    /// Freezes the turn with a final message.
    pub fn finish(&mut self, status: impl Into<String>) {
        self.set_status(status);
        self.terminal = true;
    }

    pub fn finish_with_artifact(
        &mut self,
        status: impl Into<String>,
        html: String,
        path: Option<PathBuf>,
    ) {
        if self.terminal {
            return;
        }
        self.artifact_html = Some(html);
        self.artifact_path = path;
        self.finish(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_updates_accumulate_until_terminal() {
        let mut turn = ConversationTurn::new("hi");
        turn.set_status("Thinking...");
        turn.set_status("Fetching...");
        turn.finish("done");
        turn.set_status("ignored");
        assert_eq!(turn.status_text, "done");
        assert_eq!(turn.status_log, vec!["Thinking...", "Fetching...", "done"]);
        assert!(turn.is_terminal());
    }

    #[test]
    fn artifact_freezes_the_turn() {
        let mut turn = ConversationTurn::new("hi");
        turn.finish_with_artifact("done", "<html></html>".to_string(), None);
        assert!(turn.is_terminal());
        assert!(turn.artifact_html.is_some());
        turn.finish_with_artifact("again", "<p></p>".to_string(), None);
        assert_eq!(turn.artifact_html.as_deref(), Some("<html></html>"));
    }
}

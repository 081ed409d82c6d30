use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"github\.com/([a-zA-Z0-9-]+)").unwrap());

/// A message is a portfolio request iff it mentions the trigger keyword and
/// carries a GitHub profile URL. Returns the username from the URL.
/// GitHub usernames are case-insensitive, so the lowered form is returned.
pub fn detect_portfolio_intent(message: &str) -> Option<String> {
    let lowered = message.to_lowercase();
    if !lowered.contains("portfolio") || !lowered.contains("github.com/") {
        return None;
    }
    USERNAME_PATTERN
        .captures(&lowered)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_and_url_together_trigger() {
        assert_eq!(
            detect_portfolio_intent("Make me a portfolio from https://github.com/ada please"),
            Some("ada".to_string())
        );
    }

    #[test]
    fn keyword_alone_is_a_general_query() {
        assert_eq!(detect_portfolio_intent("what is a portfolio?"), None);
    }

    #[test]
    fn url_alone_is_a_general_query() {
        assert_eq!(
            detect_portfolio_intent("what does https://github.com/ada work on?"),
            None
        );
    }

    #[test]
    fn username_is_first_path_segment() {
        assert_eq!(
            detect_portfolio_intent("portfolio for github.com/ada/some-repo"),
            Some("ada".to_string())
        );
    }

    #[test]
    fn mixed_case_is_normalized() {
        assert_eq!(
            detect_portfolio_intent("Portfolio for GitHub.com/Ada-Lovelace"),
            Some("ada-lovelace".to_string())
        );
    }
}

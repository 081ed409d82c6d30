use serde::{Deserialize, Serialize};

/// A GitHub user profile as returned by `/users/{username}`.
///
/// Absent fields get defaults at deserialization time so downstream
/// rendering never has to handle missing keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub twitter_username: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub html_url: String,
}

impl Profile {
    /// Display name, falling back to the login when the user set none.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.login,
        }
    }

    /// Minimal stand-in profile used when every fetch attempt failed.
    pub fn fallback(username: &str) -> Self {
        Self {
            name: Some(username.to_string()),
            login: username.to_string(),
            bio: Some("GitHub User".to_string()),
            avatar_url: format!("https://github.com/{username}.png"),
            location: None,
            blog: None,
            twitter_username: None,
            followers: 0,
            following: 0,
            public_repos: 0,
            html_url: format!("https://github.com/{username}"),
        }
    }
}

/// A repository record, optionally enriched after the fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, alias = "stargazers_count")]
    pub stars: u64,
    #[serde(default, alias = "forks_count")]
    pub forks: u64,
    #[serde(default)]
    pub html_url: String,
    /// Filled in by enrichment from a README excerpt or synthesized text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    /// Languages observed for this repository during enrichment.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
}

/// A derived skill entry shown as a progress bar on the portfolio page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// 0 to 100.
    pub level: u32,
}

/// The full dataset the renderer consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePayload {
    pub profile: Profile,
    #[serde(default)]
    pub repos: Vec<Repository>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl ProfilePayload {
    pub fn fallback(username: &str) -> Self {
        Self {
            profile: Profile::fallback(username),
            repos: Vec::new(),
            skills: Vec::new(),
        }
    }

    /// Orders repositories by descending star count. Ties keep fetch order.
    pub fn sort_repos(&mut self) {
        self.repos.sort_by(|a, b| b.stars.cmp(&a.stars));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_login() {
        let mut profile = Profile::fallback("octocat");
        profile.name = None;
        assert_eq!(profile.display_name(), "octocat");
        profile.name = Some("  ".to_string());
        assert_eq!(profile.display_name(), "octocat");
        profile.name = Some("The Octocat".to_string());
        assert_eq!(profile.display_name(), "The Octocat");
    }

    #[test]
    fn repo_sort_is_stable_on_ties() {
        let mut payload = ProfilePayload::fallback("octocat");
        for (name, stars) in [("a", 1), ("b", 5), ("c", 5), ("d", 2)] {
            payload.repos.push(Repository {
                name: name.to_string(),
                description: None,
                language: None,
                stars,
                forks: 0,
                html_url: String::new(),
                detailed_description: None,
                languages: Vec::new(),
            });
        }
        payload.sort_repos();
        let names: Vec<&str> = payload.repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "d", "a"]);
    }

    #[test]
    fn repository_deserializes_github_field_names() {
        let repo: Repository = serde_json::from_str(
            r#"{"name":"x","stargazers_count":10,"forks_count":3,"language":"Rust","html_url":"https://github.com/ada/x"}"#,
        )
        .unwrap();
        assert_eq!(repo.stars, 10);
        assert_eq!(repo.forks, 3);
        assert_eq!(repo.language.as_deref(), Some("Rust"));
    }
}

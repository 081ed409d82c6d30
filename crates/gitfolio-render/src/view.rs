use gitfolio_github::{ProfilePayload, Repository, Skill};

/// Cards shown on the page are capped regardless of how many repositories
/// the payload carries.
pub const MAX_REPO_CARDS: usize = 6;

const DEFAULT_LANGUAGE_COLOR: &str = "#888";

/// GitHub's display colors for common languages.
pub fn language_color(language: &str) -> &'static str {
    match language {
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#2b7489",
        "Python" => "#3572A5",
        "Java" => "#b07219",
        "C#" => "#178600",
        "PHP" => "#4F5D95",
        "C++" => "#f34b7d",
        "Ruby" => "#701516",
        "Go" => "#00ADD8",
        "Swift" => "#ffac45",
        "Kotlin" => "#F18E33",
        "Rust" => "#dea584",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "Shell" => "#89e051",
        _ => DEFAULT_LANGUAGE_COLOR,
    }
}

#[derive(Debug, Clone)]
pub struct RepoCard {
    pub name: String,
    pub description: String,
    /// Extra README-derived text, shown only when it differs from the
    /// primary description.
    pub detail: Option<String>,
    pub language: Option<String>,
    pub language_color: &'static str,
    pub stars: u64,
    pub forks: u64,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct SkillView {
    pub name: String,
    /// 0 to 100, drives the progress bar width.
    pub level: u32,
    pub color: &'static str,
}

/// Everything the template needs, already escaped-free plain data.
#[derive(Debug, Clone)]
pub struct PortfolioView {
    pub name: String,
    pub bio: String,
    pub avatar_url: String,
    pub location: Option<String>,
    pub blog: Option<String>,
    pub twitter: Option<String>,
    pub github_url: String,
    pub repos: Vec<RepoCard>,
    pub skills: Vec<SkillView>,
}

impl PortfolioView {
    /// Shapes a payload into the view the template consumes.
    ///
    /// Repositories are re-sorted by descending stars (stable, ties keep
    /// fetch order) and bounded to [`MAX_REPO_CARDS`]. When the payload
    /// carries no skills they are derived from a language count over the
    /// repository list.
    pub fn build(payload: &ProfilePayload) -> Self {
        let profile = &payload.profile;

        let mut repos: Vec<&Repository> = payload.repos.iter().collect();
        repos.sort_by(|a, b| b.stars.cmp(&a.stars));

        let cards = repos
            .iter()
            .take(MAX_REPO_CARDS)
            .map(|repo| Self::card(repo, &profile.login))
            .collect();

        let skills = if payload.skills.is_empty() {
            derive_skills(&payload.repos)
        } else {
            payload.skills.clone()
        };

        let skill_views = skills
            .iter()
            .map(|skill| SkillView {
                name: skill.name.clone(),
                level: skill.level.min(100),
                color: language_color(&skill.name),
            })
            .collect();

        let login = &profile.login;
        Self {
            name: profile.display_name().to_string(),
            bio: match profile.bio.as_deref() {
                Some(bio) if !bio.trim().is_empty() => bio.to_string(),
                _ => "Software Developer".to_string(),
            },
            avatar_url: profile.avatar_url.clone(),
            location: non_empty(profile.location.as_deref()),
            blog: non_empty(profile.blog.as_deref()),
            twitter: non_empty(profile.twitter_username.as_deref()),
            github_url: if profile.html_url.is_empty() {
                format!("https://github.com/{login}")
            } else {
                profile.html_url.clone()
            },
            repos: cards,
            skills: skill_views,
        }
    }

    fn card(repo: &Repository, login: &str) -> RepoCard {
        let description = repo
            .description
            .clone()
            .or_else(|| repo.detailed_description.clone())
            .unwrap_or_default();
        let detail = repo
            .detailed_description
            .clone()
            .filter(|d| *d != description);
        let language = non_empty(repo.language.as_deref());
        let color = language
            .as_deref()
            .map(language_color)
            .unwrap_or(DEFAULT_LANGUAGE_COLOR);
        let name = &repo.name;
        RepoCard {
            name: repo.name.clone(),
            description,
            detail,
            language,
            language_color: color,
            stars: repo.stars,
            forks: repo.forks,
            url: if repo.html_url.is_empty() {
                format!("https://github.com/{login}/{name}")
            } else {
                repo.html_url.clone()
            },
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Language count over the repository list when the payload came without a
/// skills section. Level = min(count * 20, 100), ordered by descending
/// count, ties keep first-seen order.
fn derive_skills(repos: &[Repository]) -> Vec<Skill> {
    let mut histogram: Vec<(String, u32)> = Vec::new();
    for repo in repos {
        let Some(lang) = non_empty(repo.language.as_deref()) else {
            continue;
        };
        match histogram.iter_mut().find(|(name, _)| *name == lang) {
            Some((_, count)) => *count += 1,
            None => histogram.push((lang, 1)),
        }
    }
    histogram.sort_by(|a, b| b.1.cmp(&a.1));
    histogram
        .into_iter()
        .map(|(name, count)| Skill {
            name,
            level: (count * 20).min(100),
        })
        .collect()
}

use crate::view::PortfolioView;

const FONT_AWESOME_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css";

const PAGE_CSS: &str = r#"
        :root {
            --primary: #0366d6;
            --secondary: #6f42c1;
            --dark: #24292e;
            --light: #f6f8fa;
            --accent: #28a745;
            --text: #24292e;
            --text-light: #6a737d;
            --border: #e1e4e8;
            --transition: all 0.3s ease;
            --shadow: 0 4px 6px rgba(0, 0, 0, 0.1);
            --radius: 8px;
        }

        /* Base Styles */
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, 'Open Sans', 'Helvetica Neue', sans-serif;
            line-height: 1.6;
            color: var(--text);
            background-color: var(--light);
            transition: var(--transition);
        }

        /* Dark Mode */
        body.dark-mode {
            --light: #0d1117;
            --dark: #c9d1d9;
            --text: #f0f6fc;
            --text-light: #8b949e;
            --border: #30363d;
            color: var(--text);
        }

        .container {
            width: 100%;
            max-width: 1200px;
            margin: 0 auto;
            padding: 0 20px;
        }

        a {
            color: var(--primary);
            text-decoration: none;
            transition: var(--transition);
        }

        a:hover {
            color: var(--secondary);
        }

        /* Header Styles */
        header {
            background-color: var(--primary);
            color: white;
            padding: 60px 0;
            position: relative;
            overflow: hidden;
        }

        header::before {
            content: '';
            position: absolute;
            top: 0;
            left: 0;
            width: 100%;
            height: 100%;
            background: linear-gradient(135deg, var(--primary) 0%, var(--secondary) 100%);
            opacity: 0.9;
            z-index: 1;
        }

        .header-content {
            position: relative;
            z-index: 2;
            display: flex;
            align-items: center;
            gap: 40px;
        }

        .profile-image {
            width: 150px;
            height: 150px;
            border-radius: 50%;
            border: 5px solid white;
            box-shadow: var(--shadow);
            transition: var(--transition);
            object-fit: cover;
        }

        .profile-image:hover {
            transform: scale(1.05);
        }

        .profile-info {
            flex: 1;
        }

        .profile-info h1 {
            font-size: 2.5rem;
            margin-bottom: 10px;
        }

        .profile-bio {
            font-size: 1.2rem;
            margin-bottom: 20px;
            opacity: 0.9;
        }

        .contact-info {
            display: flex;
            flex-wrap: wrap;
            gap: 15px;
        }

        .contact-item {
            display: flex;
            align-items: center;
            gap: 5px;
            background-color: rgba(255, 255, 255, 0.2);
            padding: 5px 10px;
            border-radius: 20px;
            font-size: 0.9rem;
        }

        .contact-item i {
            font-size: 1rem;
        }

        .contact-item a {
            color: white;
        }

        .contact-item a:hover {
            text-decoration: underline;
        }

        .theme-toggle {
            position: absolute;
            top: 20px;
            right: 20px;
            background: rgba(255, 255, 255, 0.2);
            border: none;
            color: white;
            width: 40px;
            height: 40px;
            border-radius: 50%;
            display: flex;
            align-items: center;
            justify-content: center;
            cursor: pointer;
            transition: var(--transition);
            z-index: 10;
        }

        .theme-toggle:hover {
            background: rgba(255, 255, 255, 0.3);
            transform: rotate(15deg);
        }

        /* Section Styles */
        section {
            padding: 60px 0;
        }

        .section-title {
            font-size: 2rem;
            margin-bottom: 40px;
            text-align: center;
            position: relative;
        }

        .section-title::after {
            content: '';
            position: absolute;
            bottom: -10px;
            left: 50%;
            transform: translateX(-50%);
            width: 60px;
            height: 4px;
            background-color: var(--primary);
            border-radius: 2px;
        }

        /* Skills Section */
        .skills-grid {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(250px, 1fr));
            gap: 20px;
        }

        .skill-item {
            background-color: white;
            border-radius: var(--radius);
            padding: 20px;
            box-shadow: var(--shadow);
            transition: var(--transition);
            opacity: 0;
            transform: translateY(20px);
        }

        .dark-mode .skill-item {
            background-color: #1a1f24;
        }

        .skill-item.animated {
            opacity: 1;
            transform: translateY(0);
        }

        .skill-item:hover {
            transform: translateY(-5px);
            box-shadow: 0 6px 12px rgba(0, 0, 0, 0.15);
        }

        .skill-name {
            font-weight: bold;
            margin-bottom: 10px;
            display: flex;
            align-items: center;
            gap: 8px;
        }

        .language-dot {
            width: 12px;
            height: 12px;
            border-radius: 50%;
            display: inline-block;
        }

        .skill-bar {
            height: 10px;
            background-color: var(--border);
            border-radius: 5px;
            overflow: hidden;
        }

        .skill-progress {
            height: 100%;
            background-color: var(--primary);
            border-radius: 5px;
            transition: width 1s ease-in-out;
        }

        /* Repositories Section */
        .repos-grid {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
            gap: 30px;
        }

        .repo-card {
            background-color: white;
            border-radius: var(--radius);
            padding: 25px;
            box-shadow: var(--shadow);
            transition: var(--transition);
            border: 1px solid var(--border);
            height: 100%;
            display: flex;
            flex-direction: column;
            opacity: 0;
            transform: translateY(20px);
        }

        .dark-mode .repo-card {
            background-color: #1a1f24;
        }

        .repo-card.animated {
            opacity: 1;
            transform: translateY(0);
        }

        .repo-card:hover {
            transform: translateY(-10px);
            box-shadow: 0 10px 20px rgba(0, 0, 0, 0.1);
        }

        .repo-name {
            font-size: 1.3rem;
            margin-bottom: 10px;
            color: var(--primary);
        }

        .repo-description {
            margin-bottom: 15px;
            flex-grow: 1;
            color: var(--text-light);
        }

        .repo-meta {
            display: flex;
            justify-content: space-between;
            margin-bottom: 20px;
            font-size: 0.9rem;
            color: var(--text-light);
        }

        .repo-language {
            display: flex;
            align-items: center;
            gap: 5px;
        }

        .repo-link {
            display: inline-block;
            padding: 8px 16px;
            background-color: var(--primary);
            color: white;
            border-radius: 4px;
            text-align: center;
            transition: var(--transition);
        }

        .repo-link:hover {
            background-color: var(--secondary);
            color: white;
        }

        /* Footer */
        footer {
            background-color: var(--dark);
            color: white;
            padding: 30px 0;
            text-align: center;
        }

        .footer-content {
            display: flex;
            flex-direction: column;
            align-items: center;
            gap: 15px;
        }

        .social-links {
            display: flex;
            gap: 15px;
        }

        .social-link {
            width: 40px;
            height: 40px;
            border-radius: 50%;
            background-color: rgba(255, 255, 255, 0.1);
            display: flex;
            align-items: center;
            justify-content: center;
            color: white;
            transition: var(--transition);
        }

        .social-link:hover {
            background-color: var(--primary);
            transform: translateY(-3px);
        }

        /* Responsive Design */
        @media (max-width: 768px) {
            .header-content {
                flex-direction: column;
                text-align: center;
            }

            .contact-info {
                justify-content: center;
            }

            .section-title {
                font-size: 1.8rem;
            }

            .repos-grid {
                grid-template-columns: 1fr;
            }
        }
"#;

const PAGE_SCRIPT: &str = r#"
        function toggleDarkMode() {
            document.body.classList.toggle('dark-mode');
            const icon = document.querySelector('.theme-toggle i');
            if (document.body.classList.contains('dark-mode')) {
                icon.className = 'fas fa-sun';
            } else {
                icon.className = 'fas fa-moon';
            }
            localStorage.setItem('darkMode', document.body.classList.contains('dark-mode'));
        }

        document.addEventListener('DOMContentLoaded', function() {
            if (localStorage.getItem('darkMode') === 'true') {
                document.body.classList.add('dark-mode');
                document.querySelector('.theme-toggle i').className = 'fas fa-sun';
            }

            const elements = document.querySelectorAll('.skill-item, .repo-card');
            elements.forEach((el, index) => {
                setTimeout(() => {
                    el.classList.add('animated');
                }, 100 + (index * 50));
            });
        });
"#;

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn skills_html(view: &PortfolioView) -> String {
    if view.skills.is_empty() {
        return "<p>No skills data available</p>".to_string();
    }
    let mut out = String::new();
    for skill in &view.skills {
        let name = escape_html(&skill.name);
        let level = skill.level;
        let color = skill.color;
        out.push_str(&format!(
            r#"
        <div class="skill-item">
            <div class="skill-name">
                <span class="language-dot" style="background-color: {color}"></span>
                {name}
            </div>
            <div class="skill-bar">
                <div class="skill-progress" style="width: {level}%"></div>
            </div>
        </div>
"#
        ));
    }
    out
}

fn repos_html(view: &PortfolioView) -> String {
    if view.repos.is_empty() {
        return "<p>No repositories available</p>".to_string();
    }
    let mut out = String::new();
    for repo in &view.repos {
        let name = escape_html(&repo.name);
        let description = escape_html(&repo.description);
        let detail_block = match &repo.detail {
            Some(detail) => format!("<p><small>{}</small></p>\n            ", escape_html(detail)),
            None => String::new(),
        };
        let language_block = match &repo.language {
            Some(language) => format!(
                r#"<div class="repo-language"><span class="language-dot" style="background-color: {}"></span> {}</div>"#,
                repo.language_color,
                escape_html(language)
            ),
            None => String::new(),
        };
        let stars = repo.stars;
        let forks = repo.forks;
        let url = &repo.url;
        out.push_str(&format!(
            r#"
        <div class="repo-card">
            <h3 class="repo-name">{name}</h3>
            <p class="repo-description">{description}</p>
            {detail_block}<div class="repo-meta">
                {language_block}
                <div><i class="fas fa-star"></i> {stars}</div>
                <div><i class="fas fa-code-branch"></i> {forks}</div>
            </div>
            <a href="{url}" class="repo-link" target="_blank">View Repository</a>
        </div>
"#
        ));
    }
    out
}

fn contact_html(view: &PortfolioView) -> String {
    let mut out = String::new();
    if let Some(location) = &view.location {
        out.push_str(&format!(
            r#"<div class="contact-item"><i class="fas fa-map-marker-alt"></i> {}</div>
                        "#,
            escape_html(location)
        ));
    }
    if let Some(blog) = &view.blog {
        let blog = escape_html(blog);
        out.push_str(&format!(
            r#"<div class="contact-item"><i class="fas fa-globe"></i> <a href="{blog}" target="_blank">{blog}</a></div>
                        "#
        ));
    }
    if let Some(twitter) = &view.twitter {
        let twitter = escape_html(twitter);
        out.push_str(&format!(
            r#"<div class="contact-item"><i class="fab fa-twitter"></i> <a href="https://twitter.com/{twitter}" target="_blank">@{twitter}</a></div>
                        "#
        ));
    }
    let github_url = &view.github_url;
    out.push_str(&format!(
        r#"<div class="contact-item"><i class="fab fa-github"></i> <a href="{github_url}" target="_blank">GitHub</a></div>"#
    ));
    out
}

fn social_html(view: &PortfolioView) -> String {
    let github_url = &view.github_url;
    let mut out = format!(
        r#"<a href="{github_url}" class="social-link" target="_blank">
                        <i class="fab fa-github"></i>
                    </a>"#
    );
    if let Some(twitter) = &view.twitter {
        out.push_str(&format!(
            r#"
                    <a href="https://twitter.com/{}" class="social-link" target="_blank"><i class="fab fa-twitter"></i></a>"#,
            escape_html(twitter)
        ));
    }
    if let Some(blog) = &view.blog {
        out.push_str(&format!(
            r#"
                    <a href="{}" class="social-link" target="_blank"><i class="fas fa-globe"></i></a>"#,
            escape_html(blog)
        ));
    }
    out
}

/// Renders the portfolio page with the current year in the footer.
pub fn render(view: &PortfolioView) -> String {
    use chrono::Datelike;
    render_with_year(view, chrono::Utc::now().year())
}

/// Deterministic variant used by tests.
pub fn render_with_year(view: &PortfolioView, year: i32) -> String {
    let name = escape_html(&view.name);
    let bio = escape_html(&view.bio);
    let avatar_url = &view.avatar_url;
    let contact = contact_html(view);
    let skills = skills_html(view);
    let repos = repos_html(view);
    let social = social_html(view);
    let css = PAGE_CSS;
    let script = PAGE_SCRIPT;

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="Portfolio website for {name} - GitHub Developer">
    <meta name="keywords" content="portfolio, github, developer, {name}">
    <title>{name} - Portfolio</title>
    <link rel="stylesheet" href="{FONT_AWESOME_URL}">
    <style>{css}</style>
</head>
<body>
    <button class="theme-toggle" onclick="toggleDarkMode()">
        <i class="fas fa-moon"></i>
    </button>

    <header>
        <div class="container">
            <div class="header-content">
                <img src="{avatar_url}" alt="{name}" class="profile-image">
                <div class="profile-info">
                    <h1>{name}</h1>
                    <p class="profile-bio">{bio}</p>
                    <div class="contact-info">
                        {contact}
                    </div>
                </div>
            </div>
        </div>
    </header>

    <section id="skills">
        <div class="container">
            <h2 class="section-title">Skills</h2>
            <div class="skills-grid">
                {skills}
            </div>
        </div>
    </section>

    <section id="projects">
        <div class="container">
            <h2 class="section-title">Featured Projects</h2>
            <div class="repos-grid">
                {repos}
            </div>
        </div>
    </section>

    <footer>
        <div class="container">
            <div class="footer-content">
                <p>&copy; {year} {name} - GitHub Portfolio</p>
                <div class="social-links">
                    {social}
                </div>
            </div>
        </div>
    </footer>

    <script>{script}</script>
</body>
</html>"#
    )
}

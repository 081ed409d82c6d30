/// Minimal static page used when website generation exhausted its retries.
pub fn fallback_page(username: &str, bio: &str) -> String {
    let bio = if bio.trim().is_empty() {
        "GitHub User"
    } else {
        bio
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{username} - Portfolio</title>
    <style>
        body {{ font-family: sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; }}
        h1 {{ color: #0366d6; }}
        .profile {{ display: flex; align-items: center; gap: 20px; margin-bottom: 30px; }}
        .profile img {{ width: 100px; height: 100px; border-radius: 50%; }}
    </style>
</head>
<body>
    <div class="profile">
        <img src="https://github.com/{username}.png" alt="{username}">
        <div>
            <h1>{username}</h1>
            <p>{bio}</p>
        </div>
    </div>
    <h2>GitHub Profile</h2>
    <p><a href="https://github.com/{username}" target="_blank">View on GitHub</a></p>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_a_complete_document() {
        let html = fallback_page("ada", "");
        assert!(html.contains("<html"));
        assert!(html.contains("<body>"));
        assert!(html.contains("GitHub User"));
        assert!(html.contains("https://github.com/ada.png"));
    }
}

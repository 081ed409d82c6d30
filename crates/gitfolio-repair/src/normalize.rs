//! Final normalization applied after repair. Each helper is idempotent and
//! checks by tag presence, independently of the repair pass's own checks.

use crate::{contains_ci, find_ci, head_insertion_point, head_open_end, FONT_AWESOME_URL};

const THEME_SCRIPT: &str = r#"
<script>
    function toggleDarkMode() {
        document.body.classList.toggle('dark-mode');
        localStorage.setItem('darkMode', document.body.classList.contains('dark-mode'));
    }

    document.addEventListener('DOMContentLoaded', function() {
        if (localStorage.getItem('darkMode') === 'true') {
            document.body.classList.add('dark-mode');
        }

        const cards = document.querySelectorAll('.repo-card');
        cards.forEach(card => {
            card.addEventListener('mouseenter', function() {
                this.style.transform = 'translateY(-10px)';
            });
            card.addEventListener('mouseleave', function() {
                this.style.transform = 'translateY(0)';
            });
        });
    });
</script>
"#;

/// Appends a theme-toggle script before `</body>` when no script tag exists.
pub fn ensure_theme_script(html: &str) -> String {
    if contains_ci(html, "<script") {
        return html.to_string();
    }
    match find_ci(html, "</body>") {
        Some(pos) => {
            let mut out = html.to_string();
            out.insert_str(pos, THEME_SCRIPT);
            out
        }
        None => html.to_string(),
    }
}

/// Inserts the icon-font stylesheet link into the head when no reference
/// to it exists anywhere in the markup.
pub fn ensure_icon_font_link(html: &str) -> String {
    if contains_ci(html, "font-awesome") || contains_ci(html, "fontawesome") {
        return html.to_string();
    }
    match head_insertion_point(html) {
        Some(pos) => {
            let mut out = html.to_string();
            out.insert_str(
                pos,
                &format!("<link rel=\"stylesheet\" href=\"{FONT_AWESOME_URL}\">\n"),
            );
            out
        }
        None => html.to_string(),
    }
}

/// Injects a description meta tag right after `<head>` when none exists.
pub fn ensure_description_meta(html: &str, username: &str) -> String {
    if contains_ci(html, "<meta name=\"description\"") {
        return html.to_string();
    }
    match head_open_end(html) {
        Some(insert_at) => {
            let mut out = html.to_string();
            out.insert_str(
                insert_at,
                &format!(
                    "\n<meta name=\"description\" content=\"Portfolio website for GitHub user {username}\">\n<meta name=\"keywords\" content=\"portfolio, github, developer, {username}\">"
                ),
            );
            out
        }
        None => html.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "<html><head><title>t</title></head><body>x</body></html>";

    #[test]
    fn script_added_once() {
        let first = ensure_theme_script(DOC);
        assert!(first.contains("<script>"));
        let second = ensure_theme_script(&first);
        assert_eq!(first, second);
    }

    #[test]
    fn icon_font_added_once() {
        let first = ensure_icon_font_link(DOC);
        assert!(first.contains("font-awesome"));
        let second = ensure_icon_font_link(&first);
        assert_eq!(first, second);
    }

    #[test]
    fn description_meta_added_after_head() {
        let first = ensure_description_meta(DOC, "ada");
        assert!(first.contains("Portfolio website for GitHub user ada"));
        let head_pos = first.find("<head>").unwrap();
        let meta_pos = first.find("<meta name=\"description\"").unwrap();
        assert!(meta_pos > head_pos);
        let second = ensure_description_meta(&first, "ada");
        assert_eq!(first, second);
    }

    #[test]
    fn icon_font_inserted_without_closing_head_tag() {
        let doc = "<html><head><title>t</title><body>x</body></html>";
        let out = ensure_icon_font_link(doc);
        assert!(out.contains("font-awesome"));
        assert_eq!(ensure_icon_font_link(&out), out);
    }

    #[test]
    fn document_without_anchors_is_untouched() {
        assert_eq!(ensure_theme_script("plain text"), "plain text");
        assert_eq!(ensure_icon_font_link("plain text"), "plain text");
        assert_eq!(ensure_description_meta("plain text", "ada"), "plain text");
    }
}

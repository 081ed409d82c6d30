use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::{contains_ci, find_ci, head_insertion_point, opening_tag_end, FONT_AWESOME_URL};

const DEFAULT_CSS: &str = r#"
            body {
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
                line-height: 1.6;
                color: #333;
                max-width: 1200px;
                margin: 0 auto;
                padding: 20px;
            }
            "#;

static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*>(.*?)</style>").unwrap());

/// Result of one repair pass.
#[derive(Debug, Clone)]
pub struct RepairOutcome {
    pub html: String,
    /// Corrective actions in the order they were applied.
    pub fixes: Vec<String>,
}

/// Normalizes a possibly-malformed HTML string into a well-formed document.
///
/// Running the pass on its own output applies no further fixes. On an
/// unexpected internal failure the input comes back unchanged with a
/// single explanatory entry, so this stage never fails its caller.
pub fn repair(html: &str) -> RepairOutcome {
    let input = html.to_string();
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| repair_inner(html))) {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::error!("internal failure during HTML repair, returning input unchanged");
            RepairOutcome {
                html: input,
                fixes: vec!["error checking HTML structure, original HTML returned".to_string()],
            }
        }
    }
}

fn repair_inner(html: &str) -> RepairOutcome {
    let mut fixed = html.to_string();
    let mut fixes = Vec::new();

    if !contains_ci(&fixed, "<html") {
        fixed = format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<title>Portfolio</title>\n</head>\n<body>\n{fixed}\n</body>\n</html>"
        );
        fixes.push("added basic HTML structure".to_string());
    } else {
        if !contains_ci(&fixed, "<head") {
            if let Some(pos) = opening_tag_end(&fixed, "<html") {
                fixed.insert_str(
                    pos,
                    "\n<head>\n<meta charset=\"UTF-8\">\n<title>Portfolio</title>\n</head>",
                );
                fixes.push("added head tag".to_string());
            }
        }
        if !contains_ci(&fixed, "<body") {
            let start = find_ci(&fixed, "</head>")
                .map(|pos| pos + "</head>".len())
                .or_else(|| opening_tag_end(&fixed, "<html"));
            if let Some(start) = start {
                let end = find_ci(&fixed, "</html>").unwrap_or(fixed.len());
                let content = fixed[start..end].to_string();
                fixed.replace_range(start..end, &format!("\n<body>{content}</body>\n"));
                fixes.push("added body tag".to_string());
            }
        }
    }

    let document = Html::parse_document(&fixed);
    if !has_stylesheet(&document) {
        if let Some(pos) = head_insertion_point(&fixed) {
            fixed.insert_str(pos, &format!("<style>{DEFAULT_CSS}</style>\n"));
            fixes.push("added basic CSS".to_string());
        }
    }

    if fixed.contains("fa-") && !has_font_awesome_link(&document) {
        if let Some(pos) = head_insertion_point(&fixed) {
            fixed.insert_str(
                pos,
                &format!("<link rel=\"stylesheet\" href=\"{FONT_AWESOME_URL}\">\n"),
            );
            fixes.push("added Font Awesome link".to_string());
        }
    }

    if let Some((balanced, deficits)) = balance_style_braces(&fixed) {
        fixed = balanced;
        for deficit in deficits {
            fixes.push(format!("added {deficit} missing CSS closing braces"));
        }
    }

    if fixes.is_empty() {
        fixes.push("HTML structure is already valid".to_string());
    }

    RepairOutcome { html: fixed, fixes }
}

fn has_stylesheet(document: &Html) -> bool {
    let style = Selector::parse("style").ok();
    let link = Selector::parse("link[rel=\"stylesheet\"]").ok();
    let has_style = style
        .map(|s| document.select(&s).next().is_some())
        .unwrap_or(false);
    let has_link = link
        .map(|s| document.select(&s).next().is_some())
        .unwrap_or(false);
    has_style || has_link
}

fn has_font_awesome_link(document: &Html) -> bool {
    let Ok(link) = Selector::parse("link") else {
        return false;
    };
    document.select(&link).any(|el| {
        el.value()
            .attr("href")
            .map(|href| href.to_ascii_lowercase().contains("font-awesome"))
            .unwrap_or(false)
    })
}

/// Appends missing `}` to every `<style>` block whose opens exceed closes.
/// Returns the balanced document plus each deficient block's count, in
/// document order, or `None` when every block is already balanced.
fn balance_style_braces(html: &str) -> Option<(String, Vec<usize>)> {
    let mut deficits = Vec::new();
    let mut out = String::with_capacity(html.len());
    let mut last_end = 0usize;

    for caps in STYLE_BLOCK.captures_iter(html) {
        let (whole, body) = match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(body)) => (whole, body),
            _ => continue,
        };
        let opens = body.as_str().matches('{').count();
        let closes = body.as_str().matches('}').count();

        out.push_str(&html[last_end..whole.start()]);
        if opens > closes {
            let deficit = opens - closes;
            deficits.push(deficit);
            out.push_str(&html[whole.start()..body.end()]);
            out.push('\n');
            out.push_str(&"}".repeat(deficit));
            out.push_str("</style>");
        } else {
            out.push_str(whole.as_str());
        }
        last_end = whole.end();
    }

    if deficits.is_empty() {
        return None;
    }
    out.push_str(&html[last_end..]);
    Some((out, deficits))
}

/// Truncate `text` to at most `max_chars` characters, appending an ellipsis
/// when anything was cut. Counts characters, not bytes, so multi-byte input
/// never splits a code point.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = trimmed.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_text("hello", 150), "hello");
    }

    #[test]
    fn long_text_gets_ellipsis_within_budget() {
        let long = "x".repeat(200);
        let out = truncate_text(&long, 150);
        assert_eq!(out.chars().count(), 150);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn multibyte_input_never_splits_a_code_point() {
        let long = "é".repeat(200);
        let out = truncate_text(&long, 150);
        assert_eq!(out.chars().count(), 150);
    }
}

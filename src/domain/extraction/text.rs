//! Plain-text shaping shared by both extraction strategies.

/// Collapses every run of whitespace into one space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates to at most `max_chars` characters (not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Joins fragments with blank lines, collapses whitespace, and truncates.
pub fn bound_excerpt<I, S>(fragments: I, max_chars: usize) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = fragments
        .into_iter()
        .map(|fragment| fragment.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\n\n");
    truncate_chars(&collapse_whitespace(&joined), max_chars)
}

/// Returns true if extracted text is long enough to send to the model.
pub fn has_sufficient_signal(text: &str, min_chars: usize) -> bool {
    text.chars().count() >= min_chars
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn collapse_whitespace_flattens_newlines_and_tabs() {
        assert_eq!(collapse_whitespace("  a\n\n b\t\tc  "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }

    #[test]
    fn bound_excerpt_keeps_fragment_order() {
        let excerpt = bound_excerpt(["Meta", "Title", "Body text"], 100);
        assert_eq!(excerpt, "Meta Title Body text");
    }

    #[test]
    fn sufficient_signal_threshold_is_inclusive() {
        assert!(!has_sufficient_signal("", 100));
        assert!(!has_sufficient_signal(&"a".repeat(99), 100));
        assert!(has_sufficient_signal(&"a".repeat(100), 100));
    }

    proptest! {
        #[test]
        fn long_text_truncates_to_exact_cap(text in "[a-zé ]{0,400}", cap in 1usize..200) {
            let truncated = truncate_chars(&text, cap);
            let len = text.chars().count();
            if len > cap {
                prop_assert_eq!(truncated.chars().count(), cap);
            } else {
                prop_assert_eq!(truncated, text);
            }
        }

        #[test]
        fn excerpt_never_exceeds_cap(parts in proptest::collection::vec("\\PC{0,80}", 0..8), cap in 0usize..300) {
            let excerpt = bound_excerpt(&parts, cap);
            prop_assert!(excerpt.chars().count() <= cap);
        }
    }
}

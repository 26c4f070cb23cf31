//! Detection of coach replies that signal a finished section.

/// Phrases that mark a section as finished, matched case-insensitively.
pub const COMPLETION_PHRASES: &[&str] = &["complete", "sounds great", "excellent", "ready to move on"];

/// Returns true if the reply contains any completion phrase.
///
/// Matching is by substring, so "incomplete" also counts.
pub fn signals_completion(reply: &str) -> bool {
    let lowered = reply.to_lowercase();
    COMPLETION_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

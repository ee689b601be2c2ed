/// Replaces line breaks with spaces, as embedding services expect single-line input
pub fn normalize_for_embedding(text: &str) -> String {
    text.replace("\r\n", " ").replace('\n', " ")
}

/// Renders task names as the comma-joined list used inside prompts
pub fn join_task_names(names: &[String]) -> String {
    names.join(", ")
}

/// Shortens `text` to at most `max_chars` characters for log lines
pub fn truncate_for_log(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars).collect();
    short.push('…');
    short
}

/// Shortens `text` to at most `max_len` characters, marking the cut with
/// `...` when there is room for it.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    if max_len <= 3 {
        return text.chars().take(max_len).collect();
    }
    let mut truncated: String = text.chars().take(max_len - 3).collect();
    truncated.push_str("...");
    truncated
}

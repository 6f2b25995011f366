//! Text helpers for the domain layer.

/// Shorten `s` to at most `max_chars` characters, appending `…` when cut.
///
/// Counts characters rather than bytes, so Hangul and emoji are never split.
pub fn preview(s: &str, max_chars: usize) -> String {
    let single_line = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let mut out: String = single_line.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Returns the trimmed input, or `None` when nothing but whitespace remains.
pub fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// Output formatting — terminal display of equivalence reports and comparisons.

pub mod terminal;

const ELLIPSIS: &str = "...";

/// Cut `text` so the result, ellipsis included, is at most `max_chars`
/// characters long. Counts characters, not bytes, so multi-byte text is
/// never split mid-character. Widths too narrow for the ellipsis get a
/// plain cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };
    if max_chars <= ELLIPSIS.len() {
        return text[..cut].to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let end = text.char_indices().nth(keep).map_or(cut, |(i, _)| i);
    format!("{}{ELLIPSIS}", &text[..end])
}

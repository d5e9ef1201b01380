use lazy_static::lazy_static;
use regex::Regex;

/// Number of leading characters shown as a result preview.
pub const SNIPPET_CHARS: usize = 800;

lazy_static! {
    static ref COMMAND: Regex = Regex::new(r"\\[a-z]+").expect("valid regex");
    static ref NOISE: Regex = Regex::new(r"[^a-zA-Z0-9\s]").expect("valid regex");
    static ref SPACES: Regex = Regex::new(r"\s+").expect("valid regex");
}

/// Canonical display form of extracted text: backslash commands such as `\textbf`
/// are dropped, then everything but ASCII letters, digits and whitespace, then
/// whitespace runs collapse to one space and the ends are trimmed.
///
/// Display only. The vectorizer always sees the raw text.
pub fn clean_text(text: &str) -> String {
    let text = COMMAND.replace_all(text, "");
    let text = NOISE.replace_all(&text, "");
    let text = SPACES.replace_all(&text, " ");
    text.trim().to_string()
}

/// Cleaned preview of the first `max_chars` characters of `text`.
pub fn snippet(text: &str, max_chars: usize) -> String {
    let end = text
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    clean_text(&text[..end])
}

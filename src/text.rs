use deunicode::deunicode;

/// Length limit used when a caller has no field-specific limit.
pub const DEFAULT_MAX_LEN: usize = 50;

const PLACEHOLDER: &str = "Unknown";
const ELLIPSIS: &str = "...";

/// Transliterate `text` to ASCII and cut it to `max_len` characters,
/// appending an ellipsis when something was cut.
///
/// Missing or empty input yields `"Unknown"`.
pub fn truncate_text(text: Option<&str>, max_len: usize) -> String {
    let text = text.filter(|t| !t.is_empty()).unwrap_or(PLACEHOLDER);
    let ascii = deunicode(text);

    match ascii.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &ascii[..cut]),
        None => ascii,
    }
}

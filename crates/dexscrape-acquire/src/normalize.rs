use unicode_normalization::UnicodeNormalization;

/// Normalize scraped cell text: NFC, whitespace runs collapsed, trimmed.
///
/// Wiki cells carry stray newlines and non-breaking spaces around values.
pub fn normalize_text(input: &str) -> String {
    let nfc: String = input.nfc().collect();
    nfc.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a numeric cell. A single trailing `*` (footnote) or `%` is
/// dropped; anything else that is not all digits yields `None`.
pub fn parse_number(text: &str) -> Option<u16> {
    let text = text.trim();
    let text = text
        .strip_suffix('*')
        .or_else(|| text.strip_suffix('%'))
        .unwrap_or(text);
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

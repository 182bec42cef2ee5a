//! Full-width punctuation folding

/// Quote character that `「` and `」` fold to.
pub const QUOTE: char = '"';

/// Rewrite full-width parentheses, dash and corner brackets to ASCII.
///
/// `（` `）` become `(` `)`, `－` becomes `-`, and both `「` and `」` become [`QUOTE`].
/// Everything else passes through unchanged, so the function is idempotent.
pub fn normalize_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '（' => '(',
            '）' => ')',
            '－' => '-',
            '「' | '」' => QUOTE,
            other => other,
        })
        .collect()
}

//! Whitespace tokenizer.

/// Splits `text` on runs of Unicode whitespace.
///
/// Leading, trailing and repeated whitespace never yield empty tokens, so
/// blank input returns an empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

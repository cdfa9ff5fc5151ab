//! Text helpers shared by extraction and translation.

use std::sync::LazyLock;

use regex::Regex;

/// A `{...}` format placeholder such as `{0}` or `{count:N2}`.
pub static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*\}").unwrap());

/// Whether a UI line has anything worth translating: at least one letter
/// outside its format placeholders.
///
/// # Examples
///
/// ```
/// use phrasectl::utils::has_translatable_text;
///
/// assert!(has_translatable_text("Open {0}"));
/// assert!(has_translatable_text("打开"));
/// assert!(!has_translatable_text("{name}: {value}"));
/// assert!(!has_translatable_text("100%"));
/// ```
pub fn has_translatable_text(line: &str) -> bool {
    PLACEHOLDER_REGEX
        .replace_all(line, "")
        .chars()
        .any(char::is_alphabetic)
}

/// 1-based line number of byte `offset` in `source`. `\r\n`, `\n` and a lone
/// `\r` each end one line.
pub fn line_number_at(source: &str, offset: usize) -> usize {
    let bytes = &source.as_bytes()[..offset.min(source.len())];
    let mut line = 1;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'\n' => line += 1,
            b'\r' if bytes.get(i + 1) != Some(&b'\n') => line += 1,
            _ => {}
        }
    }
    line
}

//! Keyboard accelerator markers in UI text.
//!
//! A single `&` marks the following character as the accelerator
//! (`"&Open"`). `&&` stands for a literal ampersand.

/// Remove accelerator markup from `text`.
///
/// Returns the plain text and the marked character, uppercased. Only the first
/// marker counts. A lone `&` before whitespace or at the end marks nothing but
/// is still removed.
pub fn extract(text: &str) -> (String, Option<char>) {
    let mut plain = String::with_capacity(text.len());
    let mut marker = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '&' {
            plain.push(c);
            continue;
        }
        match chars.peek() {
            Some('&') => {
                plain.push('&');
                chars.next();
            }
            Some(&next) if marker.is_none() && !next.is_whitespace() => {
                marker = next.to_uppercase().next();
            }
            _ => {}
        }
    }

    (plain, marker)
}

/// Escape literal ampersands so none reads as a marker.
pub fn escape(text: &str) -> String {
    text.replace('&', "&&")
}

/// Mark the first occurrence of `marker` (case-insensitive) in escaped
/// `text`, or append ` (&X)` when the translation lost that letter.
///
/// Characters inside `{...}` placeholders are never marked.
pub fn insert(text: &str, marker: char) -> String {
    let target: Vec<char> = marker.to_lowercase().collect();
    let mut depth = 0usize;
    let mut found = None;

    for (index, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ if depth == 0 && c.to_lowercase().eq(target.iter().copied()) => {
                found = Some(index);
                break;
            }
            _ => {}
        }
    }

    match found {
        Some(index) => format!("{}&{}", &text[..index], &text[index..]),
        None => format!("{} (&{})", text, marker),
    }
}

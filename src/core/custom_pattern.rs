//! User-supplied patterns that extract strings the call-shape matcher misses.
//!
//! A pattern is a regular expression run over the raw source text. `\C`
//! stands for a C# string literal, quoted or verbatim:
//!
//! ```text
//! MessageBox\.Show\((\C)
//! ```
//!
//! The first capture group (or the whole match when there is none) is the
//! extracted text. A captured string literal is decoded; anything else is
//! taken as written.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use super::extractor::Occurrence;
use super::scanner::{ScanError, decode};
use crate::utils::line_number_at;

/// Expansion of `\C`.
pub const CSHARP_STRING_PATTERN: &str = r#"(?:"(?:\\"|.)*?"|@"(?:""|[^"])*")"#;

#[derive(Debug, Clone)]
pub struct CustomPattern {
    regex: Regex,
}

impl CustomPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&pattern.replace(r"\C", CSHARP_STRING_PATTERN))?;
        Ok(Self { regex })
    }

    /// All non-blank matches in `source`, in source order.
    pub fn find(&self, source: &str, file: &str) -> Result<Vec<Occurrence>, ScanError> {
        let mut occurrences = Vec::new();
        for caps in self.regex.captures_iter(source) {
            let Some(matched) = caps.get(1).or_else(|| caps.get(0)) else {
                continue;
            };
            let text = matched.as_str();
            let phrase = if text.starts_with('"') || text.starts_with("@\"") {
                decode(text)?.unwrap_or_else(|| text.to_string())
            } else {
                text.to_string()
            };
            if phrase.trim().is_empty() {
                continue;
            }
            occurrences.push(Occurrence {
                phrase,
                context: None,
                comment: None,
                file: file.to_string(),
                line: line_number_at(source, matched.start()),
            });
        }
        Ok(occurrences)
    }
}

impl FromStr for CustomPattern {
    type Err = regex::Error;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        Self::new(pattern)
    }
}

impl fmt::Display for CustomPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.regex.as_str())
    }
}

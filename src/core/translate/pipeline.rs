//! Preparing UI phrases for a translation backend and restoring the result.
//!
//! A backend only ever sees natural-language text. For each line:
//!
//! 1. Leading and trailing whitespace/punctuation are cut off and kept.
//! 2. The accelerator marker is removed and `&&` becomes `&`.
//! 3. `{...}` placeholders become `ZZ<n>` tokens.
//! 4. Capitalized words mid-sentence are lowercased so the backend does not
//!    treat them as proper nouns. This step is not reversed.
//!
//! [`restore`] undoes 3, 2 and 1 on the translated text and then cleans up
//! spacing the backend tends to introduce around punctuation.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{Backend, TranslateError, mnemonic};
use crate::core::catalog::{Catalog, CatalogRecord};
use crate::utils::{PLACEHOLDER_REGEX, has_translatable_text};

static PUNCTUATION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{P}$").unwrap());

// Backends may change the case of the token.
static PLACEHOLDER_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)zz(\d+)").unwrap());

const SPACING_FIXES: &[(&str, &str)] = &[
    (" .", "."),
    (" :", ":"),
    ("( ", "("),
    (" )", ")"),
    (" ,", ","),
];

/// What [`prepare`] took out of a line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreInfo {
    pub leading: String,
    pub trailing: String,
    /// Uppercased accelerator character.
    pub accelerator: Option<char>,
    /// Original placeholder text, indexed by token ordinal.
    pub placeholders: Vec<String>,
}

fn is_trim_char(c: char) -> bool {
    if matches!(c, '{' | '}' | '&') {
        return false;
    }
    let mut buf = [0u8; 4];
    c.is_whitespace() || PUNCTUATION_REGEX.is_match(c.encode_utf8(&mut buf))
}

/// Lowercase an uppercase letter that starts a word and is followed by a
/// non-uppercase character. The first character is left alone.
fn de_proper_case(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        let starts_word = i > 0 && !chars[i - 1].is_alphabetic();
        let followed_by_lower = chars.get(i + 1).is_some_and(|next| !next.is_uppercase());
        if c.is_uppercase() && starts_word && followed_by_lower {
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Split one line into the text sent to the backend and what is needed to
/// rebuild the line afterwards.
pub fn prepare(line: &str) -> (String, RestoreInfo) {
    let rest = line.trim_start_matches(is_trim_char);
    let leading = &line[..line.len() - rest.len()];
    let core = rest.trim_end_matches(is_trim_char);
    let trailing = &rest[core.len()..];

    let (core, accelerator) = mnemonic::extract(core);

    let mut placeholders = Vec::new();
    let core = PLACEHOLDER_REGEX
        .replace_all(&core, |caps: &Captures| {
            let token = format!("ZZ{}", placeholders.len());
            placeholders.push(caps[0].to_string());
            token
        })
        .into_owned();

    let info = RestoreInfo {
        leading: leading.to_string(),
        trailing: trailing.to_string(),
        accelerator,
        placeholders,
    };
    (de_proper_case(&core), info)
}

/// Put placeholders back by ordinal.
///
/// A token followed by more digits (`ZZ15` for `{1}5`) takes the longest
/// prefix that names an existing placeholder.
fn restore_placeholders(text: &str, placeholders: &[String]) -> String {
    if placeholders.is_empty() {
        return text.to_string();
    }
    PLACEHOLDER_TOKEN_REGEX
        .replace_all(text, |caps: &Captures| {
            let digits = &caps[1];
            for len in (1..=digits.len()).rev() {
                let candidate = &digits[..len];
                if let Ok(ordinal) = candidate.parse::<usize>()
                    && ordinal.to_string() == candidate
                    && let Some(placeholder) = placeholders.get(ordinal)
                {
                    return format!("{}{}", placeholder, &digits[len..]);
                }
            }
            caps[0].to_string()
        })
        .into_owned()
}

/// Rebuild a full line from the backend's translation of its core.
pub fn restore(translated: &str, info: &RestoreInfo) -> String {
    let text = restore_placeholders(translated, &info.placeholders);

    // Escape first so the marker inserted below stays live.
    let mut text = mnemonic::escape(&text);
    if let Some(marker) = info.accelerator {
        text = mnemonic::insert(&text, marker);
    }

    let mut text = format!("{}{}{}", info.leading, text, info.trailing);
    for (from, to) in SPACING_FIXES {
        text = text.replace(from, to);
    }
    text
}

/// Translate a single line. Lines without any letters outside placeholders
/// are returned unchanged without calling the backend.
pub fn translate_line(
    line: &str,
    backend: &dyn Backend,
    target_language: &str,
) -> Result<String, TranslateError> {
    if !has_translatable_text(line) {
        return Ok(line.to_string());
    }
    let (core, info) = prepare(line);
    let translated = backend.translate(&core, target_language)?;
    Ok(restore(&translated, &info))
}

/// Translate a possibly multi-line phrase one line at a time.
pub fn translate_phrase(
    phrase: &str,
    backend: &dyn Backend,
    target_language: &str,
) -> Result<String, TranslateError> {
    let lines = phrase
        .split('\n')
        .map(|line| translate_line(line, backend, target_language))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

/// Which records a translation pass touches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Retranslate {
    /// Only records without a translation.
    #[default]
    Missing,
    /// Also replace unreviewed machine translations.
    Machine,
    /// Every record, including reviewed ones.
    All,
}

impl Retranslate {
    fn wants(self, record: &CatalogRecord) -> bool {
        match self {
            Retranslate::Missing => record.translation.is_none(),
            Retranslate::Machine => record.translation.is_none() || record.machine,
            Retranslate::All => true,
        }
    }
}

/// Machine-translate the selected records of `catalog` in place.
///
/// Each distinct phrase is sent to the backend once. On error the catalog is
/// left unchanged. Returns the number of records translated.
pub fn translate_catalog(
    catalog: &mut Catalog,
    backend: &dyn Backend,
    target_language: &str,
    mode: Retranslate,
) -> Result<usize, TranslateError> {
    let mut translations: HashMap<String, String> = HashMap::new();
    let mut pending = Vec::new();

    for record in catalog.iter().filter(|record| mode.wants(record)) {
        if !translations.contains_key(&record.phrase) {
            let translation = translate_phrase(&record.phrase, backend, target_language)?;
            tracing::debug!(phrase = %record.phrase, %translation, "translated");
            translations.insert(record.phrase.clone(), translation);
        }
        pending.push(record.key());
    }

    for key in &pending {
        if let Some(record) = catalog.get_mut(key)
            && let Some(translation) = translations.get(&record.phrase)
        {
            record.set_machine_translation(translation.clone());
        }
    }

    Ok(pending.len())
}

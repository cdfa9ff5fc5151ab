//! Google Cloud Translation (v2 REST) backend.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{Backend, TranslateError};

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/language/translate/v2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslationList,
}

#[derive(Debug, Deserialize)]
struct TranslationList {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

pub struct GoogleTranslate {
    client: Client,
    endpoint: String,
    api_key: String,
    source_language: String,
}

impl GoogleTranslate {
    /// Fails with [`TranslateError::MissingCredential`] when no key is given.
    pub fn new(
        api_key: Option<String>,
        endpoint: impl Into<String>,
        source_language: impl Into<String>,
    ) -> Result<Self, TranslateError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(TranslateError::MissingCredential)?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
            source_language: source_language.into(),
        })
    }
}

impl Backend for GoogleTranslate {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        tracing::info!(%text, target_language, "requesting translation");
        let response: TranslateResponse = self
            .client
            .get(self.endpoint.as_str())
            .query(&[
                ("key", self.api_key.as_str()),
                ("source", self.source_language.as_str()),
                ("target", target_language),
                ("q", text),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        let translation = response
            .data
            .translations
            .into_iter()
            .next()
            .ok_or(TranslateError::EmptyResponse)?;
        let decoded = decode_html_entities(&translation.translated_text);
        tracing::info!(translation = %decoded, "received translation");
        Ok(decoded)
    }
}

/// Decode the HTML entities the service uses to escape its output.
pub fn decode_html_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

//! Machine translation of catalog phrases.
//!
//! [`pipeline`] shields placeholders, accelerators and surrounding
//! punctuation from the backend; [`google`] is the HTTP backend.

pub mod google;
pub mod mnemonic;
pub mod pipeline;

use thiserror::Error;

pub use google::GoogleTranslate;
pub use pipeline::{Retranslate, translate_catalog, translate_phrase};

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("No translation API key configured (use --api-key or PHRASECTL_API_KEY)")]
    MissingCredential,
    #[error("Translation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Translation response contained no translations")]
    EmptyResponse,
}

/// Translates one line of plain text from the source language.
pub trait Backend {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError>;
}

impl<F> Backend for F
where
    F: Fn(&str, &str) -> Result<String, TranslateError>,
{
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        self(text, target_language)
    }
}

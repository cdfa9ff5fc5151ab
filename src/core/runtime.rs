//! Phrase lookup as an application does it at run time.

use std::path::Path;

use anyhow::Result;

use super::catalog::{Catalog, RecordKey, load_catalog};

/// Answers translations from a loaded catalog.
///
/// Works with any catalog shape, including the trimmed release projection.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    catalog: Catalog,
}

impl Translator {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(load_catalog(path)?.catalog))
    }

    /// The context-specific translation if there is one, else the
    /// context-free translation, else the phrase itself.
    pub fn translate<'a>(&'a self, phrase: &'a str, context: Option<&str>) -> &'a str {
        let translation_of = |context: Option<&str>| {
            self.catalog
                .get(&RecordKey::new(phrase, context))
                .and_then(|record| record.translation.as_deref())
        };

        context
            .filter(|c| !c.is_empty())
            .and_then(|c| translation_of(Some(c)))
            .or_else(|| translation_of(None))
            .unwrap_or(phrase)
    }
}

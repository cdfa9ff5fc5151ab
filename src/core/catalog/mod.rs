//! The persisted catalog of phrases and their translations.
//!
//! A catalog is an ordered list of [`CatalogRecord`]s keyed by
//! `(phrase, context)`. Context variants of a phrase are ordinary records
//! whose `context` is set; the nested shape of the legacy file format only
//! exists at the serialization boundary (see [`format`]).

pub mod format;
pub mod sync;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize};

pub use format::{CatalogFormat, LoadedCatalog, ReleaseRecord, load_catalog, save_catalog};

/// Uniqueness key of a record. An empty context means "no context".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub phrase: String,
    pub context: String,
}

impl RecordKey {
    pub fn new(phrase: impl Into<String>, context: Option<&str>) -> Self {
        Self {
            phrase: phrase.into(),
            context: context.unwrap_or_default().to_string(),
        }
    }
}

/// Translation state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Untranslated, or machine translated and not yet reviewed.
    Todo,
    /// Translated and reviewed.
    Done,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub phrase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Guidance for translators, taken from a comment at the call site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub locations: Vec<String>,
    #[serde(default)]
    pub translation: Option<String>,
    /// Set while the translation is machine generated and unreviewed.
    #[serde(default, skip_serializing_if = "is_false")]
    pub machine: bool,
}

impl CatalogRecord {
    pub fn new(phrase: impl Into<String>, context: Option<String>) -> Self {
        Self {
            phrase: phrase.into(),
            context,
            ..Default::default()
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(&self.phrase, self.context.as_deref())
    }

    pub fn status(&self) -> Status {
        if !self.machine && self.translation.is_some() {
            Status::Done
        } else {
            Status::Todo
        }
    }

    /// Store a machine translation, flagging it for review.
    pub fn set_machine_translation(&mut self, translation: String) {
        self.translation = Some(translation);
        self.machine = true;
    }

    pub fn add_location(&mut self, location: &str) {
        if !self.locations.iter().any(|l| l == location) {
            self.locations.push(location.to_string());
        }
    }

    /// Bring the record back within its invariants: unique locations, an empty
    /// context treated as none, and no machine flag without a translation.
    pub fn normalize(&mut self) {
        let mut seen = HashSet::new();
        self.locations.retain(|l| seen.insert(l.clone()));
        if self.context.as_deref() == Some("") {
            self.context = None;
        }
        if self.translation.is_none() {
            self.machine = false;
        }
    }
}

/// Ordered collection of records with unique `(phrase, context)` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
    index: HashMap<RecordKey, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from records in order. A later record with an existing
    /// key is dropped.
    pub fn from_records(records: impl IntoIterator<Item = CatalogRecord>) -> Self {
        let mut catalog = Self::new();
        for mut record in records {
            record.normalize();
            let key = record.key();
            if catalog.index.contains_key(&key) {
                tracing::warn!(
                    phrase = %record.phrase,
                    context = record.context.as_deref().unwrap_or_default(),
                    "duplicate catalog entry ignored"
                );
                continue;
            }
            catalog.index.insert(key, catalog.records.len());
            catalog.records.push(record);
        }
        catalog
    }

    /// A copy with every record normalized.
    pub fn normalized(&self) -> Self {
        Self::from_records(self.records.iter().cloned())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogRecord> {
        self.records.iter()
    }

    pub fn contains(&self, key: &RecordKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &RecordKey) -> Option<&CatalogRecord> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    /// Mutable access to a record. Callers must not change its phrase or context.
    pub fn get_mut(&mut self, key: &RecordKey) -> Option<&mut CatalogRecord> {
        self.index.get(key).map(|&i| &mut self.records[i])
    }

    /// Insert a record, replacing (in place) any record with the same key.
    pub fn insert(&mut self, mut record: CatalogRecord) -> Option<CatalogRecord> {
        record.normalize();
        let key = record.key();
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.records[i], record)),
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    /// Apply `f` to every record. `f` must not change phrase or context.
    pub fn update_each(&mut self, mut f: impl FnMut(&mut CatalogRecord)) {
        for record in &mut self.records {
            f(record);
        }
        debug_assert!(
            self.records
                .iter()
                .enumerate()
                .all(|(i, r)| self.index.get(&r.key()) == Some(&i))
        );
    }

    /// Keep only records matching `keep`. Returns the number removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&CatalogRecord) -> bool) -> usize {
        let before = self.records.len();
        self.records.retain(|r| keep(r));
        self.reindex();
        before - self.records.len()
    }

    fn reindex(&mut self) {
        self.index = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.key(), i))
            .collect();
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogRecord;
    type IntoIter = std::slice::Iter<'a, CatalogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Accept `null` wherever a default value is acceptable.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

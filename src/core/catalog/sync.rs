//! Folding extracted occurrences into catalogs and merging catalogs.

use super::{Catalog, CatalogRecord, RecordKey, Status};
use crate::core::extractor::Occurrence;

/// Two occurrences of the same key carried different translator comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentConflict {
    pub key: RecordKey,
    /// The comment that was kept.
    pub kept: String,
    /// The comment that was ignored, and where it was seen.
    pub ignored: String,
    pub file: String,
    pub line: usize,
}

/// Builds a catalog from the occurrences of one extraction pass.
#[derive(Debug, Default)]
pub struct PhraseCollector {
    catalog: Catalog,
    include_locations: bool,
    found: usize,
    conflicts: Vec<CommentConflict>,
}

impl PhraseCollector {
    pub fn new(include_locations: bool) -> Self {
        Self {
            include_locations,
            ..Default::default()
        }
    }

    /// Fold one occurrence in. `location` is the catalog form of its file.
    pub fn add(&mut self, occurrence: Occurrence, location: &str) {
        self.found += 1;
        let key = RecordKey::new(&occurrence.phrase, occurrence.context.as_deref());

        let Some(record) = self.catalog.get_mut(&key) else {
            let mut record = CatalogRecord::new(occurrence.phrase, occurrence.context);
            record.comment = occurrence.comment;
            if self.include_locations {
                record.add_location(location);
            }
            self.catalog.insert(record);
            return;
        };

        if self.include_locations {
            record.add_location(location);
        }
        let Some(comment) = occurrence.comment else {
            return;
        };
        match record.comment.as_deref() {
            None => record.comment = Some(comment),
            Some(kept) if kept != comment => {
                tracing::debug!(
                    phrase = %key.phrase,
                    context = %key.context,
                    file = %occurrence.file,
                    line = occurrence.line,
                    kept,
                    ignored = %comment,
                    "conflicting translator comments"
                );
                self.conflicts.push(CommentConflict {
                    kept: kept.to_string(),
                    ignored: comment,
                    file: occurrence.file,
                    line: occurrence.line,
                    key,
                });
            }
            Some(_) => {}
        }
    }

    /// Number of occurrences added so far.
    pub fn found(&self) -> usize {
        self.found
    }

    /// Number of distinct `(phrase, context)` keys seen so far.
    pub fn unique(&self) -> usize {
        self.catalog.len()
    }

    /// The collected catalog and the comment conflicts met while building it.
    pub fn finish(self) -> (Catalog, Vec<CommentConflict>) {
        (self.catalog, self.conflicts)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Copy source locations into the target.
    pub copy_locations: bool,
    /// Remove target records that the source no longer has.
    pub trim: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            copy_locations: true,
            trim: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
}

/// Merge a freshly extracted `source` catalog into a translated `target`.
///
/// Translations and machine flags in `target` are never touched. Locations
/// and comments are taken from `source`. Every record of `target` first loses
/// its locations, so a record that survives only because trimming is off no
/// longer claims to be used anywhere.
pub fn update(source: &Catalog, target: &mut Catalog, options: UpdateOptions) -> UpdateStats {
    let mut stats = UpdateStats::default();

    target.update_each(|record| record.locations.clear());

    for record in source {
        let locations = if options.copy_locations {
            record.locations.clone()
        } else {
            Vec::new()
        };
        match target.get_mut(&record.key()) {
            Some(existing) => {
                existing.locations = locations;
                existing.comment = record.comment.clone();
                stats.updated += 1;
            }
            None => {
                target.insert(CatalogRecord {
                    locations,
                    ..record.clone()
                });
                stats.added += 1;
            }
        }
    }

    if options.trim {
        stats.removed = target.retain(|record| source.contains(&record.key()));
    }

    stats
}

/// Which classifications [`list`] returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub todo: bool,
    pub done: bool,
}

impl ListFilter {
    pub fn matches(self, status: Status) -> bool {
        match status {
            Status::Todo => self.todo,
            Status::Done => self.done,
        }
    }
}

pub fn list(catalog: &Catalog, filter: ListFilter) -> Vec<&CatalogRecord> {
    catalog
        .iter()
        .filter(|record| filter.matches(record.status()))
        .collect()
}

//! On-disk shapes of a catalog.
//!
//! Two historical shapes exist for the same data:
//!
//! - **List** (current): a JSON array of records,
//!   `[{ "phrase": "Block", "context": "cube", "translation": null }]`.
//! - **Legacy**: an object keyed by phrase, with context variants nested under
//!   `contexts`,
//!   `{ "Block": { "contexts": { "cube": { ... } }, "translation": null, "machine": false } }`.
//!   The oldest files stored a location list under `contexts`; that is read as
//!   locations.
//!
//! Both are read into the same [`Catalog`]; the shape is only chosen on write.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Catalog, CatalogRecord, null_as_default};
use crate::json_writer::{to_pretty_json, write_atomically};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogFormat {
    #[default]
    List,
    Legacy,
}

/// A catalog together with the shape it was read in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub format: CatalogFormat,
}

/// Runtime-only projection of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub phrase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
}

impl From<&CatalogRecord> for ReleaseRecord {
    fn from(record: &CatalogRecord) -> Self {
        Self {
            phrase: record.phrase.clone(),
            context: record.context.clone(),
            translation: record.translation.clone(),
        }
    }
}

/// Drop everything not needed at runtime: locations, comments and the
/// machine flag.
pub fn release_projection(catalog: &Catalog) -> Vec<ReleaseRecord> {
    catalog.iter().map(ReleaseRecord::from).collect()
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LegacyEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    locations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contexts: Option<LegacyContexts>,
    #[serde(default)]
    translation: Option<String>,
    #[serde(default)]
    machine: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum LegacyContexts {
    Variants(Map<String, Value>),
    Locations(Vec<String>),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LegacyVariant {
    #[serde(default, deserialize_with = "null_as_default")]
    locations: Vec<String>,
    #[serde(default)]
    translation: Option<String>,
    #[serde(default)]
    machine: bool,
}

/// Parse catalog JSON, detecting its shape.
pub fn parse_catalog(content: &str) -> Result<LoadedCatalog> {
    let value: Value = serde_json::from_str(content).context("Invalid JSON")?;
    match value {
        Value::Array(_) => {
            let records: Vec<CatalogRecord> =
                serde_json::from_value(value).context("Invalid catalog record")?;
            Ok(LoadedCatalog {
                catalog: Catalog::from_records(records),
                format: CatalogFormat::List,
            })
        }
        Value::Object(map) => Ok(LoadedCatalog {
            catalog: parse_legacy(map)?,
            format: CatalogFormat::Legacy,
        }),
        _ => bail!("Root of a catalog must be an array or an object"),
    }
}

fn parse_legacy(map: Map<String, Value>) -> Result<Catalog> {
    let mut records = Vec::with_capacity(map.len());
    for (phrase, value) in map {
        let entry: LegacyEntry = serde_json::from_value(value)
            .with_context(|| format!("Invalid catalog entry for \"{phrase}\""))?;

        let mut top = CatalogRecord {
            locations: entry.locations,
            translation: entry.translation,
            machine: entry.machine,
            ..CatalogRecord::new(phrase.clone(), None)
        };
        let mut variants = Vec::new();
        match entry.contexts {
            Some(LegacyContexts::Variants(contexts)) => {
                for (context, value) in contexts {
                    let variant: LegacyVariant =
                        serde_json::from_value(value).with_context(|| {
                            format!("Invalid context \"{context}\" for \"{phrase}\"")
                        })?;
                    variants.push(CatalogRecord {
                        locations: variant.locations,
                        translation: variant.translation,
                        machine: variant.machine,
                        ..CatalogRecord::new(phrase.clone(), Some(context))
                    });
                }
            }
            Some(LegacyContexts::Locations(locations)) => top.locations.extend(locations),
            None => {}
        }
        records.push(top);
        records.extend(variants);
    }
    Ok(Catalog::from_records(records))
}

fn legacy_value(catalog: &Catalog) -> Result<Value> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, (LegacyEntry, Map<String, Value>)> = HashMap::new();

    for record in catalog {
        let (entry, variants) = groups.entry(record.phrase.as_str()).or_insert_with(|| {
            order.push(record.phrase.as_str());
            Default::default()
        });
        match record.context.as_deref() {
            None => {
                entry.locations = record.locations.clone();
                entry.translation = record.translation.clone();
                entry.machine = record.machine;
            }
            Some(context) => {
                let variant = LegacyVariant {
                    locations: record.locations.clone(),
                    translation: record.translation.clone(),
                    machine: record.machine,
                };
                variants.insert(context.to_string(), serde_json::to_value(variant)?);
            }
        }
    }

    let mut root = Map::new();
    for phrase in order {
        if let Some((mut entry, variants)) = groups.remove(phrase) {
            if !variants.is_empty() {
                entry.contexts = Some(LegacyContexts::Variants(variants));
            }
            root.insert(phrase.to_string(), serde_json::to_value(entry)?);
        }
    }
    Ok(Value::Object(root))
}

/// Serialize a catalog in the given shape.
///
/// Records are normalized first, so duplicate locations never reach disk.
pub fn catalog_to_json(catalog: &Catalog, format: CatalogFormat) -> Result<String> {
    let catalog = catalog.normalized();
    match format {
        CatalogFormat::List => to_pretty_json(catalog.records()),
        CatalogFormat::Legacy => to_pretty_json(&legacy_value(&catalog)?),
    }
}

pub fn load_catalog(path: &Path) -> Result<LoadedCatalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    parse_catalog(&content).with_context(|| format!("Failed to parse catalog: {}", path.display()))
}

/// Load a catalog, or start an empty one in `format` if the file is missing.
pub fn load_catalog_or_default(path: &Path, format: CatalogFormat) -> Result<LoadedCatalog> {
    if path.exists() {
        load_catalog(path)
    } else {
        Ok(LoadedCatalog {
            catalog: Catalog::new(),
            format,
        })
    }
}

/// Write a catalog, replacing the file atomically.
pub fn save_catalog(path: &Path, catalog: &Catalog, format: CatalogFormat) -> Result<()> {
    let content = catalog_to_json(catalog, format)?;
    write_atomically(path, &content)
}

//! Extraction and catalog engine.
//!
//! Source text flows through [`scanner`] and [`extractor`] into occurrences,
//! which [`catalog::sync`] folds into catalogs. [`translate`] fills catalogs
//! with machine translations and [`runtime`] reads them back.

pub mod catalog;
pub mod custom_pattern;
pub mod extractor;
pub mod file_scanner;
pub mod runtime;
pub mod scanner;
pub mod translate;

//! phrasectl - translatable phrase extraction and catalog maintenance
//!
//! phrasectl finds the string literals a C# code base marks as translatable
//! (`"Open".T()`), collects them into JSON translation catalogs, keeps those
//! catalogs in sync as the code changes, and fills them with machine
//! translations.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanner, extractor, catalog model and translation pipeline
//! - `json_writer`: Pretty JSON and atomic file writes
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod json_writer;
pub mod utils;

use std::path::PathBuf;

use crate::core::catalog::sync::{CommentConflict, UpdateStats};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Update(UpdateSummary),
    Translate(TranslateSummary),
    List(ListSummary),
    Trim(WriteSummary),
    Convert(WriteSummary),
    Lookup(LookupSummary),
    Init(InitSummary),
}

/// A source file that could not be scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    pub path: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ExtractSummary {
    /// Rendered strings or catalog JSON.
    pub content: String,
    /// Where `content` was written; `None` means it goes to stdout.
    pub output: Option<PathBuf>,
    pub file_count: usize,
    pub found: usize,
    pub unique: usize,
    pub failures: Vec<ScanFailure>,
    /// Keys seen with more than one translator comment.
    pub conflicts: Vec<CommentConflict>,
}

#[derive(Debug)]
pub struct UpdateSummary {
    pub target: PathBuf,
    pub stats: UpdateStats,
}

#[derive(Debug)]
pub struct TranslateSummary {
    pub file: PathBuf,
    pub language: String,
    pub translated: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub phrase: String,
    pub context: Option<String>,
    pub translation: Option<String>,
}

#[derive(Debug)]
pub struct ListSummary {
    pub entries: Vec<ListEntry>,
}

/// A catalog rewritten into another file.
#[derive(Debug)]
pub struct WriteSummary {
    pub source: PathBuf,
    pub target: PathBuf,
    pub record_count: usize,
}

#[derive(Debug)]
pub struct LookupSummary {
    pub translation: String,
}

#[derive(Debug)]
pub struct InitSummary {
    /// Set when the config file already existed.
    pub error: Option<String>,
}

/// Result of running phrasectl commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self {
            summary,
            error_count: 0,
        }
    }
}

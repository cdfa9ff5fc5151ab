//! Report formatting and printing utilities.
//!
//! Command results go to stdout, per-file errors to stderr. Kept apart from
//! the commands so phrasectl can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, ExtractSummary, InitSummary, ListEntry, ScanFailure,
    TranslateSummary, UpdateSummary, WriteSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::catalog::sync::CommentConflict;
use crate::core::scanner::escape_string;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock(), &mut io::stderr().lock());
}

/// Print a command result to custom writers.
pub fn print_to<O: Write, E: Write>(result: &CommandResult, out: &mut O, err: &mut E) {
    match &result.summary {
        CommandSummary::Extract(summary) => print_extract(summary, out, err),
        CommandSummary::Update(summary) => print_update(summary, out),
        CommandSummary::Translate(summary) => print_translate(summary, out),
        CommandSummary::List(summary) => {
            for entry in &summary.entries {
                let _ = writeln!(out, "{}", format_list_entry(entry));
            }
        }
        CommandSummary::Trim(summary) => print_write("Trimmed", summary, out),
        CommandSummary::Convert(summary) => print_write("Converted", summary, out),
        CommandSummary::Lookup(summary) => {
            let _ = writeln!(out, "{}", summary.translation);
        }
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
}

fn print_extract<O: Write, E: Write>(summary: &ExtractSummary, out: &mut O, err: &mut E) {
    for failure in &summary.failures {
        print_scan_failure(failure, err);
    }
    for conflict in &summary.conflicts {
        print_comment_conflict(conflict, err);
    }

    match &summary.output {
        None => {
            let _ = write!(out, "{}", summary.content);
        }
        Some(path) => {
            let _ = writeln!(
                out,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Wrote {} strings ({} unique) from {} {} to {}",
                    summary.found,
                    summary.unique,
                    summary.file_count,
                    plural(summary.file_count, "file", "files"),
                    path.display()
                )
                .green()
            );
        }
    }

    if !summary.failures.is_empty() {
        let _ = writeln!(
            err,
            "{} {} {} could not be scanned",
            "warning:".bold().yellow(),
            summary.failures.len(),
            plural(summary.failures.len(), "file", "files"),
        );
    }
}

fn print_scan_failure<E: Write>(failure: &ScanFailure, err: &mut E) {
    let _ = writeln!(
        err,
        "{} {}: {}",
        "error:".bold().red(),
        failure.path,
        failure.message
    );
}

fn print_comment_conflict<E: Write>(conflict: &CommentConflict, err: &mut E) {
    let mut key = escape_string(&conflict.key.phrase);
    if !conflict.key.context.is_empty() {
        key = format!("{} ({})", key, escape_string(&conflict.key.context));
    }
    let _ = writeln!(
        err,
        "{} {}:{}: {} has another comment, keeping \"{}\" and ignoring \"{}\"",
        "warning:".bold().yellow(),
        conflict.file,
        conflict.line,
        key,
        conflict.kept,
        conflict.ignored
    );
}

fn print_update<O: Write>(summary: &UpdateSummary, out: &mut O) {
    let stats = &summary.stats;
    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Updated {}: {} added, {} updated, {} removed",
            summary.target.display(),
            stats.added,
            stats.updated,
            stats.removed
        )
        .green()
    );
}

fn print_translate<O: Write>(summary: &TranslateSummary, out: &mut O) {
    if summary.translated == 0 {
        let _ = writeln!(
            out,
            "{} Nothing to translate in {}",
            SUCCESS_MARK.green(),
            summary.file.display()
        );
        return;
    }
    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Translated {} {} to '{}' in {}",
            summary.translated,
            plural(summary.translated, "record", "records"),
            summary.language,
            summary.file.display()
        )
        .green()
    );
}

fn print_write<O: Write>(verb: &str, summary: &WriteSummary, out: &mut O) {
    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "{} {} into {} ({} {})",
            verb,
            summary.source.display(),
            summary.target.display(),
            summary.record_count,
            plural(summary.record_count, "record", "records"),
        )
        .green()
    );
}

fn print_init<O: Write, E: Write>(summary: &InitSummary, out: &mut O, err: &mut E) {
    match &summary.error {
        Some(message) => {
            let _ = writeln!(err, "{} {}", FAILURE_MARK.red(), message);
        }
        None => {
            let _ = writeln!(
                out,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", CONFIG_FILE_NAME).green()
            );
        }
    }
}

/// `"phrase" ("context") => "translation"`, with `null` for a missing translation.
fn format_list_entry(entry: &ListEntry) -> String {
    let mut line = escape_string(&entry.phrase);
    if let Some(context) = &entry.context {
        line.push_str(&format!(" ({})", escape_string(context)));
    }
    let translation = match &entry.translation {
        Some(translation) => escape_string(translation),
        None => "null".to_string(),
    };
    format!("{} => {}", line, translation)
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

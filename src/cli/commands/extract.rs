use std::fmt::Write as _;
use std::fs;

use anyhow::{Context, Result};

use super::super::args::{ExtractCommand, OutputFormat};
use super::{CommandResult, CommandSummary, ExtractSummary, ScanFailure};
use crate::{
    config::Config,
    core::{
        catalog::{CatalogFormat, format::catalog_to_json, sync::PhraseCollector},
        custom_pattern::CustomPattern,
        extractor::{Extractor, Occurrence, Selection},
        file_scanner::{SourceFile, scan_files},
        scanner::escape_string,
    },
    json_writer::write_atomically,
};

/// Renders occurrences as text lines.
struct TextRenderer {
    format: OutputFormat,
    file_header: bool,
    raw: bool,
}

impl TextRenderer {
    fn quote(&self, text: &str) -> String {
        if self.raw {
            text.to_string()
        } else {
            escape_string(text)
        }
    }

    fn render_file(&self, out: &mut String, file: &SourceFile, occurrences: &[Occurrence]) {
        if occurrences.is_empty() {
            return;
        }
        if self.file_header {
            let _ = writeln!(out, "{}", file.display);
        }
        for occurrence in occurrences {
            if self.format == OutputFormat::Vs {
                let _ = write!(out, "{}({}): ", file.display, occurrence.line);
            }
            out.push_str(&self.quote(&occurrence.phrase));
            if let Some(context) = &occurrence.context {
                let _ = write!(out, " ({})", self.quote(context));
            }
            if let Some(comment) = &occurrence.comment {
                let _ = write!(out, " // {}", comment);
            }
            out.push('\n');
        }
        if self.file_header {
            out.push('\n');
        }
    }
}

fn scan_file(
    file: &SourceFile,
    verb: &str,
    selection: Selection,
    patterns: &[CustomPattern],
) -> Result<Vec<Occurrence>, ScanFailure> {
    let failure = |message: String| ScanFailure {
        path: file.display.clone(),
        message,
    };
    let bytes = fs::read(&file.path).map_err(|e| failure(e.to_string()))?;
    let source = String::from_utf8_lossy(&bytes);

    let mut occurrences = if selection.any() {
        Extractor::new(&source, &file.display, verb, selection)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| failure(e.to_string()))?
    } else {
        Vec::new()
    };
    for pattern in patterns {
        let found = pattern
            .find(&source, &file.display)
            .map_err(|e| failure(e.to_string()))?;
        occurrences.extend(found);
    }
    if !patterns.is_empty() {
        occurrences.sort_by_key(|o| o.line);
    }
    Ok(occurrences)
}

pub fn extract(cmd: ExtractCommand, config: &Config) -> Result<CommandResult> {
    let scan = scan_files(&cmd.path, &config.includes, &config.ignores)?;
    let selection = Selection {
        translatable: cmd.translatable,
        non_translatable: cmd.non_translatable,
    };
    let renderer = TextRenderer {
        format: cmd.format,
        file_header: cmd.file_header && cmd.format != OutputFormat::Json,
        raw: cmd.raw,
    };

    let mut collector = PhraseCollector::new(cmd.locations);
    let mut content = String::new();
    let mut failures = Vec::new();

    for file in &scan.files {
        // A file that fails to scan contributes nothing, not even the strings
        // found before the error.
        let occurrences = match scan_file(file, &config.verb, selection, &cmd.patterns) {
            Ok(occurrences) => occurrences,
            Err(failure) => {
                tracing::debug!(path = %failure.path, "scan failed: {}", failure.message);
                failures.push(failure);
                continue;
            }
        };
        if cmd.format != OutputFormat::Json {
            renderer.render_file(&mut content, file, &occurrences);
        }
        for occurrence in occurrences {
            collector.add(occurrence, &file.location);
        }
    }

    let found = collector.found();
    let unique = collector.unique();
    let (catalog, conflicts) = collector.finish();
    if cmd.format == OutputFormat::Json {
        content = catalog_to_json(&catalog, CatalogFormat::List)?;
    } else {
        let _ = writeln!(content, "\nFinished: {} strings found, {} are unique", found, unique);
    }

    if let Some(path) = &cmd.output {
        write_atomically(path, &content)
            .with_context(|| format!("Failed to write output: {}", path.display()))?;
    }

    Ok(CommandResult {
        error_count: failures.len(),
        summary: CommandSummary::Extract(ExtractSummary {
            content,
            output: cmd.output,
            file_count: scan.files.len(),
            found,
            unique,
            failures,
            conflicts,
        }),
    })
}

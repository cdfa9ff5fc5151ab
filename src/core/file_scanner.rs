use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use glob::{Pattern, glob};
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// A source file selected for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path as shown in diagnostics and text output.
    pub display: String,
    /// Path relative to the scanned root with `/` separators, as stored in
    /// catalog locations.
    pub location: String,
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: Vec<SourceFile>,
    pub skipped_count: usize,
}

/// Include or ignore rule, matched against root-relative paths.
enum PathRule {
    Glob(Pattern),
    /// The path itself or anything below it.
    Prefix(String),
}

impl PathRule {
    fn parse(pattern: &str, field: &str) -> Result<Self> {
        if is_glob_pattern(pattern) {
            let pattern = Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in '{}': \"{}\"", field, pattern))?;
            Ok(Self::Glob(pattern))
        } else {
            Ok(Self::Prefix(pattern.trim_matches('/').to_string()))
        }
    }

    fn matches(&self, location: &str) -> bool {
        match self {
            Self::Glob(pattern) => pattern.matches(location),
            Self::Prefix(prefix) => {
                location == prefix
                    || location
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

fn parse_rules(patterns: &[String], field: &str) -> Result<Vec<PathRule>> {
    patterns.iter().map(|p| PathRule::parse(p, field)).collect()
}

fn to_location(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Directory part of a glob pattern before its first wildcard component.
///
/// `src/**/*.cs` gives `src`, `*.cs` gives an empty path.
fn glob_root(pattern: &str) -> PathBuf {
    Path::new(pattern)
        .components()
        .take_while(|component| {
            let text = component.as_os_str().to_string_lossy();
            !is_glob_pattern(&text) && !text.contains('[')
        })
        .collect()
}

/// Collect the source files named by `target`.
///
/// - A directory is walked recursively in name order. Files are kept when a
///   path relative to the directory matches `includes` and not `ignores`.
/// - A file is taken as is.
/// - Anything else is expanded as a glob pattern. Locations are relative to
///   the pattern's directory part and `ignores` still apply.
pub fn scan_files(target: &str, includes: &[String], ignores: &[String]) -> Result<ScanResult> {
    let include_rules = parse_rules(includes, "includes")?;
    let ignore_rules = parse_rules(ignores, "ignores")?;
    let ignored = |location: &str| ignore_rules.iter().any(|rule| rule.matches(location));

    let target_path = Path::new(target);
    let mut result = ScanResult::default();

    if target_path.is_file() {
        let location = target_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| target.to_string());
        result.files.push(SourceFile {
            path: target_path.to_path_buf(),
            display: target.to_string(),
            location,
        });
    } else if target_path.is_dir() {
        for entry in WalkDir::new(target_path).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    result.skipped_count += 1;
                    tracing::warn!("Cannot access path: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let Ok(relative) = path.strip_prefix(target_path) else {
                continue;
            };
            let location = to_location(relative);
            if ignored(&location) || !include_rules.iter().any(|rule| rule.matches(&location)) {
                continue;
            }
            result.files.push(SourceFile {
                path: path.to_path_buf(),
                display: path.display().to_string(),
                location,
            });
        }
    } else if is_glob_pattern(target) {
        let root = glob_root(target);
        let entries =
            glob(target).with_context(|| format!("Invalid glob pattern: \"{}\"", target))?;
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    result.skipped_count += 1;
                    tracing::warn!("Cannot access path: {}", e);
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }
            let location = to_location(path.strip_prefix(&root).unwrap_or(&path));
            if ignored(&location) {
                continue;
            }
            result.files.push(SourceFile {
                display: path.display().to_string(),
                path,
                location,
            });
        }
        result.files.sort_by(|a, b| a.path.cmp(&b.path));
    } else {
        bail!("Path does not exist: {}", target);
    }

    tracing::debug!(
        files = result.files.len(),
        skipped = result.skipped_count,
        "scanned {}",
        target
    );
    Ok(result)
}

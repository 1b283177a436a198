//! Input discovery: turns the configured input paths into the sorted list of
//! source files to extract from.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::core::parsers::json_tree::TREE_SUFFIX;

/// Always skipped, in addition to the configured ignore patterns.
pub const DEFAULT_IGNORES: &[&str] = &["**/node_modules/**"];

/// Kind of source file, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `*.html` template.
    Template,
    /// `*.component.ts` with a possible inline template.
    Component,
    /// `*.ast.json` serialized node tree.
    Tree,
}

impl SourceKind {
    pub fn of(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(TREE_SUFFIX) {
            Some(SourceKind::Tree)
        } else if name.ends_with(".component.ts") {
            Some(SourceKind::Component)
        } else if name.ends_with(".html") {
            Some(SourceKind::Template)
        } else {
            None
        }
    }

    /// Whether the file has to go through the external template parser.
    pub fn needs_parser_command(self) -> bool {
        !matches!(self, SourceKind::Tree)
    }
}

/// Check if a pattern contains glob wildcards (* or ?).
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Sorted, de-duplicated source files.
    pub files: Vec<PathBuf>,
    /// Entries that could not be read while walking.
    pub skipped_count: usize,
}

/// Collects source files under `inputs` (files, directories or glob patterns
/// relative to `base_dir`), skipping paths matched by `ignore_patterns`.
pub fn scan_files(
    base_dir: &Path,
    inputs: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let ignores: Vec<Pattern> = DEFAULT_IGNORES
        .iter()
        .copied()
        .chain(ignore_patterns.iter().map(String::as_str))
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} Invalid ignore pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p,
                        e
                    );
                }
                None
            }
        })
        .collect();

    let mut roots: Vec<PathBuf> = Vec::new();
    for input in inputs {
        let full = base_dir.join(input);
        if is_glob_pattern(input) {
            match glob(&full.to_string_lossy()) {
                Ok(entries) => roots.extend(entries.flatten()),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid glob pattern '{}': {}",
                            "warning:".bold().yellow(),
                            input,
                            e
                        );
                    }
                }
            }
        } else if full.exists() {
            roots.push(full);
        } else if verbose {
            eprintln!(
                "{} Input path does not exist: {}",
                "warning:".bold().yellow(),
                full.display()
            );
        }
    }

    for root in roots {
        for entry in WalkDir::new(&root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if ignores.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file() && SourceKind::of(path).is_some() {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

//! Report formatting and printing utilities.
//!
//! Human-readable output of the `extract` command. Kept apart from the
//! extraction task so the library can be used without printing anything.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::core::context::{CatalogSummary, Extraction, FileFailure};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

/// Print a warning about templates skipped for lack of a parser command.
pub fn print_unparsable(files: &[PathBuf], verbose: bool) {
    print_unparsable_to(files, verbose, &mut io::stderr().lock());
}

pub fn print_unparsable_to<W: Write>(files: &[PathBuf], verbose: bool, writer: &mut W) {
    if files.is_empty() {
        return;
    }
    let _ = writeln!(
        writer,
        "{} {} template {} skipped: no parser command configured (set {} or {})",
        "warning:".bold().yellow(),
        files.len(),
        plural(files.len(), "file", "files"),
        "--parser-command".cyan(),
        "parserCommand".cyan()
    );
    if verbose {
        for file in files {
            let _ = writeln!(writer, "  {}", file.display());
        }
    }
}

/// Print one error line per file that failed to extract.
pub fn print_failures(failures: &[FileFailure]) {
    print_failures_to(failures, &mut io::stderr().lock());
}

pub fn print_failures_to<W: Write>(failures: &[FileFailure], writer: &mut W) {
    for failure in failures {
        let _ = writeln!(
            writer,
            "{} {}: {}",
            "error:".bold().red(),
            failure.path.display(),
            failure.message
        );
    }
}

/// Print the extraction summary and one line per catalog.
pub fn print_summary(extraction: &Extraction, catalogs: &[CatalogSummary], dry_run: bool) {
    print_summary_to(extraction, catalogs, dry_run, &mut io::stdout().lock());
}

pub fn print_summary_to<W: Write>(
    extraction: &Extraction,
    catalogs: &[CatalogSummary],
    dry_run: bool,
    writer: &mut W,
) {
    let keys = extraction.collection.len();
    let files = extraction.files_processed;
    let headline = format!(
        "Extracted {} {} from {} {}",
        keys,
        plural(keys, "key", "keys"),
        files,
        plural(files, "file", "files")
    );
    if extraction.failures.is_empty() {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), headline.green());
    } else {
        let failed = extraction.failures.len();
        let _ = writeln!(
            writer,
            "{} {} ({} {} failed)",
            FAILURE_MARK.red(),
            headline,
            failed,
            plural(failed, "file", "files")
        );
    }

    for catalog in catalogs {
        print_catalog(catalog, writer);
    }

    if dry_run {
        let _ = writeln!(
            writer,
            "{} dry run, no files were written",
            "note:".bold().cyan()
        );
    }
}

fn print_catalog<W: Write>(catalog: &CatalogSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "  {} {} {} ({} added, {} removed)",
        display_path(&catalog.path).bold(),
        catalog.total,
        plural(catalog.total, "key", "keys"),
        format!("+{}", catalog.added).green(),
        format!("-{}", catalog.removed).red()
    );
}

/// Path relative to the working directory, without a leading `./`.
fn display_path(path: &Path) -> String {
    let path = path.strip_prefix(".").unwrap_or(path);
    path.display().to_string().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::collection::TranslationCollection;

    fn strip_ansi(s: &str) -> String {
        let mut result = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    fn render(f: impl FnOnce(&mut Vec<u8>)) -> String {
        let mut out = Vec::new();
        f(&mut out);
        strip_ansi(&String::from_utf8(out).unwrap())
    }

    fn extraction(keys: &[&str], failures: Vec<FileFailure>) -> Extraction {
        Extraction {
            collection: keys.iter().copied().collect::<TranslationCollection>(),
            failures,
            files_processed: 3,
        }
    }

    #[test]
    fn test_summary_with_catalogs() {
        let catalogs = vec![CatalogSummary {
            path: PathBuf::from("./i18n/en.json"),
            total: 4,
            added: 2,
            removed: 1,
            written: true,
        }];
        let output = render(|w| print_summary_to(&extraction(&["a", "b"], vec![]), &catalogs, false, w));
        assert_eq!(
            output,
            "✓ Extracted 2 keys from 3 files\n  i18n/en.json 4 keys (+2 added, -1 removed)\n"
        );
    }

    #[test]
    fn test_summary_with_failures_and_dry_run() {
        let failures = vec![FileFailure {
            path: PathBuf::from("src/a.ast.json"),
            message: "boom".to_string(),
        }];
        let output = render(|w| print_summary_to(&extraction(&["a"], failures), &[], true, w));
        assert_eq!(
            output,
            "✘ Extracted 1 key from 3 files (1 file failed)\nnote: dry run, no files were written\n"
        );
    }

    #[test]
    fn test_failures() {
        let failures = vec![FileFailure {
            path: PathBuf::from("src/a.ast.json"),
            message: "invalid template tree".to_string(),
        }];
        let output = render(|w| print_failures_to(&failures, w));
        assert_eq!(output, "error: src/a.ast.json: invalid template tree\n");
    }

    #[test]
    fn test_unparsable_lists_files_when_verbose() {
        let files = vec![PathBuf::from("src/app.html")];
        let quiet = render(|w| print_unparsable_to(&files, false, w));
        assert_eq!(
            quiet,
            "warning: 1 template file skipped: no parser command configured (set --parser-command or parserCommand)\n"
        );

        let verbose = render(|w| print_unparsable_to(&files, true, w));
        assert!(verbose.ends_with("  src/app.html\n"));
        assert!(render(|w| print_unparsable_to(&[], true, w)).is_empty());
    }
}

//! Extraction task: scans the configured inputs, extracts keys from every
//! file in parallel and updates each output catalog.
//!
//! # Pipeline
//!
//! 1. **Scan**: `input` paths → sorted source files
//! 2. **Extract**: one collection per file on the worker pool, merged in path order
//! 3. **Update**: for each catalog, `draft = extracted ∪ existing` (existing
//!    values win), post-processors, compile and write
//!
//! # Configuration Priority
//!
//! 1. CLI arguments (e.g., `--output i18n/en.json`)
//! 2. `.ngxextractrc.json` config file
//! 3. Built-in defaults

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use colored::Colorize;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    cli::args::ExtractArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        collection::{MergePolicy, TranslationCollection},
        compilers::{CatalogCompiler, Compiler},
        extract::TemplateExtractor,
        file_scanner::{SourceKind, scan_files},
        parsers::{CommandParser, FileParser},
        post_process::{
            KeyAsDefaultValue, KeyAsInitialDefaultValue, PostProcess, PostProcessor,
            PurgeObsoleteKeys, SortByKey, StringAsDefaultValue, StripPrefix, run_all,
        },
    },
};

/// Stack size of extraction workers; deeply nested template trees are
/// deserialized and walked on these threads.
const WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// A source file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Keys of one extraction run.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Merged keys of all files, values cleared.
    pub collection: TranslationCollection,
    pub failures: Vec<FileFailure>,
    pub files_processed: usize,
}

/// What happened to one output catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub path: PathBuf,
    pub total: usize,
    pub added: usize,
    pub removed: usize,
    pub written: bool,
}

pub struct ExtractContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,

    /// Source files to extract from, sorted.
    pub files: Vec<PathBuf>,

    /// Files that need the external parser while none is configured.
    pub unparsable_files: Vec<PathBuf>,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,
}

impl ExtractContext {
    /// Create a new `ExtractContext` from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if the config file cannot be read or the merged
    /// configuration is invalid.
    pub fn new(args: &ExtractArgs) -> Result<Self> {
        let verbose = args.common.verbose;
        let root_dir = args
            .common
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let config = apply_overrides(config_result.config, args);
        config.validate()?;

        Ok(Self::with_config(config, root_dir, verbose))
    }

    /// Scan the configured inputs under `root_dir`.
    pub fn with_config(config: Config, root_dir: PathBuf, verbose: bool) -> Self {
        let scan_result = scan_files(&root_dir, &config.input, &config.ignores, verbose);
        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        let has_parser = config.parser_command.is_some();
        let (files, unparsable_files): (Vec<PathBuf>, Vec<PathBuf>) =
            scan_result.files.into_iter().partition(|path| {
                has_parser || !SourceKind::of(path).is_some_and(SourceKind::needs_parser_command)
            });

        Self {
            config,
            root_dir,
            files,
            unparsable_files,
            verbose,
        }
    }

    pub fn extractor(&self) -> TemplateExtractor<FileParser> {
        let parser = FileParser::new(self.config.parser_command.clone().map(CommandParser::new));
        TemplateExtractor::new(parser)
            .with_marker_names(self.config.marker_attributes.clone())
            .with_pipe_names(self.config.pipe_names.clone())
    }

    pub fn compiler(&self) -> CatalogCompiler {
        CatalogCompiler::new(self.config.format, self.config.json_format())
    }

    /// Post-processors applied to every catalog draft, in order.
    pub fn post_processors(&self) -> Vec<PostProcessor> {
        let mut processors: Vec<PostProcessor> = Vec::new();
        if self.config.clean {
            processors.push(PurgeObsoleteKeys.into());
        }
        if self.config.key_as_initial_default_value {
            processors.push(KeyAsInitialDefaultValue.into());
        } else if self.config.key_as_default_value {
            processors.push(KeyAsDefaultValue.into());
        } else if let Some(value) = &self.config.string_as_default_value {
            processors.push(StringAsDefaultValue::new(value.clone()).into());
        }
        if self.config.sort {
            processors.push(SortByKey.into());
        }
        processors
    }

    /// Extract keys from all scanned files on a dedicated worker pool.
    ///
    /// Files that fail are reported in [`Extraction::failures`]; the keys of
    /// the other files are still merged.
    pub fn extract(&self) -> Result<Extraction> {
        let extractor = self.extractor();
        let pool = rayon::ThreadPoolBuilder::new()
            .stack_size(WORKER_STACK_SIZE)
            .build()
            .context("Failed to start extraction workers")?;

        let results: Vec<Result<TranslationCollection, FileFailure>> = pool.install(|| {
            self.files
                .par_iter()
                .map(|path| extract_file(&extractor, path))
                .collect()
        });

        let mut collection = TranslationCollection::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(keys) => collection = collection.union(&keys),
                Err(failure) => failures.push(failure),
            }
        }

        if let Some(prefix) = &self.config.strip_prefix {
            let empty = TranslationCollection::new();
            collection = StripPrefix::new(prefix.clone()).process(collection, &empty, &empty);
        }

        // New keys start untranslated.
        let collection = collection.map_values(|_, _| String::new());

        Ok(Extraction {
            collection,
            failures,
            files_processed: self.files.len(),
        })
    }

    /// Catalog files to update. A configured directory stands for every file
    /// in it with the compiler's extension.
    pub fn output_paths(&self, compiler: &CatalogCompiler) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for output in &self.config.output {
            let path = self.root_dir.join(output);
            if !path.is_dir() {
                paths.push(path);
                continue;
            }

            let mut catalogs: Vec<PathBuf> = fs::read_dir(&path)
                .with_context(|| format!("Failed to read output directory: {:?}", path))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| {
                    p.is_file()
                        && p.extension().and_then(|ext| ext.to_str()) == Some(compiler.extension())
                })
                .collect();
            catalogs.sort();

            if catalogs.is_empty() {
                eprintln!(
                    "{} No .{} files found in output directory {}",
                    "warning:".bold().yellow(),
                    compiler.extension(),
                    path.display()
                );
            }
            paths.extend(catalogs);
        }
        Ok(paths)
    }

    /// Merge `extracted` into every output catalog. Nothing is written when
    /// `dry_run` is set.
    pub fn update_catalogs(
        &self,
        extracted: &TranslationCollection,
        dry_run: bool,
    ) -> Result<Vec<CatalogSummary>> {
        let compiler = self.compiler();
        let processors = self.post_processors();

        self.output_paths(&compiler)?
            .into_iter()
            .map(|path| -> Result<CatalogSummary> {
                let existing = read_catalog(&compiler, &path)?;
                let draft = extracted
                    .clone()
                    .union_with(&existing, MergePolicy::PreferIncoming);
                let catalog = run_all(&processors, draft, extracted, &existing);

                let added = catalog.iter().filter(|(key, _)| !existing.has(key)).count();
                let removed = existing.iter().filter(|(key, _)| !catalog.has(key)).count();

                if !dry_run {
                    write_catalog(&compiler, &path, &catalog)?;
                    info!(
                        path = %path.display(),
                        keys = catalog.len(),
                        added,
                        removed,
                        "catalog written"
                    );
                }

                Ok(CatalogSummary {
                    path,
                    total: catalog.len(),
                    added,
                    removed,
                    written: !dry_run,
                })
            })
            .collect()
    }
}

fn apply_overrides(mut config: Config, args: &ExtractArgs) -> Config {
    if !args.input.is_empty() {
        config.input = args.input.clone();
    }
    if !args.output.is_empty() {
        config.output = args.output.clone();
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(indentation) = &args.format_indentation {
        config.format_indentation = indentation.clone();
    }
    if !args.markers.is_empty() {
        config.marker_attributes = args.markers.clone();
    }
    if !args.pipes.is_empty() {
        config.pipe_names = args.pipes.clone();
    }
    config.sort |= args.sort;
    config.clean |= args.clean;
    config.key_as_default_value |= args.key_as_default_value;
    config.key_as_initial_default_value |= args.key_as_initial_default_value;
    if args.string_as_default_value.is_some() {
        config.string_as_default_value = args.string_as_default_value.clone();
    }
    if args.strip_prefix.is_some() {
        config.strip_prefix = args.strip_prefix.clone();
    }
    if args.parser_command.is_some() {
        config.parser_command = args.parser_command.clone();
    }
    config
}

fn extract_file(
    extractor: &TemplateExtractor<FileParser>,
    path: &Path,
) -> Result<TranslationCollection, FileFailure> {
    let failure = |message: String| FileFailure {
        path: path.to_path_buf(),
        message,
    };
    let source = fs::read_to_string(path).map_err(|e| failure(format!("failed to read file: {}", e)))?;
    let collection = extractor
        .extract(&source, path)
        .map_err(|e| failure(e.to_string()))?;
    debug!(file = %path.display(), keys = collection.len(), "file done");
    Ok(collection)
}

fn read_catalog(compiler: &CatalogCompiler, path: &Path) -> Result<TranslationCollection> {
    if !path.exists() {
        return Ok(TranslationCollection::new());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read translation file: {:?}", path))?;
    compiler
        .parse(&contents)
        .with_context(|| format!("Failed to parse translation file: {:?}", path))
}

fn write_catalog(
    compiler: &CatalogCompiler,
    path: &Path,
    catalog: &TranslationCollection,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    let contents = compiler
        .compile(catalog)
        .with_context(|| format!("Failed to compile translation file: {:?}", path))?;
    fs::write(path, contents)
        .with_context(|| format!("Failed to write translation file: {:?}", path))
}

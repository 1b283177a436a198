//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract translation keys from templates and update catalogs
//! - `init`: Initialize the configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::compilers::OutputFormat;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(args)) => args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root used to find the config file and resolve paths
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Options of `extract`. Each one overrides the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Files, directories or glob patterns to extract from
    #[arg(short, long = "input", value_name = "PATH")]
    pub input: Vec<String>,

    /// Translation files (or directories of them) to update
    #[arg(short, long = "output", value_name = "PATH")]
    pub output: Vec<String>,

    /// Catalog format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Indentation used in written catalogs
    #[arg(long, value_name = "STRING")]
    pub format_indentation: Option<String>,

    /// Marker attribute names
    #[arg(long = "marker", value_name = "NAME")]
    pub markers: Vec<String>,

    /// Translate pipe names
    #[arg(long = "pipe", value_name = "NAME")]
    pub pipes: Vec<String>,

    /// Sort keys in written catalogs
    #[arg(short, long)]
    pub sort: bool,

    /// Remove keys that were not extracted
    #[arg(short, long)]
    pub clean: bool,

    /// Use the key as value for untranslated keys
    #[arg(long)]
    pub key_as_default_value: bool,

    /// Use the key as value for keys new to the catalog
    #[arg(long)]
    pub key_as_initial_default_value: bool,

    /// Use this string as value for untranslated keys
    #[arg(long, value_name = "STRING")]
    pub string_as_default_value: Option<String>,

    /// Remove this prefix from extracted keys
    #[arg(long, value_name = "PREFIX")]
    pub strip_prefix: Option<String>,

    /// Command printing the template tree of the file given on stdin
    #[arg(long, value_name = "COMMAND", env = "NGX_EXTRACT_PARSER_COMMAND")]
    pub parser_command: Option<String>,

    /// Report what would change without writing files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translation keys and update translation files
    Extract(ExtractArgs),
    /// Initialize a new .ngxextractrc.json configuration file
    Init,
}

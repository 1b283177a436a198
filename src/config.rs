use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{
    compilers::{DEFAULT_INDENTATION, JsonFormat, OutputFormat},
    extract::{DEFAULT_MARKER, DEFAULT_PIPE},
};

pub const CONFIG_FILE_NAME: &str = ".ngxextractrc.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_input")]
    pub input: Vec<String>,
    #[serde(default = "default_output")]
    pub output: Vec<String>,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_format_indentation")]
    pub format_indentation: String,
    #[serde(default = "default_newline_at_end_of_file")]
    pub newline_at_end_of_file: bool,
    #[serde(default = "default_marker_attributes")]
    pub marker_attributes: Vec<String>,
    #[serde(default = "default_pipe_names")]
    pub pipe_names: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub sort: bool,
    #[serde(default)]
    pub clean: bool,
    #[serde(default)]
    pub key_as_default_value: bool,
    #[serde(default)]
    pub key_as_initial_default_value: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_as_default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_prefix: Option<String>,
    /// External template parser, e.g. `node parse-template.js {file}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser_command: Option<String>,
}

fn default_input() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_output() -> Vec<String> {
    vec!["src/assets/i18n/en.json".to_string()]
}

fn default_format_indentation() -> String {
    DEFAULT_INDENTATION.to_string()
}

fn default_newline_at_end_of_file() -> bool {
    true
}

fn default_marker_attributes() -> Vec<String> {
    vec![DEFAULT_MARKER.to_string()]
}

fn default_pipe_names() -> Vec<String> {
    vec![DEFAULT_PIPE.to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            format: OutputFormat::default(),
            format_indentation: default_format_indentation(),
            newline_at_end_of_file: default_newline_at_end_of_file(),
            marker_attributes: default_marker_attributes(),
            pipe_names: default_pipe_names(),
            ignores: Vec::new(),
            sort: false,
            clean: false,
            key_as_default_value: false,
            key_as_initial_default_value: false,
            string_as_default_value: None,
            strip_prefix: None,
            parser_command: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Rejects invalid glob patterns in `ignores` and `input`, an empty
    /// `output` list and more than one default value option.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Inputs without wildcards are literal paths.
        for pattern in &self.input {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'input': \"{}\"", pattern)
                })?;
            }
        }

        if self.output.is_empty() {
            bail!("'output' must name at least one translation file");
        }

        let default_value_options = [
            self.key_as_default_value,
            self.key_as_initial_default_value,
            self.string_as_default_value.is_some(),
        ];
        if default_value_options.iter().filter(|set| **set).count() > 1 {
            bail!(
                "'keyAsDefaultValue', 'keyAsInitialDefaultValue' and 'stringAsDefaultValue' cannot be combined"
            );
        }

        Ok(())
    }

    pub fn json_format(&self) -> JsonFormat {
        JsonFormat {
            indentation: self.format_indentation.clone(),
            newline_at_end_of_file: self.newline_at_end_of_file,
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

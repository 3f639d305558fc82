//! Configuration system for sift.
//!
//! sift uses TOML configuration files named `.sift.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.sift.toml` files
//! found, then loading `~/.sift.toml` as the global config with lowest precedence.
//!
//! A config controls how raw queries are prepared (`[query]`) and how each search term is
//! rendered into a backend predicate (`[dialect.NAME]`).

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawDialect, RawQuerySettings, parse_config_file, parse_config_str};
use serde::{Deserialize, Serialize};
use sift_query::{ClauseTemplate, ParseOptions};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Name of the dialect that exists even when no config defines one.
pub const DEFAULT_DIALECT: &str = "default";

/// Default nesting limit for parenthesised groups.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Top-level merged configuration for sift.
///
/// This represents the fully resolved configuration after merging all discovered `.sift.toml`
/// files according to precedence rules.
#[derive(Debug, Clone)]
pub struct Config {
    /// Query preparation settings.
    pub query: QuerySettings,
    /// Named clause templates, always including [`DEFAULT_DIALECT`].
    pub dialects: BTreeMap<String, ClauseTemplate>,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            query: QuerySettings::default(),
            dialects: builtin_dialects(),
            config_root: None,
        }
    }
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sift.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.sift.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.sift.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    ///
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Looks up a dialect by name.
    pub fn dialect(&self, name: &str) -> Result<&ClauseTemplate, ConfigError> {
        self.dialects
            .get(name)
            .ok_or_else(|| ConfigError::UnknownDialect {
                name: name.to_string(),
                available: self.dialect_names().join(", "),
            })
    }

    /// Returns the dialect named by `query.dialect`.
    pub fn default_dialect(&self) -> Result<&ClauseTemplate, ConfigError> {
        self.dialect(&self.query.dialect)
    }

    /// Names of all known dialects, sorted.
    pub fn dialect_names(&self) -> Vec<&str> {
        self.dialects.keys().map(String::as_str).collect()
    }

    /// Parser options derived from `[query]`.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_depth: (self.query.max_depth > 0).then_some(self.query.max_depth),
        }
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - Dialects that render no columns
    /// - Dialects with an empty operator
    /// - A `query.dialect` that names no known dialect
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same shape as a `.sift.toml` file, with every dialect spelled out.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableConfig {
            query: &self.query,
            dialect: &self.dialects,
        };
        toml::to_string_pretty(&serializable).map_err(|source| ConfigError::Serialize { source })
    }
}

/// Settings from the `[query]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Run the sanitizer over raw input before normalizing.
    pub sanitize: bool,
    /// Nesting limit for parenthesised groups; 0 disables the limit.
    pub max_depth: usize,
    /// Dialect used when none is requested explicitly.
    pub dialect: String,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            sanitize: true,
            max_depth: DEFAULT_MAX_DEPTH,
            dialect: DEFAULT_DIALECT.to_string(),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableConfig<'a> {
    /// Query settings.
    query: &'a QuerySettings,
    /// Dialects, sorted by name.
    dialect: &'a BTreeMap<String, ClauseTemplate>,
}

/// Dialects available before any config file is applied.
fn builtin_dialects() -> BTreeMap<String, ClauseTemplate> {
    BTreeMap::from([(DEFAULT_DIALECT.to_string(), ClauseTemplate::default())])
}

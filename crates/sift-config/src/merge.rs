//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules.

use std::path::PathBuf;

use sift_query::ClauseTemplate;

use crate::{
    Config, QuerySettings,
    parse::{RawConfig, RawDialect, RawQuerySettings},
};

/// Operator used by a dialect that does not set one.
const DEFAULT_OPERATOR: &str = "LIKE";

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - `[query]` scalars: first defined value wins
/// - Dialects: merged by name, first definition wins completely
/// - The built-in `default` dialect survives unless some file redefines it
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut config = Config {
        query: merge_query_settings(configs),
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(PathBuf::from),
        ..Config::default()
    };

    // Lowest precedence first so closer definitions replace farther ones.
    for parsed in configs.iter().rev() {
        if let Some(ref dialects) = parsed.config.dialect {
            for (name, raw) in dialects {
                config.dialects.insert(name.clone(), resolve_dialect(raw));
            }
        }
    }

    config
}

/// Merges `[query]` settings, taking the first defined value for each field.
fn merge_query_settings(configs: &[ParsedConfig]) -> QuerySettings {
    let mut result = QuerySettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref query) = parsed.config.query {
            apply_raw_query(&mut result, query);
        }
    }

    result
}

/// Applies raw query settings to result, overwriting any present values.
fn apply_raw_query(result: &mut QuerySettings, raw: &RawQuerySettings) {
    if let Some(v) = raw.sanitize {
        result.sanitize = v;
    }
    if let Some(v) = raw.max_depth {
        result.max_depth = v;
    }
    if let Some(ref v) = raw.dialect {
        result.dialect = v.clone();
    }
}

/// Fills a raw dialect's missing fields.
///
/// A missing `columns` stays empty so validation can flag it.
fn resolve_dialect(raw: &RawDialect) -> ClauseTemplate {
    ClauseTemplate {
        columns: raw.columns.clone().unwrap_or_default(),
        operator: raw
            .operator
            .clone()
            .unwrap_or_else(|| DEFAULT_OPERATOR.to_string()),
        param: raw.param.unwrap_or_default(),
    }
}

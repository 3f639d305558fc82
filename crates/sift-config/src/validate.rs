//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use sift_query::ClauseTemplate;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A dialect lists no columns, so terms render as a bare placeholder.
    DialectWithoutColumns {
        /// Name of the dialect.
        dialect: String,
    },
    /// A dialect has a blank operator.
    EmptyOperator {
        /// Name of the dialect.
        dialect: String,
    },
    /// A dialect repeats bare `?` placeholders across several columns, so the
    /// fragment has more placeholders than arguments.
    AnonymousMultiColumn {
        /// Name of the dialect.
        dialect: String,
    },
    /// `query.dialect` names a dialect that is not defined.
    UnknownDefaultDialect {
        /// The configured name.
        dialect: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DialectWithoutColumns { dialect } => {
                write!(f, "dialect '{dialect}' has no columns")
            }
            Self::EmptyOperator { dialect } => {
                write!(f, "dialect '{dialect}' has an empty operator")
            }
            Self::AnonymousMultiColumn { dialect } => {
                write!(
                    f,
                    "dialect '{dialect}' uses anonymous parameters with multiple columns"
                )
            }
            Self::UnknownDefaultDialect { dialect } => {
                write!(f, "default dialect '{dialect}' is not defined")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings: Vec<ConfigWarning> = config
        .dialects
        .iter()
        .flat_map(|(name, dialect)| validate_dialect(name, dialect))
        .collect();

    if !config.dialects.contains_key(&config.query.dialect) {
        warnings.push(ConfigWarning::UnknownDefaultDialect {
            dialect: config.query.dialect.clone(),
        });
    }

    warnings
}

/// Validates a single dialect.
fn validate_dialect(name: &str, dialect: &ClauseTemplate) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if dialect.columns.iter().all(|c| c.trim().is_empty()) {
        warnings.push(ConfigWarning::DialectWithoutColumns {
            dialect: name.to_string(),
        });
    }
    if dialect.operator.trim().is_empty() {
        warnings.push(ConfigWarning::EmptyOperator {
            dialect: name.to_string(),
        });
    }
    if dialect.misaligns_args() {
        warnings.push(ConfigWarning::AnonymousMultiColumn {
            dialect: name.to_string(),
        });
    }

    warnings
}

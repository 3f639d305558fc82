//! Helpers shared by the query commands.

use sift_config::Config;
use sift_query::sanitize;
use tracing::debug;

/// Applies the sanitizer to `raw` when the config enables it and the user did not opt out.
pub fn prepare_query(config: &Config, raw: &str, no_sanitize: bool) -> String {
    if !config.query.sanitize || no_sanitize {
        return raw.to_string();
    }
    let cleaned = sanitize(raw);
    if cleaned != raw {
        debug!(raw, sanitized = %cleaned, "sanitized query");
    }
    cleaned
}

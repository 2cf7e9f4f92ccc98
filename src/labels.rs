// Label keys and prefix filtering

use std::collections::{BTreeMap, HashMap};

/// Standard prefix for bosun-managed labels.
pub const DEFAULT_LABEL_PREFIX: &str = "bosun.";

/// Label whose value is surfaced as `meta.instance`.
pub const LABEL_INSTANCE: &str = "bosun.instance";

pub const LABEL_COMPOSE_PROJECT: &str = "com.docker.compose.project";
pub const LABEL_COMPOSE_SERVICE: &str = "com.docker.compose.service";

/// Keeps labels whose key starts with any of `prefixes` and whose value is not blank.
///
/// Matching is a plain string-prefix test: `"bosun"` also matches `"bosunx.foo"`.
/// No prefixes means nothing matches.
pub fn filter_by_prefixes(
    labels: &HashMap<String, String>,
    prefixes: &[String],
) -> BTreeMap<String, String> {
    if prefixes.is_empty() {
        return BTreeMap::new();
    }
    labels
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .filter(|(k, _)| prefixes.iter().any(|p| k.starts_with(p.as_str())))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Value of the instance label, if present and not blank (same rule as the filter).
pub fn instance_of(labels: &HashMap<String, String>) -> Option<String> {
    labels
        .get(LABEL_INSTANCE)
        .filter(|v| !v.trim().is_empty())
        .cloned()
}

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! navigation engine. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

use crate::routing::entry::RouteEntry;

/// Root configuration: the route table plus engine settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NavigationConfig {
    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Match disambiguation policy.
    pub matching: MatchingConfig,

    /// Breadcrumb trail settings.
    pub breadcrumbs: BreadcrumbConfig,

    /// Entity lookup settings for dynamic trails.
    pub resolvers: ResolverConfig,

    /// Route table, in registration order.
    pub routes: Vec<RouteEntry>,
}

impl NavigationConfig {
    /// Default settings around the given route table.
    pub fn with_routes(routes: Vec<RouteEntry>) -> Self {
        Self {
            routes,
            ..Self::default()
        }
    }
}

/// What to do when two entries can produce the same best score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Refuse to build a registry containing such a pair.
    #[default]
    Reject,
    /// Keep whichever entry was registered first.
    RegistrationOrder,
}

/// Matching configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MatchingConfig {
    pub tie_break: TieBreak,
}

/// Breadcrumb configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BreadcrumbConfig {
    /// Route id of the canonical Home node every trail starts with.
    pub home: String,

    /// Leaf label when the entity does not exist.
    pub not_found_label: String,

    /// Leaf label when the entity lookup failed.
    pub unavailable_label: String,
}

impl Default for BreadcrumbConfig {
    fn default() -> Self {
        Self {
            home: "admin".to_string(),
            not_found_label: "Not Found".to_string(),
            // Same wording as not-found; the outcome still tells them apart.
            unavailable_label: "Not Found".to_string(),
        }
    }
}

/// Entity lookup configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Lookup timeout in milliseconds.
    pub timeout_ms: u64,

    /// Memoise names that were found.
    pub cache_names: bool,

    /// Age in milliseconds after which a memoised name is fetched again.
    pub cache_ttl_ms: u64,

    /// Upper bound on memoised names.
    pub cache_max_entries: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 3000,
            cache_names: true,
            cache_ttl_ms: 30_000,
            cache_max_entries: 10_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) used when `RUST_LOG`
    /// is not set.
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NavigationConfig::default();
        assert_eq!(config.matching.tie_break, TieBreak::Reject);
        assert_eq!(config.breadcrumbs.home, "admin");
        assert_eq!(config.breadcrumbs.not_found_label, "Not Found");
        assert_eq!(config.resolvers.timeout_ms, 3000);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_partial_config() {
        let config: NavigationConfig = toml::from_str(
            r#"
            [matching]
            tie_break = "registration-order"

            [breadcrumbs]
            home = "root"
            "#,
        )
        .unwrap();
        assert_eq!(config.matching.tie_break, TieBreak::RegistrationOrder);
        assert_eq!(config.breadcrumbs.home, "root");
        assert_eq!(config.breadcrumbs.unavailable_label, "Not Found");
        assert!(config.resolvers.cache_names);
        assert_eq!(config.resolvers.cache_ttl_ms, 30_000);
        assert_eq!(config.resolvers.cache_max_entries, 10_000);
    }
}

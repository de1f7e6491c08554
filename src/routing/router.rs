//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled matchers alongside the registry
//! - Resolve a location to the best scoring route
//! - Map legacy hrefs back to registry entries
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over compiled matchers (acceptable for typical route counts)
//! - Explicit `None` rather than silent default when nothing matches
//! - Strictly-greater comparison: among equal scores the first registered wins

use std::sync::Arc;

use crate::config::schema::NavigationConfig;
use crate::observability::metrics;
use crate::routing::entry::{MatchMode, RouteEntry};
use crate::routing::location::Location;
use crate::routing::matcher::{self, Matcher, Score};
use crate::routing::registry::{RegistryError, RouteRegistry};

/// Best match for one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRoute<'a> {
    pub route: &'a RouteEntry,
    pub score: Score,
}

/// Route resolver over an immutable registry.
#[derive(Debug)]
pub struct Router {
    registry: Arc<RouteRegistry>,
    matchers: Vec<Box<dyn Matcher>>,
}

impl Router {
    /// Compile matchers for every registry entry.
    pub fn new(registry: Arc<RouteRegistry>) -> Self {
        let matchers = registry.entries().iter().map(matcher::compile).collect();
        Self { registry, matchers }
    }

    /// Build registry and router from a configuration.
    pub fn from_config(config: &NavigationConfig) -> Result<Self, RegistryError> {
        Ok(Self::new(Arc::new(RouteRegistry::from_config(config)?)))
    }

    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Shared handle to the registry.
    pub fn registry_handle(&self) -> Arc<RouteRegistry> {
        Arc::clone(&self.registry)
    }

    /// Resolve a location to the entry with the strictly highest score.
    pub fn resolve(&self, location: &Location) -> Option<ResolvedRoute<'_>> {
        let mut best: Option<ResolvedRoute<'_>> = None;

        for (route, matcher) in self.registry.entries().iter().zip(&self.matchers) {
            let Some(score) = matcher.score(location) else {
                continue;
            };
            if best.map_or(true, |current| score > current.score) {
                best = Some(ResolvedRoute { route, score });
            }
        }

        match &best {
            Some(resolved) => {
                tracing::debug!(
                    location = %location,
                    route = %resolved.route.id,
                    score = %resolved.score,
                    "Location resolved"
                );
                metrics::record_resolution("matched");
            }
            None => {
                tracing::debug!(location = %location, "No route matches location");
                metrics::record_resolution("unmatched");
            }
        }
        best
    }

    /// Find the entry an href points at.
    ///
    /// Scans in registration order: a param entry matches when the pathname
    /// is equal and all declared pairs are present; an exact entry matches
    /// on pathname alone. Prefix entries are never returned.
    pub fn find_by_href(&self, href: &str) -> Option<&RouteEntry> {
        let target = Location::parse(href);

        self.registry.entries().iter().find(|route| {
            route.pathname == target.pathname
                && match route.match_mode {
                    MatchMode::Param => target.query.contains_all(&route.query),
                    MatchMode::Exact => true,
                    MatchMode::Prefix | MatchMode::PrefixNested => false,
                }
        })
    }
}

//! Breadcrumb resolvers.
//!
//! # Data Flow
//! ```text
//! Dynamic route (label = None, resolver = kind)
//!     → BreadcrumbResolvers::resolve(kind, location)
//!     → entity id from the query or the path segment below the route
//!     → EntityStore::display_name (bounded by a timeout, memoised for a TTL)
//!     → Resolution { trail, outcome }
//! ```
//!
//! # Design Decisions
//! - Dispatch is an exhaustive match over `ResolverKind`
//! - The trail is derived from the registry, so a resolver never repeats
//!   labels the route table already owns
//! - Failures never escape: every outcome carries a renderable trail, and
//!   the outcome tells "no such entity" apart from "could not ask"

pub mod store;

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::Serialize;
use tokio::time;

use crate::navigation::breadcrumb::{self, BreadcrumbItem};
use crate::observability::metrics;
use crate::routing::entry::{ResolverKind, RouteEntry};
use crate::routing::location::Location;
use crate::routing::router::Router;

pub use store::{EntityKind, EntityStore, MemoryStore, StoreError};

/// How a resolver run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionOutcome {
    /// Entity found; the leaf carries its name.
    Resolved,
    /// No entity id in the location; the trail stops at the static parents.
    MissingId,
    /// The store answered that the entity does not exist.
    NotFound,
    /// The store failed or timed out. Worth retrying.
    Unavailable,
    /// No route in the registry uses this resolver.
    Unrouted,
}

impl ResolutionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionOutcome::Resolved => "resolved",
            ResolutionOutcome::MissingId => "missing-id",
            ResolutionOutcome::NotFound => "not-found",
            ResolutionOutcome::Unavailable => "unavailable",
            ResolutionOutcome::Unrouted => "unrouted",
        }
    }
}

/// Complete trail from Home to the current page, plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub trail: Vec<BreadcrumbItem>,
    pub outcome: ResolutionOutcome,
}

impl Resolution {
    pub fn is_retryable(&self) -> bool {
        self.outcome == ResolutionOutcome::Unavailable
    }
}

/// Where a resolver finds its entity id.
#[derive(Debug, Clone, Copy)]
enum IdSource {
    Query(&'static str),
    /// First path segment below the owning route's pathname.
    Segment,
    QueryOrSegment(&'static str),
}

#[derive(Debug, Clone, Copy)]
struct ResolverProfile {
    entity: EntityKind,
    id_source: IdSource,
    leaf_id: &'static str,
}

fn resolver_profile(kind: ResolverKind) -> ResolverProfile {
    match kind {
        ResolverKind::ProductEdit | ResolverKind::MerchEdit => ResolverProfile {
            entity: EntityKind::Product,
            id_source: IdSource::QueryOrSegment("id"),
            leaf_id: "product",
        },
        ResolverKind::CategoryView => ResolverProfile {
            entity: EntityKind::Category,
            id_source: IdSource::Query("categoryId"),
            leaf_id: "category",
        },
        ResolverKind::LabelView => ResolverProfile {
            entity: EntityKind::Label,
            id_source: IdSource::Query("labelId"),
            leaf_id: "label",
        },
        ResolverKind::OrderDetail => ResolverProfile {
            entity: EntityKind::Order,
            id_source: IdSource::Segment,
            leaf_id: "order",
        },
    }
}

fn query_id<'l>(location: &'l Location, key: &str) -> Option<&'l str> {
    location.query.get(key).filter(|id| !id.is_empty())
}

fn extract_id<'l>(source: IdSource, location: &'l Location, base: &str) -> Option<&'l str> {
    match source {
        IdSource::Query(key) => query_id(location, key),
        IdSource::Segment => location.segment_after(base),
        IdSource::QueryOrSegment(key) => {
            query_id(location, key).or_else(|| location.segment_after(base))
        }
    }
}

enum Lookup {
    Found(String),
    Missing,
    Failed,
}

type NameKey = (EntityKind, String);

struct CachedName {
    name: String,
    fetched: Instant,
}

/// Names found in the store, kept until they are `ttl` old.
///
/// Holds at most `max_entries` names. When full, expired names are swept
/// and a new name is only stored if that made room.
struct NameCache {
    entries: DashMap<NameKey, CachedName>,
    ttl: Duration,
    max_entries: usize,
}

impl NameCache {
    fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries,
        }
    }

    fn get(&self, key: &NameKey) -> Option<String> {
        let fresh = self
            .entries
            .get(key)
            .and_then(|cached| (cached.fetched.elapsed() < self.ttl).then(|| cached.name.clone()));
        if fresh.is_none() {
            self.entries
                .remove_if(key, |_, cached| cached.fetched.elapsed() >= self.ttl);
        }
        fresh
    }

    fn insert(&self, key: NameKey, name: String) {
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            let ttl = self.ttl;
            self.entries.retain(|_, cached| cached.fetched.elapsed() < ttl);
            if self.entries.len() >= self.max_entries {
                return;
            }
        }
        self.entries.insert(
            key,
            CachedName {
                name,
                fetched: Instant::now(),
            },
        );
    }
}

/// Resolver set sharing one router, store and name cache.
pub struct BreadcrumbResolvers {
    router: Arc<Router>,
    store: Arc<dyn EntityStore>,
    timeout: Duration,
    names: Option<NameCache>,
}

impl BreadcrumbResolvers {
    /// Timeout and caching come from the registry's `[resolvers]` section.
    pub fn new(router: Arc<Router>, store: Arc<dyn EntityStore>) -> Self {
        let config = router.registry().resolver_config();
        let timeout = Duration::from_millis(config.timeout_ms);
        let names = config.cache_names.then(|| {
            NameCache::new(
                Duration::from_millis(config.cache_ttl_ms),
                config.cache_max_entries,
            )
        });
        Self {
            router,
            store,
            timeout,
            names,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override how long a cached name is served. No effect when caching is off.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        if let Some(names) = &mut self.names {
            names.ttl = ttl;
        }
        self
    }

    /// Forget the cached name of one entity, e.g. after it was renamed.
    pub fn invalidate(&self, kind: EntityKind, id: &str) {
        if let Some(names) = &self.names {
            names.entries.remove(&(kind, id.to_string()));
        }
    }

    pub fn clear_cache(&self) {
        if let Some(names) = &self.names {
            names.entries.clear();
        }
    }

    /// Number of names currently held, expired ones included until swept.
    pub fn cached_names(&self) -> usize {
        self.names.as_ref().map_or(0, |names| names.entries.len())
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Trail only, for callers that do not care about the outcome.
    pub async fn trail(&self, kind: ResolverKind, location: &Location) -> Vec<BreadcrumbItem> {
        self.resolve(kind, location).await.trail
    }

    /// Build the full trail for `location` using resolver `kind`.
    pub async fn resolve(&self, kind: ResolverKind, location: &Location) -> Resolution {
        let matched = self.router.resolve(location).map(|resolved| resolved.route);
        self.resolve_matched(kind, location, matched).await
    }

    /// Same as [`resolve`](Self::resolve) for a location the caller has
    /// already matched to `matched`. The location is not scored again.
    pub async fn resolve_matched(
        &self,
        kind: ResolverKind,
        location: &Location,
        matched: Option<&RouteEntry>,
    ) -> Resolution {
        let registry = self.router.registry();
        let profile = resolver_profile(kind);

        let Some((owner, current)) = self.owning_route(kind, matched) else {
            tracing::warn!(resolver = %kind, "No route uses this resolver");
            return self.finish(
                kind,
                Resolution {
                    trail: vec![breadcrumb::home_item(registry)],
                    outcome: ResolutionOutcome::Unrouted,
                },
            );
        };

        let Some(id) = extract_id(profile.id_source, location, &owner.pathname) else {
            tracing::debug!(resolver = %kind, location = %location, "No entity id in location");
            return self.finish(
                kind,
                Resolution {
                    trail: breadcrumb::build_breadcrumb_chain(registry, Some(current)),
                    outcome: ResolutionOutcome::MissingId,
                },
            );
        };

        let labels = registry.breadcrumb_config();
        let (label, outcome) = match self.lookup(profile.entity, id).await {
            Lookup::Found(name) => (name, ResolutionOutcome::Resolved),
            Lookup::Missing => (labels.not_found_label.clone(), ResolutionOutcome::NotFound),
            Lookup::Failed => (labels.unavailable_label.clone(), ResolutionOutcome::Unavailable),
        };

        let leaf = BreadcrumbItem::current(profile.leaf_id, label);
        let trail = breadcrumb::build_chain_with(registry, current, |entry| {
            (entry.id == owner.id).then(|| leaf.clone())
        });
        self.finish(kind, Resolution { trail, outcome })
    }

    /// The dynamic entry using `kind` and the route the trail ends at.
    ///
    /// Prefers the matched route when `kind` sits on its chain; otherwise
    /// the first registered entry using `kind`.
    fn owning_route<'r>(
        &'r self,
        kind: ResolverKind,
        matched: Option<&'r RouteEntry>,
    ) -> Option<(&'r RouteEntry, &'r RouteEntry)> {
        let registry = self.router.registry();

        if let Some(route) = matched {
            let owner = std::iter::successors(Some(route), |e| registry.parent_of(e))
                .take(registry.len())
                .find(|entry| entry.is_dynamic() && entry.resolver == Some(kind));
            if let Some(owner) = owner {
                return Some((owner, route));
            }
        }

        registry.with_resolver(kind).next().map(|owner| (owner, owner))
    }

    async fn lookup(&self, kind: EntityKind, id: &str) -> Lookup {
        let key = (kind, id.to_string());
        if let Some(name) = self.names.as_ref().and_then(|names| names.get(&key)) {
            metrics::record_cache_hit(kind.as_str());
            return Lookup::Found(name);
        }

        match time::timeout(self.timeout, self.store.display_name(kind, id)).await {
            Ok(Ok(Some(name))) => {
                if let Some(names) = &self.names {
                    names.insert(key, name.clone());
                }
                Lookup::Found(name)
            }
            Ok(Ok(None)) => Lookup::Missing,
            Ok(Err(e)) => {
                tracing::warn!(entity = %kind, id = %id, error = %e, "Entity lookup failed");
                Lookup::Failed
            }
            Err(_) => {
                let e = StoreError::Timeout(self.timeout.as_millis() as u64);
                tracing::warn!(entity = %kind, id = %id, error = %e, "Entity lookup failed");
                Lookup::Failed
            }
        }
    }

    fn finish(&self, kind: ResolverKind, resolution: Resolution) -> Resolution {
        tracing::debug!(
            resolver = %kind,
            outcome = resolution.outcome.as_str(),
            segments = resolution.trail.len(),
            "Breadcrumb resolver finished"
        );
        metrics::record_breadcrumb_resolution(kind.as_str(), resolution.outcome.as_str());
        resolution
    }
}

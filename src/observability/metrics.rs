//! Metrics collection.
//!
//! # Metrics
//! - `nav_resolve_total` (counter): location resolutions by outcome
//! - `nav_breadcrumb_resolutions_total` (counter): resolver runs by resolver, outcome
//! - `nav_entity_cache_hits_total` (counter): entity names served from cache by kind
//!
//! # Design Decisions
//! - Low-overhead metric updates
//! - Labels limited to small closed sets (no ids, no paths)

/// Record one `Router::resolve` call.
pub fn record_resolution(outcome: &'static str) {
    ::metrics::counter!("nav_resolve_total", "outcome" => outcome).increment(1);
}

/// Record one breadcrumb resolver run.
pub fn record_breadcrumb_resolution(resolver: &'static str, outcome: &'static str) {
    ::metrics::counter!(
        "nav_breadcrumb_resolutions_total",
        "resolver" => resolver,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record an entity name served from the resolver cache.
pub fn record_cache_hit(kind: &'static str) {
    ::metrics::counter!("nav_entity_cache_hits_total", "kind" => kind).increment(1);
}

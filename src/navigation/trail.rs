//! Per-location breadcrumb state for consumers rendering dynamic trails.
//!
//! # Responsibilities
//! - Publish the static trail immediately on every navigation
//! - Hand out a ticket when a resolver still owes part of the trail
//! - Accept the resolver's result only while its navigation is current
//!
//! # Design Decisions
//! - Readers load an `Arc` snapshot and never block writers
//! - Every navigation bumps a generation; results carrying an older
//!   generation are dropped instead of overwriting a newer trail
//! - Snapshots are swapped with compare-and-swap, retried on contention

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::navigation::breadcrumb::BreadcrumbItem;
use crate::navigation::context::NavigationContext;
use crate::resolvers::{BreadcrumbResolvers, Resolution, ResolutionOutcome};
use crate::routing::entry::ResolverKind;
use crate::routing::location::Location;

/// Where the trail for the current location stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailPhase {
    /// No navigation seen yet.
    Unresolved,
    /// Every segment has a static label.
    Static,
    /// Static trail published; the resolver is still running.
    Pending(ResolverKind),
    /// The resolver supplied the entity name.
    Resolved,
    /// The resolver finished without a name.
    Fallback(ResolutionOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailSnapshot {
    pub generation: u64,
    pub location: Option<Location>,
    pub phase: TrailPhase,
    pub trail: Vec<BreadcrumbItem>,
}

impl TrailSnapshot {
    fn initial() -> Self {
        Self {
            generation: 0,
            location: None,
            phase: TrailPhase::Unresolved,
            trail: Vec::new(),
        }
    }
}

/// Ticket for an outstanding resolver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTrail {
    generation: u64,
    kind: ResolverKind,
    location: Location,
    route_id: Option<String>,
}

impl PendingTrail {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> ResolverKind {
        self.kind
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Route the location was matched to when the ticket was issued.
    pub fn route_id(&self) -> Option<&str> {
        self.route_id.as_deref()
    }
}

#[derive(Debug)]
pub struct TrailTracker {
    snap: ArcSwap<TrailSnapshot>,
    generation: AtomicU64,
}

impl Default for TrailTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TrailTracker {
    pub fn new() -> Self {
        Self {
            snap: ArcSwap::from_pointee(TrailSnapshot::initial()),
            generation: AtomicU64::new(0),
        }
    }

    /// Current trail state.
    pub fn current(&self) -> Arc<TrailSnapshot> {
        self.snap.load_full()
    }

    /// Publish the static trail for a navigation event.
    ///
    /// Returns a ticket when a resolver must still run for this location.
    pub fn navigate(&self, ctx: &NavigationContext<'_>) -> Option<PendingTrail> {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let pending = ctx.pending_resolver();
        let phase = pending.map_or(TrailPhase::Static, TrailPhase::Pending);

        let next = Arc::new(TrailSnapshot {
            generation,
            location: Some(ctx.location().clone()),
            phase,
            trail: ctx.breadcrumbs().to_vec(),
        });

        loop {
            let old = self.snap.load_full();
            if old.generation > generation {
                // A later navigation got in first.
                return None;
            }
            let prev = self.snap.compare_and_swap(&old, Arc::clone(&next));
            if Arc::ptr_eq(&prev, &old) {
                break;
            }
        }

        pending.map(|kind| PendingTrail {
            generation,
            kind,
            location: ctx.location().clone(),
            route_id: ctx.active_route().map(|route| route.id.clone()),
        })
    }

    /// Install a resolver result. Returns `false` when the ticket is stale.
    pub fn complete(&self, pending: &PendingTrail, resolution: Resolution) -> bool {
        let phase = match resolution.outcome {
            ResolutionOutcome::Resolved => TrailPhase::Resolved,
            outcome => TrailPhase::Fallback(outcome),
        };

        loop {
            let old = self.snap.load_full();
            if old.generation != pending.generation || !matches!(old.phase, TrailPhase::Pending(_)) {
                tracing::debug!(
                    location = %pending.location,
                    ticket = pending.generation,
                    current = old.generation,
                    "Discarding stale breadcrumb trail"
                );
                return false;
            }

            let next = Arc::new(TrailSnapshot {
                generation: old.generation,
                location: old.location.clone(),
                phase,
                trail: resolution.trail.clone(),
            });
            let prev = self.snap.compare_and_swap(&old, next);
            if Arc::ptr_eq(&prev, &old) {
                return true;
            }
        }
    }

    /// Run the resolver for `pending` and install its result.
    ///
    /// Reuses the route matched at navigation time instead of resolving the
    /// location again.
    pub async fn resolve_pending(&self, pending: PendingTrail, resolvers: &BreadcrumbResolvers) -> bool {
        let matched = pending
            .route_id
            .as_deref()
            .and_then(|id| resolvers.router().registry().get(id));
        let resolution = resolvers
            .resolve_matched(pending.kind, &pending.location, matched)
            .await;
        self.complete(&pending, resolution)
    }
}

//! Ancestor and active-state calculation.
//!
//! The ancestor set is computed once per navigation event and then queried
//! by every rendered navigation node, so membership is a hash lookup.

use std::collections::HashSet;

use crate::routing::entry::RouteEntry;
use crate::routing::registry::RouteRegistry;

/// Ids reachable by walking a route's parent chain upward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorSet {
    ids: HashSet<String>,
}

impl AncestorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for AncestorSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Collect the ancestors of `route_id`.
///
/// Stops silently at a root, at an unknown id, or when a chain revisits an
/// id; a broken chain yields a partial set rather than an error.
pub fn ancestor_ids(registry: &RouteRegistry, route_id: &str) -> AncestorSet {
    let mut ancestors = AncestorSet::new();
    let mut current = route_id;

    while let Some(parent) = registry.get(current).and_then(|entry| entry.parent.as_deref()) {
        if parent == route_id || !ancestors.ids.insert(parent.to_string()) {
            break;
        }
        current = parent;
    }

    ancestors
}

/// True when `candidate_id` is the active route or one of its ancestors.
pub fn is_route_active(
    candidate_id: &str,
    active: Option<&RouteEntry>,
    ancestors: &AncestorSet,
) -> bool {
    active.is_some_and(|route| route.id == candidate_id || ancestors.contains(candidate_id))
}

/// True when `candidate_id` strictly contains the active route.
///
/// Unlike [`is_route_active`] the active route itself does not count, so a
/// group can be styled as "contains the active item" without being active.
pub fn has_active_descendant(
    candidate_id: &str,
    active: Option<&RouteEntry>,
    ancestors: &AncestorSet,
) -> bool {
    active.is_some() && ancestors.contains(candidate_id)
}

//! Breadcrumb trails and hrefs.
//!
//! # Responsibilities
//! - Walk a route's parent chain into a Home-rooted trail
//! - Build hrefs from a route's pathname and declared query
//! - List navigable children for breadcrumb dropdowns
//!
//! # Design Decisions
//! - Entries without a static label are skipped unless a substitution is
//!   supplied, which is how resolvers splice their dynamic leaf in
//! - The trail is collected leaf-first and reversed once

use serde::Serialize;

use crate::routing::entry::RouteEntry;
use crate::routing::location::encode_query;
use crate::routing::registry::RouteRegistry;

/// Href handed out for entries that are not clickable destinations.
pub const DISABLED_HREF: &str = "#";

/// One segment of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    pub id: String,
    pub label: String,
    /// `None` for the current page and for grouping entries.
    pub href: Option<String>,
}

impl BreadcrumbItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, href: Option<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            href,
        }
    }

    /// Non-clickable item, used for the current page.
    pub fn current(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, None)
    }

    pub fn is_clickable(&self) -> bool {
        self.href.is_some()
    }
}

/// A child destination rendered in a breadcrumb dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

/// Href for `route`: its pathname plus the declared query, if any.
///
/// Grouping entries get [`DISABLED_HREF`].
pub fn build_href(route: &RouteEntry) -> String {
    if !route.navigable {
        return DISABLED_HREF.to_string();
    }
    if route.query.is_empty() {
        route.pathname.clone()
    } else {
        format!("{}?{}", route.pathname, encode_query(&route.query))
    }
}

/// Static trail from Home down to `route`.
///
/// Unmatched locations (`None`) yield the Home item alone. Entries whose
/// label is only known at request time are left out.
pub fn build_breadcrumb_chain(
    registry: &RouteRegistry,
    route: Option<&RouteEntry>,
) -> Vec<BreadcrumbItem> {
    match route {
        Some(route) => build_chain_with(registry, route, |_| None),
        None => vec![home_item(registry)],
    }
}

/// Trail builder with a hook for entries lacking a static label.
///
/// `substitute` is consulted for every unlabeled entry on the chain; returning
/// `None` drops the entry from the trail. A resolver fills in one entry, so
/// validation rejects chains holding more than one unlabeled entry.
pub(crate) fn build_chain_with<F>(
    registry: &RouteRegistry,
    route: &RouteEntry,
    mut substitute: F,
) -> Vec<BreadcrumbItem>
where
    F: FnMut(&RouteEntry) -> Option<BreadcrumbItem>,
{
    let chain = std::iter::successors(Some(route), |entry| registry.parent_of(entry))
        .take(registry.len().max(1));

    let mut trail: Vec<BreadcrumbItem> = chain
        .filter_map(|entry| match &entry.label {
            Some(label) => {
                let href = (entry.id != route.id && entry.navigable).then(|| build_href(entry));
                Some(BreadcrumbItem::new(entry.id.clone(), label.clone(), href))
            }
            None => substitute(entry),
        })
        .collect();
    trail.reverse();

    let home = registry.home();
    if trail.first().map_or(true, |first| first.id != home.id) {
        trail.insert(0, home_item(registry));
    }
    trail
}

/// The canonical Home item every trail starts with.
pub fn home_item(registry: &RouteRegistry) -> BreadcrumbItem {
    let home = registry.home();
    BreadcrumbItem::new(
        home.id.clone(),
        home.label.clone().unwrap_or_default(),
        Some(build_href(home)),
    )
}

/// Navigable, statically labeled children of `route_id` as links.
pub fn navigable_children(registry: &RouteRegistry, route_id: &str) -> Vec<NavLink> {
    registry
        .children_of(route_id)
        .filter(|child| child.navigable)
        .filter_map(|child| {
            child.label.as_ref().map(|label| NavLink {
                label: label.clone(),
                href: build_href(child),
            })
        })
        .collect()
}

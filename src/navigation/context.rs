//! Per-navigation-event context.
//!
//! Resolves the location once, derives the ancestor set and static trail
//! once, and answers every menu query against that snapshot. Consumers pass
//! the context explicitly instead of reaching for shared state.

use crate::navigation::active::{self, AncestorSet};
use crate::navigation::breadcrumb::{self, BreadcrumbItem};
use crate::navigation::views::{self, MenuBuilderView};
use crate::routing::entry::{ResolverKind, RouteEntry};
use crate::routing::location::Location;
use crate::routing::router::{ResolvedRoute, Router};

#[derive(Debug)]
pub struct NavigationContext<'a> {
    router: &'a Router,
    location: Location,
    active: Option<ResolvedRoute<'a>>,
    ancestors: AncestorSet,
    breadcrumbs: Vec<BreadcrumbItem>,
}

impl<'a> NavigationContext<'a> {
    pub fn new(router: &'a Router, location: Location) -> Self {
        let active = router.resolve(&location);
        let registry = router.registry();
        let ancestors = active
            .map(|resolved| active::ancestor_ids(registry, &resolved.route.id))
            .unwrap_or_default();
        let breadcrumbs =
            breadcrumb::build_breadcrumb_chain(registry, active.map(|resolved| resolved.route));

        Self {
            router,
            location,
            active,
            ancestors,
            breadcrumbs,
        }
    }

    /// Build a context from an href such as `/admin/orders?status=open`.
    pub fn for_href(router: &'a Router, href: &str) -> Self {
        Self::new(router, Location::parse(href))
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn resolved(&self) -> Option<ResolvedRoute<'a>> {
        self.active
    }

    pub fn active_route(&self) -> Option<&'a RouteEntry> {
        self.active.map(|resolved| resolved.route)
    }

    pub fn ancestors(&self) -> &AncestorSet {
        &self.ancestors
    }

    /// Static trail for the location. Dynamic segments are absent until a
    /// resolver fills them in.
    pub fn breadcrumbs(&self) -> &[BreadcrumbItem] {
        &self.breadcrumbs
    }

    pub fn is_active(&self, route_id: &str) -> bool {
        active::is_route_active(route_id, self.active_route(), &self.ancestors)
    }

    pub fn has_active_descendant(&self, route_id: &str) -> bool {
        active::has_active_descendant(route_id, self.active_route(), &self.ancestors)
    }

    pub fn is_href_active(&self, href: &str) -> bool {
        views::is_href_active(href, &self.location, self.active_route())
    }

    pub fn menu_builder_view(&self) -> Option<MenuBuilderView> {
        views::menu_builder_view(&self.location)
    }

    /// Resolver owed for the trail: the first unlabeled entry on the chain
    /// from the active route up to its root.
    pub fn pending_resolver(&self) -> Option<ResolverKind> {
        let registry = self.router.registry();
        std::iter::successors(self.active_route(), |entry| registry.parent_of(entry))
            .take(registry.len())
            .find(|entry| entry.is_dynamic())
            .and_then(|entry| entry.resolver)
    }
}

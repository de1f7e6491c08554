//! View-state helpers for pages that encode their tab in the query string.

use std::fmt;

use serde::Serialize;

use crate::routing::entry::RouteEntry;
use crate::routing::location::Location;

/// Pathname of the menu builder page.
pub const MENU_BUILDER_PATH: &str = "/admin/product-menu";

/// Tabs of the menu builder, selected with `?view=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuBuilderView {
    Menu,
    Label,
    Category,
    AllLabels,
    AllCategories,
}

impl MenuBuilderView {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuBuilderView::Menu => "menu",
            MenuBuilderView::Label => "label",
            MenuBuilderView::Category => "category",
            MenuBuilderView::AllLabels => "all-labels",
            MenuBuilderView::AllCategories => "all-categories",
        }
    }

    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "menu" => Some(MenuBuilderView::Menu),
            "label" => Some(MenuBuilderView::Label),
            "category" => Some(MenuBuilderView::Category),
            "all-labels" => Some(MenuBuilderView::AllLabels),
            "all-categories" => Some(MenuBuilderView::AllCategories),
            _ => None,
        }
    }
}

impl fmt::Display for MenuBuilderView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active menu builder tab, `None` when `location` is another page.
///
/// A missing or unrecognised `view` falls back to the menu tab.
pub fn menu_builder_view(location: &Location) -> Option<MenuBuilderView> {
    if location.pathname != MENU_BUILDER_PATH {
        return None;
    }
    Some(
        location
            .query
            .get("view")
            .and_then(MenuBuilderView::from_query_value)
            .unwrap_or(MenuBuilderView::Menu),
    )
}

/// Whether a legacy href points at the current location.
///
/// Every query pair in `href` must be present in `location`; extra keys in
/// the location are ignored. Nothing is active without a resolved route.
pub fn is_href_active(href: &str, location: &Location, active: Option<&RouteEntry>) -> bool {
    if active.is_none() {
        return false;
    }
    let target = Location::parse(href);
    target.pathname == location.pathname
        && target
            .query
            .iter()
            .all(|(key, value)| location.query.get(key) == Some(value))
}

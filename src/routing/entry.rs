//! Route entry definitions.
//!
//! A [`RouteEntry`] is one declarative navigation node. Entries are loaded
//! from configuration once and never change afterwards.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How a location is compared against an entry's pathname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Pathname equality.
    Exact,
    /// Pathname equality or any deeper path below it.
    Prefix,
    /// Only paths with at least one extra segment (detail pages).
    PrefixNested,
    /// Pathname equality plus a required subset of query pairs.
    Param,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Exact => "exact",
            MatchMode::Prefix => "prefix",
            MatchMode::PrefixNested => "prefix-nested",
            MatchMode::Param => "param",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known breadcrumb resolvers.
///
/// Closed set: a route can only name a resolver that exists, and dispatch
/// over it is checked for exhaustiveness at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolverKind {
    /// Coffee product edit page.
    ProductEdit,
    /// Merch product edit page.
    MerchEdit,
    /// Single category in the menu builder.
    CategoryView,
    /// Single label in the menu builder.
    LabelView,
    /// Order detail page.
    OrderDetail,
}

impl ResolverKind {
    pub const ALL: [ResolverKind; 5] = [
        ResolverKind::ProductEdit,
        ResolverKind::MerchEdit,
        ResolverKind::CategoryView,
        ResolverKind::LabelView,
        ResolverKind::OrderDetail,
    ];

    /// Name used in configuration files and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolverKind::ProductEdit => "productEdit",
            ResolverKind::MerchEdit => "merchEdit",
            ResolverKind::CategoryView => "categoryView",
            ResolverKind::LabelView => "labelView",
            ResolverKind::OrderDetail => "orderDetail",
        }
    }
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declarative navigation node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Unique dotted identifier (e.g. `admin.products.edit`).
    /// The dots are documentation only; matching never looks at them.
    pub id: String,

    /// Path this entry matches against.
    pub pathname: String,

    /// Match semantics for `pathname` (and `query` in param mode).
    pub match_mode: MatchMode,

    /// Required query pairs. Only meaningful for [`MatchMode::Param`].
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, String>,

    /// Display label. `None` means the label is only known at request
    /// time and must come from `resolver`.
    #[serde(default)]
    pub label: Option<String>,

    /// Logical parent. `None` marks a root.
    #[serde(default)]
    pub parent: Option<String>,

    /// Clickable destination (`true`) or pure grouping node (`false`).
    #[serde(default = "default_navigable")]
    pub navigable: bool,

    /// Resolver producing the trail when `label` is `None`.
    #[serde(default)]
    pub resolver: Option<ResolverKind>,

    /// Icon name for menu rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

fn default_navigable() -> bool {
    true
}

impl RouteEntry {
    /// Create a navigable, statically labeled root entry.
    pub fn new(
        id: impl Into<String>,
        pathname: impl Into<String>,
        match_mode: MatchMode,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            pathname: pathname.into(),
            match_mode,
            query: BTreeMap::new(),
            label: Some(label.into()),
            parent: None,
            navigable: true,
            resolver: None,
            icon: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Mark the entry as a grouping node.
    pub fn grouping(mut self) -> Self {
        self.navigable = false;
        self
    }

    /// Drop the static label and delegate the trail to `resolver`.
    pub fn dynamic(mut self, resolver: ResolverKind) -> Self {
        self.label = None;
        self.resolver = Some(resolver);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// True when the label must be resolved at request time.
    pub fn is_dynamic(&self) -> bool {
        self.label.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_entry_from_toml() {
        let entry: RouteEntry = toml::from_str(
            r#"
            id = "admin.menu-builder.category"
            pathname = "/admin/product-menu"
            match_mode = "param"
            query = { view = "category" }
            parent = "admin.menu-builder.all-categories"
            resolver = "categoryView"
            "#,
        )
        .unwrap();

        assert_eq!(entry.match_mode, MatchMode::Param);
        assert_eq!(entry.query.get("view").map(String::as_str), Some("category"));
        assert_eq!(entry.resolver, Some(ResolverKind::CategoryView));
        assert!(entry.label.is_none());
        assert!(entry.navigable);
        assert!(!entry.is_root());
    }

    #[test]
    fn test_match_mode_names() {
        let entry: RouteEntry = toml::from_str(
            r#"
            id = "admin.orders.detail"
            pathname = "/admin/orders"
            match_mode = "prefix-nested"
            label = "Order"
            navigable = false
            "#,
        )
        .unwrap();
        assert_eq!(entry.match_mode, MatchMode::PrefixNested);
        assert_eq!(entry.match_mode.to_string(), "prefix-nested");
        assert!(!entry.navigable);
    }

    #[test]
    fn test_unknown_resolver_rejected() {
        let result: Result<RouteEntry, _> = toml::from_str(
            r#"
            id = "x"
            pathname = "/x"
            match_mode = "exact"
            resolver = "prodcutEdit"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_helpers() {
        let entry = RouteEntry::new("admin.orders.detail", "/admin/orders", MatchMode::PrefixNested, "Order")
            .with_parent("admin.orders.all")
            .dynamic(ResolverKind::OrderDetail);
        assert!(entry.is_dynamic());
        assert_eq!(entry.parent.as_deref(), Some("admin.orders.all"));
        assert_eq!(ResolverKind::OrderDetail.as_str(), "orderDetail");
    }
}

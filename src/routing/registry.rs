//! Route registry.
//!
//! # Responsibilities
//! - Own the validated route table in registration order
//! - O(1) lookup by id, precomputed child lists
//! - Expose the canonical Home entry
//!
//! # Design Decisions
//! - Built once from a validated config, read-only afterwards
//! - Construction fails on any validation error instead of degrading silently
//! - Indices into the entry vector keep the table in one allocation

use std::collections::HashMap;

use thiserror::Error;

use crate::config::schema::{BreadcrumbConfig, NavigationConfig, ResolverConfig, TieBreak};
use crate::config::validation::{join_errors, validate_config, ValidationError};
use crate::routing::entry::{ResolverKind, RouteEntry};

/// Error building a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid route table: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

/// Immutable, validated route table.
#[derive(Debug)]
pub struct RouteRegistry {
    entries: Vec<RouteEntry>,
    by_id: HashMap<String, usize>,
    children: HashMap<String, Vec<usize>>,
    home: usize,
    tie_break: TieBreak,
    breadcrumbs: BreadcrumbConfig,
    resolvers: ResolverConfig,
}

impl RouteRegistry {
    /// Validate `config` and build the registry from it.
    pub fn from_config(config: &NavigationConfig) -> Result<Self, RegistryError> {
        validate_config(config).map_err(RegistryError::Invalid)?;

        let entries = config.routes.clone();
        let by_id: HashMap<String, usize> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.id.clone(), index))
            .collect();

        let mut children: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, entry) in entries.iter().enumerate() {
            if let Some(parent) = &entry.parent {
                children.entry(parent.clone()).or_default().push(index);
            }
        }

        let home = by_id
            .get(&config.breadcrumbs.home)
            .copied()
            .ok_or_else(|| {
                RegistryError::Invalid(vec![ValidationError::UnknownHome {
                    id: config.breadcrumbs.home.clone(),
                }])
            })?;

        let registry = Self {
            entries,
            by_id,
            children,
            home,
            tie_break: config.matching.tie_break,
            breadcrumbs: config.breadcrumbs.clone(),
            resolvers: config.resolvers.clone(),
        };

        tracing::info!(
            routes = registry.entries.len(),
            groups = registry.top_level_groups().count(),
            tie_break = ?registry.tie_break,
            "Route registry built"
        );
        Ok(registry)
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&RouteEntry> {
        self.by_id.get(id).map(|&index| &self.entries[index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Parent entry of `entry`, `None` for roots.
    pub fn parent_of(&self, entry: &RouteEntry) -> Option<&RouteEntry> {
        entry.parent.as_deref().and_then(|id| self.get(id))
    }

    /// Direct children of `parent_id`, in registration order.
    pub fn children_of<'a>(&'a self, parent_id: &str) -> impl Iterator<Item = &'a RouteEntry> + 'a {
        self.children
            .get(parent_id)
            .into_iter()
            .flatten()
            .map(move |&index| &self.entries[index])
    }

    /// All entries, in registration order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Clickable entries.
    pub fn navigable(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter().filter(|entry| entry.navigable)
    }

    /// Roots that only group other entries (menu sections).
    pub fn top_level_groups(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.is_root() && !entry.navigable)
    }

    /// Entries delegating their trail to `kind`.
    pub fn with_resolver(&self, kind: ResolverKind) -> impl Iterator<Item = &RouteEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.resolver == Some(kind))
    }

    /// The canonical Home entry every breadcrumb trail starts with.
    pub fn home(&self) -> &RouteEntry {
        &self.entries[self.home]
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn breadcrumb_config(&self) -> &BreadcrumbConfig {
        &self.breadcrumbs
    }

    pub fn resolver_config(&self) -> &ResolverConfig {
        &self.resolvers
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::entry::MatchMode;

    fn registry() -> RouteRegistry {
        RouteRegistry::from_config(&NavigationConfig::with_routes(vec![
            RouteEntry::new("admin", "/admin", MatchMode::Exact, "Home"),
            RouteEntry::new("admin.pages", "/admin/pages", MatchMode::Prefix, "Pages").grouping(),
            RouteEntry::new("admin.pages.about", "/admin/pages/about", MatchMode::Exact, "About")
                .with_parent("admin.pages"),
            RouteEntry::new("admin.pages.faq", "/admin/pages/faq", MatchMode::Exact, "FAQ")
                .with_parent("admin.pages")
                .grouping(),
        ]))
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let registry = registry();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("admin.pages.about").unwrap().label.as_deref(), Some("About"));
        assert!(registry.get("admin.nope").is_none());
        assert_eq!(registry.home().id, "admin");
    }

    #[test]
    fn test_children_and_groups() {
        let registry = registry();
        let children: Vec<_> = registry.children_of("admin.pages").map(|e| e.id.as_str()).collect();
        assert_eq!(children, vec!["admin.pages.about", "admin.pages.faq"]);
        assert_eq!(registry.children_of("admin.pages.about").count(), 0);

        let groups: Vec<_> = registry.top_level_groups().map(|e| e.id.as_str()).collect();
        assert_eq!(groups, vec!["admin.pages"]);

        let navigable: Vec<_> = registry.navigable().map(|e| e.id.as_str()).collect();
        assert_eq!(navigable, vec!["admin", "admin.pages.about"]);
    }

    #[test]
    fn test_parent_of() {
        let registry = registry();
        let about = registry.get("admin.pages.about").unwrap();
        assert_eq!(registry.parent_of(about).map(|e| e.id.as_str()), Some("admin.pages"));
        assert!(registry.parent_of(registry.home()).is_none());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let err = RouteRegistry::from_config(&NavigationConfig::with_routes(vec![
            RouteEntry::new("admin", "/admin", MatchMode::Exact, "Home"),
            RouteEntry::new("admin.x", "/admin/x", MatchMode::Exact, "X").with_parent("admin.y"),
        ]))
        .unwrap_err();

        let RegistryError::Invalid(errors) = err;
        assert_eq!(
            errors,
            vec![ValidationError::UnknownParent {
                id: "admin.x".into(),
                parent: "admin.y".into()
            }]
        );
    }
}

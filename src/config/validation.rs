//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (parents and Home reference existing routes)
//! - Reject parent cycles so every chain ends at a root
//! - Allow at most one unlabeled route per parent chain
//! - Detect route pairs that can tie for the best score
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: NavigationConfig → Result<(), Vec<ValidationError>>
//! - Runs before a registry is built from the config

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::config::schema::{NavigationConfig, TieBreak};
use crate::routing::entry::{MatchMode, RouteEntry};
use crate::routing::matcher;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty id")]
    EmptyId { index: usize },

    #[error("duplicate route id `{id}`")]
    DuplicateId { id: String },

    #[error("route `{id}` has invalid pathname `{pathname}`")]
    InvalidPathname { id: String, pathname: String },

    #[error("route `{id}` references unknown parent `{parent}`")]
    UnknownParent { id: String, parent: String },

    #[error("route `{id}` is part of a parent cycle")]
    ParentCycle { id: String },

    #[error("param route `{id}` declares no query parameters")]
    MissingQuery { id: String },

    #[error("route `{id}` declares query parameters but uses {mode} matching")]
    UnexpectedQuery { id: String, mode: MatchMode },

    #[error("route `{id}` has no label and no resolver")]
    UnresolvableLabel { id: String },

    #[error("unlabeled route `{id}` has unlabeled ancestor `{ancestor}`")]
    NestedDynamic { id: String, ancestor: String },

    #[error("home route `{id}` does not exist")]
    UnknownHome { id: String },

    #[error("home route `{id}` must be a navigable, labeled root")]
    InvalidHome { id: String },

    #[error("routes `{first}` and `{second}` can match the same location with equal score")]
    AmbiguousMatch { first: String, second: String },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &NavigationConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let routes = &config.routes;

    let mut by_id: HashMap<&str, &RouteEntry> = HashMap::with_capacity(routes.len());
    for (index, route) in routes.iter().enumerate() {
        if route.id.is_empty() {
            errors.push(ValidationError::EmptyId { index });
            continue;
        }
        if by_id.insert(route.id.as_str(), route).is_some() {
            errors.push(ValidationError::DuplicateId {
                id: route.id.clone(),
            });
        }
    }

    for route in routes {
        if !is_valid_pathname(&route.pathname) {
            errors.push(ValidationError::InvalidPathname {
                id: route.id.clone(),
                pathname: route.pathname.clone(),
            });
        }

        match (route.match_mode, route.query.is_empty()) {
            (MatchMode::Param, true) => errors.push(ValidationError::MissingQuery {
                id: route.id.clone(),
            }),
            (MatchMode::Param, false) | (_, true) => {}
            (mode, false) => errors.push(ValidationError::UnexpectedQuery {
                id: route.id.clone(),
                mode,
            }),
        }

        if route.label.is_none() && route.resolver.is_none() {
            errors.push(ValidationError::UnresolvableLabel {
                id: route.id.clone(),
            });
        }

        if let Some(parent) = &route.parent {
            if !by_id.contains_key(parent.as_str()) {
                errors.push(ValidationError::UnknownParent {
                    id: route.id.clone(),
                    parent: parent.clone(),
                });
            }
        }
    }

    errors.extend(find_cycles(routes, &by_id));
    errors.extend(find_nested_dynamic(routes, &by_id));

    let home = &config.breadcrumbs.home;
    match by_id.get(home.as_str()) {
        None => errors.push(ValidationError::UnknownHome { id: home.clone() }),
        Some(route) if !route.navigable || route.label.is_none() || !route.is_root() => {
            errors.push(ValidationError::InvalidHome { id: home.clone() })
        }
        Some(_) => {}
    }

    if config.matching.tie_break == TieBreak::Reject {
        errors.extend(find_ambiguities(routes));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Render a list of errors on one line.
pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_valid_pathname(pathname: &str) -> bool {
    pathname == "/"
        || (pathname.starts_with('/')
            && !pathname.ends_with('/')
            && !pathname.contains(['?', '#']))
}

/// Report each route whose parent chain revisits a route.
fn find_cycles(routes: &[RouteEntry], by_id: &HashMap<&str, &RouteEntry>) -> Vec<ValidationError> {
    let mut cyclic = Vec::new();
    for route in routes {
        let mut seen = HashSet::new();
        let mut current = route;
        seen.insert(current.id.as_str());
        while let Some(parent) = current.parent.as_deref().and_then(|p| by_id.get(p).copied()) {
            if parent.id == route.id {
                cyclic.push(ValidationError::ParentCycle {
                    id: route.id.clone(),
                });
                break;
            }
            // A cycle further up is reported for its own members.
            if !seen.insert(parent.id.as_str()) {
                break;
            }
            current = parent;
        }
    }
    cyclic
}

/// Report each unlabeled route with an unlabeled ancestor.
fn find_nested_dynamic(
    routes: &[RouteEntry],
    by_id: &HashMap<&str, &RouteEntry>,
) -> Vec<ValidationError> {
    let mut nested = Vec::new();
    for route in routes.iter().filter(|r| r.is_dynamic()) {
        let mut seen = HashSet::from([route.id.as_str()]);
        let mut current = route;
        while let Some(parent) = current.parent.as_deref().and_then(|p| by_id.get(p).copied()) {
            if !seen.insert(parent.id.as_str()) {
                break;
            }
            if parent.is_dynamic() {
                nested.push(ValidationError::NestedDynamic {
                    id: route.id.clone(),
                    ancestor: parent.id.clone(),
                });
                break;
            }
            current = parent;
        }
    }
    nested
}

fn find_ambiguities(routes: &[RouteEntry]) -> Vec<ValidationError> {
    let compiled: Vec<_> = routes.iter().map(matcher::compile).collect();
    let mut errors = Vec::new();
    for (i, first) in compiled.iter().enumerate() {
        for (j, second) in compiled.iter().enumerate().skip(i + 1) {
            if matcher::can_tie(first.as_ref(), second.as_ref()) {
                errors.push(ValidationError::AmbiguousMatch {
                    first: routes[i].id.clone(),
                    second: routes[j].id.clone(),
                });
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::entry::ResolverKind;

    fn base_routes() -> Vec<RouteEntry> {
        vec![
            RouteEntry::new("admin", "/admin", MatchMode::Exact, "Home"),
            RouteEntry::new("admin.orders", "/admin/orders", MatchMode::Prefix, "Orders").grouping(),
            RouteEntry::new("admin.orders.all", "/admin/orders", MatchMode::Exact, "All Orders")
                .with_parent("admin.orders"),
            RouteEntry::new("admin.orders.detail", "/admin/orders", MatchMode::PrefixNested, "Order")
                .with_parent("admin.orders.all")
                .dynamic(ResolverKind::OrderDetail),
        ]
    }

    fn validate(routes: Vec<RouteEntry>) -> Result<(), Vec<ValidationError>> {
        validate_config(&NavigationConfig::with_routes(routes))
    }

    #[test]
    fn test_valid_config() {
        assert_eq!(validate(base_routes()), Ok(()));
    }

    #[test]
    fn test_duplicate_and_dangling() {
        let mut routes = base_routes();
        routes.push(RouteEntry::new("admin.orders.all", "/admin/orders/x", MatchMode::Exact, "Dup"));
        routes.push(
            RouteEntry::new("admin.pages.faq", "/admin/pages/faq", MatchMode::Exact, "FAQ")
                .with_parent("admin.pages"),
        );

        let errors = validate(routes).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateId {
            id: "admin.orders.all".into()
        }));
        assert!(errors.contains(&ValidationError::UnknownParent {
            id: "admin.pages.faq".into(),
            parent: "admin.pages".into()
        }));
    }

    #[test]
    fn test_parent_cycle() {
        let mut routes = base_routes();
        routes.push(RouteEntry::new("a", "/a", MatchMode::Exact, "A").with_parent("b"));
        routes.push(RouteEntry::new("b", "/b", MatchMode::Exact, "B").with_parent("a"));

        let errors = validate(routes).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ParentCycle { id: "a".into() },
                ValidationError::ParentCycle { id: "b".into() },
            ]
        );
    }

    #[test]
    fn test_query_rules() {
        let mut routes = base_routes();
        routes.push(RouteEntry::new("p", "/p", MatchMode::Param, "P"));
        routes.push(RouteEntry::new("q", "/q", MatchMode::Exact, "Q").with_query("view", "x"));

        let errors = validate(routes).unwrap_err();
        assert!(errors.contains(&ValidationError::MissingQuery { id: "p".into() }));
        assert!(errors.contains(&ValidationError::UnexpectedQuery {
            id: "q".into(),
            mode: MatchMode::Exact
        }));
    }

    #[test]
    fn test_pathname_rules() {
        let mut routes = base_routes();
        routes.push(RouteEntry::new("x", "admin/x", MatchMode::Exact, "X"));
        routes.push(RouteEntry::new("y", "/admin/y/", MatchMode::Exact, "Y"));

        let errors = validate(routes).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ValidationError::InvalidPathname { .. })));
    }

    #[test]
    fn test_label_without_resolver() {
        let mut routes = base_routes();
        let mut entry = RouteEntry::new("z", "/z", MatchMode::Exact, "Z");
        entry.label = None;
        routes.push(entry);

        let errors = validate(routes).unwrap_err();
        assert_eq!(errors, vec![ValidationError::UnresolvableLabel { id: "z".into() }]);
    }

    #[test]
    fn test_unlabeled_route_below_unlabeled_route() {
        let mut routes = base_routes();
        routes.push(
            RouteEntry::new("admin.orders.detail.items", "/admin/orders/items", MatchMode::Exact, "Items")
                .with_parent("admin.orders.detail"),
        );
        assert_eq!(validate(routes.clone()), Ok(()));

        routes.push(
            RouteEntry::new("admin.orders.detail.item", "/admin/orders/items", MatchMode::PrefixNested, "Item")
                .with_parent("admin.orders.detail.items")
                .dynamic(ResolverKind::ProductEdit),
        );
        assert_eq!(
            validate(routes).unwrap_err(),
            vec![ValidationError::NestedDynamic {
                id: "admin.orders.detail.item".into(),
                ancestor: "admin.orders.detail".into()
            }]
        );
    }

    #[test]
    fn test_home_rules() {
        let mut config = NavigationConfig::with_routes(base_routes());
        config.breadcrumbs.home = "missing".into();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::UnknownHome { id: "missing".into() }]
        );

        config.breadcrumbs.home = "admin.orders".into();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidHome {
                id: "admin.orders".into()
            }]
        );
    }

    #[test]
    fn test_ambiguity_policy() {
        let mut routes = base_routes();
        routes.push(
            RouteEntry::new("admin.dashboard.overview", "/admin", MatchMode::Exact, "Overview"),
        );
        let mut config = NavigationConfig::with_routes(routes);

        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::AmbiguousMatch {
                first: "admin".into(),
                second: "admin.dashboard.overview".into()
            }]
        );

        config.matching.tie_break = TieBreak::RegistrationOrder;
        assert_eq!(validate_config(&config), Ok(()));
    }
}

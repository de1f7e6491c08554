//! Admin navigation engine: route resolution, active state and breadcrumbs.

pub mod config;
pub mod navigation;
pub mod observability;
pub mod resolvers;
pub mod routing;

pub use config::schema::NavigationConfig;
pub use navigation::{BreadcrumbItem, NavigationContext, TrailTracker};
pub use resolvers::{BreadcrumbResolvers, EntityStore, Resolution, ResolutionOutcome};
pub use routing::{Location, RouteEntry, RouteRegistry, Router};

//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation event (Location)
//!     → context.rs (resolve once, derive ancestors and static trail)
//!     → active.rs (active / has-active-descendant per menu node)
//!     → breadcrumb.rs (Home-rooted trail, hrefs, dropdown children)
//!     → trail.rs (publish trail, await resolver for dynamic segments)
//! ```
//!
//! # Design Decisions
//! - Everything except `trail.rs` is synchronous and side-effect free
//! - The context is passed explicitly to every query
//! - Unmatched locations degrade to a Home-only trail and no active node

pub mod active;
pub mod breadcrumb;
pub mod context;
pub mod trail;
pub mod views;

pub use active::{ancestor_ids, has_active_descendant, is_route_active, AncestorSet};
pub use breadcrumb::{
    build_breadcrumb_chain, build_href, navigable_children, BreadcrumbItem, NavLink, DISABLED_HREF,
};
pub use context::NavigationContext;
pub use trail::{PendingTrail, TrailPhase, TrailSnapshot, TrailTracker};
pub use views::{menu_builder_view, MenuBuilderView};

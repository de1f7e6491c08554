//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation event (pathname, query)
//!     → location.rs (parse into Location)
//!     → router.rs (score every entry)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: ResolvedRoute or None
//!
//! Route Compilation (at startup):
//!     RouteEntry[] (validated config)
//!     → registry.rs (id index, child index, Home)
//!     → Compile one matcher per entry
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (equality and segment-aware prefix checks only)
//! - Deterministic: same input always matches same route
//! - Highest score wins; ties either rejected at build time or first-registered

pub mod entry;
pub mod location;
pub mod matcher;
pub mod registry;
pub mod router;

pub use entry::{MatchMode, ResolverKind, RouteEntry};
pub use location::{Location, QueryParams};
pub use matcher::Score;
pub use registry::{RegistryError, RouteRegistry};
pub use router::{ResolvedRoute, Router};

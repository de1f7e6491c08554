//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or embedded admin table
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → NavigationConfig (validated, immutable)
//!     → RouteRegistry built once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All sections have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    BreadcrumbConfig, MatchingConfig, NavigationConfig, ObservabilityConfig, ResolverConfig,
    TieBreak,
};
pub use validation::{validate_config, ValidationError};

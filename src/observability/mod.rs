//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → Log output (stdout, human-readable or JSON lines)
//!     → Whatever metrics recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - The library never installs a global recorder or subscriber itself
//! - Metrics are cheap (no-ops without a recorder)

pub mod logging;
pub mod metrics;

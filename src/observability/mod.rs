//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing   → debug: route registered, prefix normalized
//!           → warn:  path that can never match under its prefix
//! dispatch  → debug: route matched / no route matched
//! binaries  → info:  startup, listening address, shutdown
//!     ↓
//! logging.rs (tracing-subscriber registry: EnvFilter + fmt layer)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is the binary's job
//! - `RUST_LOG` overrides the default directive
//! - The method guard emits nothing: a 405 is a normal outcome

pub mod logging;

pub use logging::init_logging;

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! routes.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, every error at once)
//!     → ManifestConfig
//!     → build_router() (construct Router, register each route in order)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal manifests
//! - Validation separates syntactic (serde) from semantic checks
//! - Registration failures keep the index of the offending route

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_manifest, parse_manifest};
pub use schema::{HandlerKind, ManifestConfig, RouteConfig, RouterConfig};
pub use validation::{validate_config, ValidationError};

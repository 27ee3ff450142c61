//! Host dispatcher binding.
//!
//! # Data Flow
//! ```text
//! Router ──mount──▶ Include { prefix, namespace, [UrlPattern] }
//!                        │
//!                        ▼
//! UrlConf::include  (compile prefix + pattern to an anchored regex)
//!     → resolve("/api/articles/7/")   → endpoint + kwargs + name
//!     → reverse("blog:article", args) → "/api/articles/7/"
//!     → into_router()                 → axum::Router (fallback dispatch)
//! ```
//!
//! # Design Decisions
//! - Patterns are tried in registration order; first match wins
//! - Converters both shape the match and canonicalize captured values
//! - Compiled once; resolution holds no mutable state

pub mod include;
pub mod resolver;
pub mod server;

pub use include::{mount, Include, UrlPattern};
pub use resolver::{ResolvedRoute, UrlConf};
pub use server::PathParams;

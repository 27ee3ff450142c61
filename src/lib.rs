//! Declarative route registration in front of a host URL dispatcher.
//!
//! # Architecture Overview
//!
//! ```text
//!   call site                        ┌──────────────────────────────────────────┐
//!   router.route(path)               │                 routing                   │
//!         .name(..) .methods(..)     │                                           │
//!         .handler(h) ──────────────▶│  prefix/trailing slash ─▶ pattern engine  │
//!                                    │          │                    │           │
//!                                    │          ▼                    ▼           │
//!                                    │    name inference        method guard     │
//!                                    │          └──────┬─────────────┘           │
//!                                    │                 ▼                          │
//!                                    │          Vec<RouteEntry>                   │
//!                                    └─────────────────┬──────────────────────────┘
//!                                                      │ mount
//!                                                      ▼
//!                                    ┌──────────────────────────────────────────┐
//!                                    │                dispatch                   │
//!   HTTP request ───────────────────▶│  UrlConf: resolve / reverse / axum bridge │
//!                                    └──────────────────────────────────────────┘
//! ```
//!
//! ```
//! use routify::{mount, FunctionHandler, Router, UrlConf};
//!
//! let mut router = Router::builder("api").auto_trailing_slash(true).build()?;
//! router
//!     .get("books/<int:id>")
//!     .handler(FunctionHandler::new("get_book", |_req| async { "book" }))?;
//!
//! assert_eq!(router.routes()[0].path(), "books/<int:id>/");
//! assert_eq!(router.routes()[0].name(), Some("get_book"));
//!
//! let conf = UrlConf::new().with(mount(&router))?;
//! assert_eq!(conf.reverse("get_book", &[("id", "7")])?, "/api/books/7/");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core
pub mod guard;
pub mod handler;
pub mod pattern;
pub mod routing;

// Host binding
pub mod dispatch;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod observability;

pub use dispatch::{mount, Include, PathParams, UrlConf, UrlPattern};
pub use error::{ConfigurationError, ManifestError, RegistrationError, ReverseError};
pub use guard::HttpMethod;
pub use handler::{Endpoint, FunctionHandler, Handler, HandlerBundle, ParamTypes, SegmentType};
pub use pattern::{DynamicPattern, PatternEngine};
pub use routing::{RouteEntry, Router, RouterOptions};

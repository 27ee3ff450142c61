//! Route table subsystem.
//!
//! # Data Flow
//! ```text
//! router.route(path).name(..).methods(..).handler(h)
//!     → prefix: lazily normalized with the first handler that needs it
//!     → path: trailing-slash policy, "/" collapse, pattern engine
//!     → name: explicit, or inferred from the handler identifier
//!     → methods: validated, handler wrapped by the method guard
//!     → RouteEntry appended, (possibly guarded) handler returned
//!
//! mount(&router)
//!     → Include { prefix, namespace, patterns } for the host dispatcher
//! ```
//!
//! # Design Decisions
//! - Registration is the only mutation; the table is read-only afterwards
//! - A failed registration leaves both the table and the prefix untouched
//! - Deterministic: the same calls in the same order yield the same table

pub mod entry;
pub mod naming;
pub mod registration;
pub mod router;

pub use entry::{RouteEntry, RouteSummary};
pub use naming::infer_name;
pub use registration::Registration;
pub use router::{Router, RouterBuilder, RouterOptions};

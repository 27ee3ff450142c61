//! Handler identities.
//!
//! # Responsibilities
//! - Represent what a route points at: a plain function or a per-verb bundle
//! - Carry the declared segment types used by the pattern engine
//! - Produce the dispatch endpoint handed to the host dispatcher
//!
//! # Design Decisions
//! - Segment types are declared explicitly by the caller, never discovered
//! - Handlers are cheap to clone; wrapping returns a new value and leaves
//!   earlier registrations of the same handler untouched

pub mod bundle;
pub mod endpoint;
pub mod types;

use std::future::Future;

use axum::body::Body;
use axum::http::Request;
use axum::response::IntoResponse;

pub use bundle::{BundleMethod, HandlerBundle};
pub use endpoint::{Endpoint, ResponseFuture};
pub use types::{ParamTypes, SegmentType};

use crate::guard::MethodGuard;

/// A single callable handling every method routed to it.
#[derive(Debug, Clone)]
pub struct FunctionHandler {
    name: String,
    params: ParamTypes,
    endpoint: Endpoint,
}

impl FunctionHandler {
    /// Create a function handler with the given identifier (e.g. `get_book`).
    pub fn new<F, Fut, R>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        Self::from_endpoint(name, Endpoint::new(f))
    }

    pub fn from_endpoint(name: impl Into<String>, endpoint: Endpoint) -> Self {
        Self {
            name: name.into(),
            params: ParamTypes::new(),
            endpoint,
        }
    }

    /// Declare the type of one parameter.
    pub fn param(mut self, name: impl Into<String>, ty: impl Into<SegmentType>) -> Self {
        self.params.insert(name, ty);
        self
    }

    /// Replace all declared parameter types.
    pub fn params(mut self, params: ParamTypes) -> Self {
        self.params = params;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_types(&self) -> &ParamTypes {
        &self.params
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

/// Anything a route can be registered against.
#[derive(Debug, Clone)]
pub enum Handler {
    Function(FunctionHandler),
    Bundle(HandlerBundle),
}

impl Handler {
    /// Declared identifier of the handler.
    pub fn name(&self) -> &str {
        match self {
            Handler::Function(f) => f.name(),
            Handler::Bundle(b) => b.name(),
        }
    }

    pub fn is_bundle(&self) -> bool {
        matches!(self, Handler::Bundle(_))
    }

    /// Declared type of `segment`, defaulting to a slug.
    pub fn param_type(&self, segment: &str) -> SegmentType {
        match self {
            Handler::Function(f) => f.params.get(segment).cloned().unwrap_or_default(),
            Handler::Bundle(b) => b.param_type(segment),
        }
    }

    /// The entry point the host dispatcher calls.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Handler::Function(f) => f.endpoint.clone(),
            Handler::Bundle(b) => b.as_view(),
        }
    }

    /// Attach a method guard. Bundles guard their dispatcher, functions their body.
    pub(crate) fn with_guard(self, guard: MethodGuard) -> Self {
        match self {
            Handler::Function(mut f) => {
                f.endpoint = guard.wrap(f.endpoint);
                Handler::Function(f)
            }
            Handler::Bundle(mut b) => {
                b.push_guard(guard);
                Handler::Bundle(b)
            }
        }
    }
}

impl From<FunctionHandler> for Handler {
    fn from(f: FunctionHandler) -> Self {
        Handler::Function(f)
    }
}

impl From<HandlerBundle> for Handler {
    fn from(b: HandlerBundle) -> Self {
        Handler::Bundle(b)
    }
}

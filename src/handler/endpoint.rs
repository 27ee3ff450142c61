//! Type-erased request handlers.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

/// Future returned by every endpoint.
pub type ResponseFuture = BoxFuture<'static, Response>;

/// A reference-counted async handler the dispatcher can invoke.
///
/// Cloning is cheap; clones share the same underlying function.
#[derive(Clone)]
pub struct Endpoint(Arc<dyn Fn(Request<Body>) -> ResponseFuture + Send + Sync>);

impl Endpoint {
    /// Wrap an async function returning anything that converts into a response.
    pub fn new<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        Self(Arc::new(move |req: Request<Body>| -> ResponseFuture {
            let fut = f(req);
            Box::pin(async move { fut.await.into_response() })
        }))
    }

    /// Wrap a function that already produces a boxed response future.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Request<Body>) -> ResponseFuture + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the endpoint.
    pub fn call(&self, req: Request<Body>) -> ResponseFuture {
        (self.0)(req)
    }

    /// True if both endpoints share the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Endpoint(..)")
    }
}

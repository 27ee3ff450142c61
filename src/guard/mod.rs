//! Method guard.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     ["get", "POST"]
//!     → validate (upper-case, reject anything outside the allowed set)
//!     → MethodGuard
//!     → wrap handler (bundle: its dispatcher, function: its body)
//!
//! Request:
//!     method in allow-list → delegate to the wrapped endpoint
//!     otherwise            → 405 with `Allow` header, endpoint not invoked
//! ```
//!
//! # Design Decisions
//! - Validation happens once at registration; an unknown verb is fatal there
//! - Order and duplicates are preserved as given
//! - The guard holds only its immutable allow-list, so concurrent calls are safe

pub mod method;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::{ready, FutureExt};

pub use method::HttpMethod;

use crate::error::RegistrationResult;
use crate::handler::{Endpoint, Handler};

/// Normalize an allow-list: upper-case each entry and reject unknown verbs.
pub fn validate<I, S>(methods: I) -> RegistrationResult<Vec<HttpMethod>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    methods
        .into_iter()
        .map(|m| m.as_ref().parse::<HttpMethod>())
        .collect()
}

/// Restrict `handler` to `methods`. An empty list means no restriction.
pub fn wrap(handler: Handler, methods: &[HttpMethod]) -> Handler {
    if methods.is_empty() {
        return handler;
    }
    handler.with_guard(MethodGuard::new(methods.to_vec()))
}

/// The host's standard 405 response.
pub fn method_not_allowed<I, S>(allowed: I) -> Response
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let allow = allowed
        .into_iter()
        .map(|m| m.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, allow)]).into_response()
}

/// Rejects requests whose method is not in a fixed allow-list.
#[derive(Debug, Clone)]
pub struct MethodGuard {
    allowed: Arc<[HttpMethod]>,
}

impl MethodGuard {
    pub fn new(allowed: Vec<HttpMethod>) -> Self {
        Self {
            allowed: allowed.into(),
        }
    }

    pub fn allowed(&self) -> &[HttpMethod] {
        &self.allowed
    }

    pub fn allows(&self, method: &Method) -> bool {
        self.allowed.iter().any(|m| m.as_str() == method.as_str())
    }

    /// Return an endpoint that checks the method before calling `inner`.
    pub fn wrap(&self, inner: Endpoint) -> Endpoint {
        let guard = self.clone();
        Endpoint::from_fn(move |req: Request<Body>| {
            if guard.allows(req.method()) {
                inner.call(req)
            } else {
                ready(method_not_allowed(guard.allowed.iter())).boxed()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistrationError;
    use crate::handler::FunctionHandler;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request(method: Method) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri("/")
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_validate_normalizes_case() {
        let methods = validate(["get", "POST"]).unwrap();
        assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Post]);
    }

    #[test]
    fn test_validate_keeps_duplicates_and_order() {
        let methods = validate(["post", "get", "POST"]).unwrap();
        assert_eq!(
            methods,
            vec![HttpMethod::Post, HttpMethod::Get, HttpMethod::Post]
        );
    }

    #[test]
    fn test_validate_rejects_head() {
        let err = validate(["head"]).unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::InvalidMethod { ref method, .. } if method == "HEAD"
        ));
    }

    #[test]
    fn test_validate_empty() {
        let methods = validate(Vec::<String>::new()).unwrap();
        assert!(methods.is_empty());
    }

    #[tokio::test]
    async fn test_guard_blocks_before_invocation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let handler: Handler = FunctionHandler::new("index", move |_req| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { "index" }
        })
        .into();

        let guarded = wrap(handler, &[HttpMethod::Get]).endpoint();

        let response = guarded.call(request(Method::POST)).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET");
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let response = guarded.call(request(Method::GET)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_list_does_not_wrap() {
        let handler: Handler = FunctionHandler::new("index", |_req| async { "index" }).into();
        let endpoint = handler.endpoint();
        let unwrapped = wrap(handler, &[]).endpoint();
        assert!(endpoint.ptr_eq(&unwrapped));
    }
}

//! axum bridge.
//!
//! Every request lands in one fallback handler, which resolves the path
//! against the [`UrlConf`] and calls the matched endpoint with the captured
//! segments attached as a [`PathParams`] extension.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::dispatch::resolver::UrlConf;

/// Captured path segments of the resolved route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(pub BTreeMap<String, String>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Segments attached to `req` by the dispatcher, if any.
    pub fn of(req: &Request<Body>) -> Option<&PathParams> {
        req.extensions().get::<PathParams>()
    }
}

impl UrlConf {
    /// Serve this configuration as an axum router.
    pub fn into_router(self) -> axum::Router {
        axum::Router::new()
            .fallback(dispatch)
            .with_state(Arc::new(self))
    }
}

/// Resolve the request path and invoke the matched endpoint; 404 otherwise.
pub async fn dispatch(State(conf): State<Arc<UrlConf>>, mut req: Request<Body>) -> Response {
    let Some(resolved) = conf.resolve(req.uri().path()) else {
        tracing::debug!(path = %req.uri().path(), "No route matched");
        return StatusCode::NOT_FOUND.into_response();
    };

    let route = resolved.view_name();
    tracing::debug!(
        path = %req.uri().path(),
        route = route.as_deref().unwrap_or("-"),
        "Route matched"
    );
    req.extensions_mut().insert(PathParams(resolved.kwargs));
    resolved.endpoint.call(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::include::mount;
    use crate::handler::FunctionHandler;
    use crate::routing::Router;
    use tower::ServiceExt;

    fn app() -> axum::Router {
        let mut router = Router::new("api/").unwrap();
        let book = FunctionHandler::new("get_book", |req: Request<Body>| async move {
            let id = PathParams::of(&req)
                .and_then(|p| p.get("id"))
                .unwrap_or_default()
                .to_string();
            format!("book {id}")
        });
        router.get("books/<int:id>/").handler(book).unwrap();
        let author = FunctionHandler::new("author", |req: Request<Body>| async move {
            let name = PathParams::of(&req)
                .and_then(|p| p.get("name"))
                .unwrap_or_default()
                .to_string();
            format!("author {name}")
        });
        router.get("authors/<str:name>/").handler(author).unwrap();
        UrlConf::new().with(mount(&router)).unwrap().into_router()
    }

    async fn send(method: &str, uri: &str) -> Response {
        app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_resolved_request_gets_params() {
        let response = send("GET", "/api/books/042/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"book 42");
    }

    #[tokio::test]
    async fn test_params_are_percent_decoded() {
        let response = send("GET", "/api/authors/Camus%20%C3%A9/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], "author Camus é".as_bytes());
    }

    #[tokio::test]
    async fn test_unresolved_is_404() {
        assert_eq!(send("GET", "/api/books/x/").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(send("GET", "/nowhere").await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_guard_applies_through_bridge() {
        let response = send("POST", "/api/books/1/").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}

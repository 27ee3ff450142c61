//! Shared handler fixtures and request helpers for integration tests.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use routify::{FunctionHandler, HandlerBundle, HttpMethod, ParamTypes, PathParams};
use tower::ServiceExt;

pub const ARTICLE_UUID: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

fn param(req: &Request<Body>, name: &str) -> String {
    PathParams::of(req)
        .and_then(|p| p.get(name))
        .unwrap_or_default()
        .to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn redirect(to: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, to)]).into_response()
}

/// `home`: plain function.
pub fn home() -> FunctionHandler {
    FunctionHandler::new("home", |_req| async { "Hello, World!" })
}

/// `HomeRedirectView`: redirects to the home page.
pub fn home_redirect_view() -> HandlerBundle {
    HandlerBundle::new("HomeRedirectView")
        .on(HttpMethod::Get, |_req| async { redirect("/test/home/") })
}

/// `HelloNameView`: greets the captured `name`.
pub fn hello_name_view() -> HandlerBundle {
    HandlerBundle::new("HelloNameView").on_with(
        HttpMethod::Get,
        ParamTypes::new().with("name", "str"),
        |req: Request<Body>| async move { format!("Hello, {}!", capitalize(&param(&req, "name"))) },
    )
}

/// `get_book(TYPE: str, book: str)`.
pub fn get_book() -> FunctionHandler {
    FunctionHandler::new("get_book", |req: Request<Body>| async move {
        format!("TYPE: {}\nBook \"{}\"", param(&req, "TYPE"), param(&req, "book"))
    })
    .param("TYPE", "str")
    .param("book", "str")
}

/// `ArticleView.get(TYPE: str, user_id: int, article_uuid: Uuid)`.
pub fn article_view() -> HandlerBundle {
    HandlerBundle::new("ArticleView").on_with(
        HttpMethod::Get,
        ParamTypes::new()
            .with("TYPE", "str")
            .with("user_id", "i64")
            .with("article_uuid", "uuid::Uuid"),
        |req: Request<Body>| async move {
            format!(
                "TYPE: {}\nUser ID: {}\nArticle UUID: {}",
                param(&req, "TYPE"),
                param(&req, "user_id"),
                param(&req, "article_uuid")
            )
        },
    )
}

/// `RedirectToBookView`: no verb declares `TYPE`, the explicit map does.
pub fn redirect_to_book_view() -> HandlerBundle {
    HandlerBundle::new("RedirectToBookView")
        .parameters(ParamTypes::new().with("TYPE", "str"))
        .on(HttpMethod::Get, |_req| async { redirect("/something/books/alphabet/") })
}

/// Bundle defining exactly the given verbs, each answering its own name.
pub fn method_view(name: &str, verbs: &[HttpMethod]) -> HandlerBundle {
    verbs
        .iter()
        .fold(HandlerBundle::new(name), |bundle, verb| {
            let label = format!("{verb} method");
            bundle.on(*verb, move |_req| {
                let label = label.clone();
                async move { label }
            })
        })
}

pub async fn send(app: &axum::Router, method: Method, uri: &str) -> Response {
    app.clone()
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

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

//! routify demo server.
//!
//! Registers a small example table under `example/` and serves it through
//! the axum bridge.
//!
//! ```text
//! GET /example/                 index            (function)
//! GET /example/async/           async            (function, explicit name)
//! GET /example/redirect/        generic_redirect (bundle, GET only)
//! GET /example/<slug:name>/     hello            (bundle)
//! ```

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use routify::observability::init_logging;
use routify::{mount, FunctionHandler, HandlerBundle, HttpMethod, PathParams, Router, UrlConf};

const DEFAULT_ADDR: &str = "127.0.0.1:8000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging("routify=debug,tower_http=debug")?;

    tracing::info!("routify v{} starting", env!("CARGO_PKG_VERSION"));

    let router = example_router()?;
    tracing::info!(
        prefix = router.prefix(),
        routes = router.routes().len(),
        "Example router registered"
    );

    let app = UrlConf::new()
        .with(mount(&router))?
        .into_router()
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = std::env::var("ROUTIFY_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn example_router() -> Result<Router, Box<dyn std::error::Error>> {
    let mut router = Router::builder("example/")
        .namespace("example_app")
        .build()?;

    router.route("").handler(FunctionHandler::new("index", |_req| async {
        "<h2>Index page</h2><p>This is the index view</p>"
    }))?;

    router
        .route("async/")
        .name("async")
        .handler(FunctionHandler::new("async_view", |_req| async {
            axum::Json(serde_json::json!({
                "title": "Async page",
                "content": "This is an async view",
            }))
        }))?;

    router
        .get("redirect/")
        .handler(HandlerBundle::new("GenericRedirectView").on(HttpMethod::Get, |_req| async {
            (StatusCode::FOUND, [(header::LOCATION, "/example/world/")]).into_response()
        }))?;

    router.route("<slug:name>/").handler(
        HandlerBundle::new("HelloView").on(HttpMethod::Get, |req: Request<Body>| async move {
            let name = PathParams::of(&req)
                .and_then(|p| p.get("name"))
                .unwrap_or("stranger")
                .to_string();
            format!("<h2>Hello page</h2><p>Hello, <b>{name}</b>!</p>")
        }),
    )?;

    Ok(router)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

//! Manifest-driven registration, from TOML file to served table.

use std::fs;
use std::path::PathBuf;

use axum::http::{Method, StatusCode};
use routify::config::{load_manifest, ValidationError};
use routify::{mount, ConfigurationError, ManifestError, UrlConf};

mod common;

const MANIFEST: &str = r#"
[router]
prefix = "/api"
namespace = "blog"
auto_trailing_slash = true
dynamic_pattern = "brace"

[[routes]]
path = "/articles/{user_id}/{article_uuid}"
handler = "ArticleView"
kind = "bundle"
verbs = ["GET", "DELETE"]
params = { user_id = "int", article_uuid = "uuid" }

[[routes]]
path = "books/{book}"
handler = "get_book"
name = "book"
methods = ["get"]

[[routes]]
path = "/"
handler = "index"
"#;

fn write_manifest(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("routify-{}-{name}.toml", std::process::id()));
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_manifest_builds_normalized_table() {
    let path = write_manifest("table", MANIFEST);
    let manifest = load_manifest(&path).unwrap();
    fs::remove_file(&path).unwrap();

    let router = manifest.build_router().unwrap();
    assert_eq!(router.prefix(), "api/");
    assert_eq!(router.namespace(), Some("blog"));

    let summaries: Vec<_> = router.routes().iter().map(|r| r.summary()).collect();
    assert_eq!(summaries[0].path, "articles/<int:user_id>/<uuid:article_uuid>/");
    assert_eq!(summaries[0].name.as_deref(), Some("article"));
    assert_eq!(summaries[0].kind, "bundle");
    assert_eq!(summaries[1].path, "books/<slug:book>/");
    assert_eq!(summaries[1].name.as_deref(), Some("book"));
    assert_eq!(summaries[2].path, "");
    assert_eq!(summaries[2].name.as_deref(), Some("index"));
}

#[tokio::test]
async fn test_placeholder_handlers_answer_501() {
    let router = routify::config::parse_manifest(MANIFEST)
        .unwrap()
        .build_router()
        .unwrap();
    let app = UrlConf::new().with(mount(&router)).unwrap().into_router();

    let uri = format!("/api/articles/1/{}/", common::ARTICLE_UUID);
    let response = common::send(&app, Method::DELETE, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    assert_eq!(
        common::body_string(response).await,
        "ArticleView is declared but not implemented"
    );

    let response = common::send(&app, Method::PUT, &uri).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = common::send(&app, Method::POST, "/api/books/dune/").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = common::send(&app, Method::GET, "/api/").await;
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
}

#[test]
fn test_invalid_manifest_reports_every_error() {
    let path = write_manifest(
        "invalid",
        r#"
        [router]
        namespace = "a:b"

        [[routes]]
        path = "a/"
        handler = ""

        [[routes]]
        path = "b/"
        handler = "b"
        methods = ["TRACE"]
        "#,
    );
    let result = load_manifest(&path);
    fs::remove_file(&path).unwrap();

    match result {
        Err(ConfigurationError::Validation(errors)) => {
            assert_eq!(errors.len(), 3);
            assert!(matches!(
                errors[0],
                ValidationError::InvalidNamespace { ref namespace, .. } if namespace == "a:b"
            ));
            assert_eq!(errors[1], ValidationError::EmptyHandler { index: 0 });
            assert!(matches!(errors[2], ValidationError::UnknownMethod { index: 1, .. }));
        }
        other => panic!("expected validation errors, got {other:?}"),
    }
}

#[test]
fn test_registration_error_carries_index() {
    let manifest = routify::config::parse_manifest(
        r#"
        [[routes]]
        path = "ok/"
        handler = "ok"

        [[routes]]
        path = "bad/<float:x>/"
        handler = "bad"
        "#,
    )
    .unwrap();

    let err = manifest.build_router().unwrap_err();
    assert!(matches!(err, ManifestError::Registration { index: 1, .. }));
    assert!(err.to_string().starts_with("routes[1] (bad): Invalid pattern"));
}

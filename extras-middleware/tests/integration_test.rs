//! Integration tests for extras-middleware

use base64::{Engine, engine::general_purpose::STANDARD};
use extras_core::{
    HandlerFn, HttpRequest, HttpResponse, MiddlewareChain, Session, SessionHandle, SessionStore,
    handler,
};
use extras_middleware::*;
use serde_json::json;
use std::time::Duration;

fn ok_handler() -> HandlerFn {
    handler(|_req: HttpRequest| async move { Ok(HttpResponse::ok().with_text("welcome")) })
}

fn basic(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
}

fn basic_chain() -> MiddlewareChain {
    let mut chain = MiddlewareChain::new();
    chain.use_middleware(BasicAuthMiddleware::new(
        "Staff Only",
        StaticCredentials::new().with_user("admin", "hunter2"),
    ));
    chain
}

fn form_chain() -> MiddlewareChain {
    let mut chain = MiddlewareChain::new();
    chain.use_middleware(
        FormAuthMiddleware::new(
            FormAuthConfig::default()
                .with_login_url("/login")
                .with_session_key("user_id")
                .secure("/admin/")
                .secure("/login"),
        )
        .unwrap(),
    );
    chain
}

fn session() -> SessionHandle {
    SessionHandle::new(Session::start(Duration::from_secs(600)))
}

#[tokio::test]
async fn test_basic_auth_accepts_valid_credentials() {
    let req = HttpRequest::new("GET", "/reports")
        .with_header("Authorization", basic("admin", "hunter2"));
    let response = basic_chain().apply(req, ok_handler()).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body_text(), "welcome");
}

#[tokio::test]
async fn test_basic_auth_challenges() {
    let cases = [
        None,
        Some(basic("admin", "wrong")),
        Some(basic("admin", "")),
        Some("Bearer token".to_string()),
    ];

    for authorization in cases {
        let mut req = HttpRequest::new("GET", "/reports");
        if let Some(value) = &authorization {
            req = req.with_header("Authorization", value.clone());
        }

        let response = basic_chain().apply(req, ok_handler()).await.unwrap();
        assert_eq!(response.status, 401, "{authorization:?}");
        assert_eq!(
            response.header("WWW-Authenticate").map(String::as_str),
            Some("Basic realm=\"Staff Only\"")
        );
        assert!(response.body.is_empty());
    }
}

#[tokio::test]
async fn test_form_auth_redirects_anonymous() {
    let req = HttpRequest::new("GET", "/admin").with_session(session());
    let response = form_chain().apply(req, ok_handler()).await.unwrap();

    assert_eq!(response.status, 302);
    assert_eq!(response.header("Location").map(String::as_str), Some("/login"));
}

#[tokio::test]
async fn test_form_auth_redirects_without_session() {
    let req = HttpRequest::new("GET", "/admin/");
    let response = form_chain().apply(req, ok_handler()).await.unwrap();
    assert_eq!(response.status, 302);
}

#[tokio::test]
async fn test_form_auth_allows_logged_in() {
    let mut handle = session();
    handle.set("user_id", json!(7));

    let req = HttpRequest::new("GET", "/admin/").with_session(handle);
    let response = form_chain().apply(req, ok_handler()).await.unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_form_auth_never_redirects_login_page() {
    let req = HttpRequest::new("GET", "/login").with_session(session());
    let response = form_chain().apply(req, ok_handler()).await.unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_form_auth_ignores_public_paths() {
    let req = HttpRequest::new("GET", "/about").with_session(session());
    let response = form_chain().apply(req, ok_handler()).await.unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_jsonp_wraps_after_auth() {
    let mut chain = basic_chain();
    chain.use_middleware(JsonpMiddleware::new());

    let req = HttpRequest::new("GET", "/reports")
        .with_query("callback", "show")
        .with_header("Authorization", basic("admin", "hunter2"));
    let response = chain.apply(req, ok_handler()).await.unwrap();

    assert_eq!(response.body_text(), "show(welcome)");
    assert_eq!(
        response.header("Content-Type").map(String::as_str),
        Some("application/javascript")
    );
}

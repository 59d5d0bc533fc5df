use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::startup::build_app;
use server::ServerState;
use service::auth::password::PasswordHashing;
use service::auth::AuthConfig;

fn build_test_app() -> Router {
    build_app(ServerState::new(AuthConfig { hashing: PasswordHashing::low_cost(), ..Default::default() }))
}

async fn post_json(app: &Router, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
    post_raw(app, uri, Some("application/json"), serde_json::to_vec(&body)?).await
}

async fn post_raw(app: &Router, uri: &str, content_type: Option<&str>, body: Vec<u8>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method("POST").uri(uri);
    if let Some(ct) = content_type {
        req = req.header("content-type", ct);
    }
    let resp = app.clone().oneshot(req.body(Body::from(body))?).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn test_register_and_login_flow() -> anyhow::Result<()> {
    let app = build_test_app();

    let (status, body) = post_json(&app, "/player/register", json!({"username": "newuser", "password": "newpass123"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": true, "msg": "Registration successful."}));

    let (status, body) = post_json(&app, "/player/login", json!({"username": "newuser", "password": "newpass123"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], true);
    assert_eq!(body["msg"], "Login successful.");
    assert_eq!(body["user"]["username"], "newuser");
    Ok(())
}

#[tokio::test]
async fn test_register_rejects_short_username() -> anyhow::Result<()> {
    let app = build_test_app();
    let (status, body) = post_json(&app, "/player/register", json!({"username": "a", "password": "a"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"result": false, "msg": "Username must be between 5 and 15 characters."}));
    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_conflicts() -> anyhow::Result<()> {
    let app = build_test_app();
    let (status, _) = post_json(&app, "/player/register", json!({"username": "testuser", "password": "testpass123"})).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(&app, "/player/register", json!({"username": "testuser", "password": "testpass123"})).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["msg"], "Username already exists");
    Ok(())
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_user() -> anyhow::Result<()> {
    let app = build_test_app();
    post_json(&app, "/player/register", json!({"username": "testuser", "password": "testpass123"})).await?;

    let (status, wrong) = post_json(&app, "/player/login", json!({"username": "testuser", "password": "wrongpass"})).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, unknown) = post_json(&app, "/player/login", json!({"username": "ghostuser", "password": "wrongpass"})).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(wrong, unknown);
    assert_eq!(wrong["msg"], "Username or password incorrect");
    Ok(())
}

#[tokio::test]
async fn test_login_missing_password() -> anyhow::Result<()> {
    let app = build_test_app();
    let (status, body) = post_json(&app, "/player/login", json!({"username": "testuser"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Password is required and must be a string.");
    Ok(())
}

#[tokio::test]
async fn test_non_string_fields_get_field_message() -> anyhow::Result<()> {
    let app = build_test_app();
    let (status, body) = post_json(&app, "/player/register", json!({"username": 42, "password": "newpass123"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"result": false, "msg": "Username is required and must be a string."}));

    let (status, body) = post_json(&app, "/player/login", json!({"username": "newuser", "password": false})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"result": false, "msg": "Password is required and must be a string."}));
    Ok(())
}

#[tokio::test]
async fn test_unreadable_bodies_are_malformed() -> anyhow::Result<()> {
    let app = build_test_app();
    let malformed = json!({"result": false, "msg": "Malformed request"});

    let (status, body) = post_raw(&app, "/player/register", Some("application/json"), b"not json".to_vec()).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, malformed);

    let (status, body) = post_raw(&app, "/player/login", None, br#"{"username":"newuser","password":"x"}"#.to_vec()).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, malformed);

    let (status, body) = post_json(&app, "/player/login", json!(["newuser", "newpass123"])).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, malformed);
    Ok(())
}

#[tokio::test]
async fn test_health_and_metrics() -> anyhow::Result<()> {
    let app = build_test_app();
    let resp = app.clone().oneshot(Request::builder().uri("/health").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    assert_eq!(serde_json::from_slice::<Value>(&bytes)?, json!({"status": "ok"}));

    post_json(&app, "/player/register", json!({"username": "a", "password": "a"})).await?;
    let resp = app.clone().oneshot(Request::builder().uri("/metrics").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(resp.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("lobby_auth_requests_total"));
    Ok(())
}

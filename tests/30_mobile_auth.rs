mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn register_reports_first_missing_field() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/mobile/auth/register", server.base_url))
        .json(&json!({}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "email is required");

    Ok(())
}

#[tokio::test]
async fn register_rejects_unknown_role() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Self-registration may not mint administrators
    let res = client
        .post(format!("{}/mobile/auth/register", server.base_url))
        .json(&json!({
            "email": "eve@example.com",
            "password": "secret",
            "name": "Eve",
            "role": "ADMINISTRATOR"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body.get("error").is_some(), "missing 'error': {}", body);

    Ok(())
}

#[tokio::test]
async fn mobile_login_validates_before_touching_the_database() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/mobile/auth/login", server.base_url))
        .json(&json!({ "email": "a@b.c" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "password is required");

    Ok(())
}

#[tokio::test]
async fn verify_without_token_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/mobile/auth/verify", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body.get("error").is_some(), "missing 'error': {}", body);

    Ok(())
}

#[tokio::test]
async fn verify_rejects_a_garbage_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/mobile/auth/verify", server.base_url))
        .header("Authorization", "Bearer not-a-jwt")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn verify_rejects_non_bearer_schemes() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/mobile/auth/verify", server.base_url))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn mobile_courses_require_a_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/mobile/courses", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

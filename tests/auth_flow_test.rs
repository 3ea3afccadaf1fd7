mod common;

use common::{bearer, json_body, register_and_login, setup_client};
use poem::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_login_and_verify() {
    let (cli, _app_data) = setup_client().await;

    let (token, user_id) = register_and_login(&cli, "alice").await;

    let resp = cli
        .post("/api/verify-token")
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = json_body(resp).await;

    assert_eq!(body["valid"], json!(true));
    assert_eq!(body["user_id"].as_i64(), Some(user_id));
    assert_eq!(body["username"], json!("alice"));
}

#[tokio::test]
async fn test_login_response_shape() {
    let (cli, _app_data) = setup_client().await;
    register_and_login(&cli, "alice").await;

    let resp = cli
        .post("/api/login")
        .body_json(&json!({ "username": "alice", "password": "password" }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = json_body(resp).await;

    assert_eq!(body["token_type"], json!("Bearer"));
    assert_eq!(body["expires_in"], json!(86400));
    assert_eq!(body["user"]["username"], json!("alice"));
    assert_eq!(body["user"]["email"], json!("alice@example.com"));
}

#[tokio::test]
async fn test_register_duplicate_username_is_rejected() {
    let (cli, _app_data) = setup_client().await;
    register_and_login(&cli, "alice").await;

    let resp = cli
        .post("/api/register")
        .body_json(&json!({
            "username": "alice",
            "email": "other@example.com",
            "password": "password",
        }))
        .send()
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], json!("duplicate_username"));
}

#[tokio::test]
async fn test_register_duplicate_email_ignores_case() {
    let (cli, _app_data) = setup_client().await;
    register_and_login(&cli, "alice").await;

    let resp = cli
        .post("/api/register")
        .body_json(&json!({
            "username": "bob",
            "email": "ALICE@Example.com",
            "password": "password",
        }))
        .send()
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], json!("duplicate_email"));
}

#[tokio::test]
async fn test_register_missing_field_is_rejected() {
    let (cli, _app_data) = setup_client().await;

    let resp = cli
        .post("/api/register")
        .body_json(&json!({ "username": "alice", "password": "password" }))
        .send()
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_user_look_the_same() {
    let (cli, _app_data) = setup_client().await;
    register_and_login(&cli, "alice").await;

    let wrong_password = cli
        .post("/api/login")
        .body_json(&json!({ "username": "alice", "password": "nope" }))
        .send()
        .await;
    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    let wrong_password = json_body(wrong_password).await;

    let unknown_user = cli
        .post("/api/login")
        .body_json(&json!({ "username": "nobody", "password": "password" }))
        .send()
        .await;
    unknown_user.assert_status(StatusCode::UNAUTHORIZED);
    let unknown_user = json_body(unknown_user).await;

    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn test_protected_route_without_token_is_unauthorized() {
    let (cli, _app_data) = setup_client().await;

    cli.get("/api/user/profile")
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    cli.post("/api/verify-token")
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_token_gets_json_error_body() {
    let (cli, _app_data) = setup_client().await;

    let resp = cli.get("/api/user/profile").send().await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "unauthorized");
    assert_eq!(body["status_code"], 401);

    let resp = cli
        .delete("/api/cocktails/1")
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await["error"], "unauthorized");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let (cli, _app_data) = setup_client().await;

    let resp = cli
        .post("/api/verify-token")
        .header("Authorization", bearer("not.a.jwt"))
        .send()
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await["error"], json!("invalid_token"));
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let (cli, app_data) = setup_client().await;
    let (_token, user_id) = register_and_login(&cli, "alice").await;

    let issued_at = chrono::Utc::now().timestamp() - 25 * 3600;
    let stale = app_data
        .token_service
        .generate_jwt_at(user_id as i32, issued_at)
        .unwrap();

    let resp = cli
        .get("/api/user/profile")
        .header("Authorization", bearer(&stale))
        .send()
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
}

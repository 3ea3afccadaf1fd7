mod common;

use common::{bearer, create_cocktail, create_review, json_body, register_and_login, setup_client};
use poem::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_review_appears_on_cocktail_and_profile() {
    let (cli, _app_data) = setup_client().await;
    let (token, _) = register_and_login(&cli, "alice").await;
    let cocktail_id = create_cocktail(&cli, &token, "Negroni", &["Gin", "Campari"]).await;

    create_review(&cli, &token, cocktail_id, "Bitter and bright", 4).await;

    let cocktail = json_body(cli.get(format!("/api/cocktails/{}", cocktail_id)).send().await).await;
    assert_eq!(cocktail["reviews"][0]["user"], json!("alice"));
    assert_eq!(cocktail["reviews"][0]["rating"], json!(4));

    let profile = json_body(
        cli.get("/api/user/profile")
            .header("Authorization", bearer(&token))
            .send()
            .await,
    )
    .await;
    assert_eq!(profile["username"], json!("alice"));
    assert_eq!(profile["reviews"][0]["cocktail_name"], json!("Negroni"));
    assert_eq!(profile["reviews"][0]["content"], json!("Bitter and bright"));
}

#[tokio::test]
async fn test_review_rating_out_of_range_is_rejected() {
    let (cli, _app_data) = setup_client().await;
    let (token, _) = register_and_login(&cli, "alice").await;
    let cocktail_id = create_cocktail(&cli, &token, "Negroni", &["Gin"]).await;

    for rating in [0, 6] {
        cli.post(format!("/api/cocktails/{}/reviews", cocktail_id))
            .header("Authorization", bearer(&token))
            .body_json(&json!({ "content": "Hmm", "rating": rating }))
            .send()
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_review_for_missing_cocktail_is_not_found() {
    let (cli, _app_data) = setup_client().await;
    let (token, _) = register_and_login(&cli, "alice").await;

    cli.post("/api/cocktails/42/reviews")
        .header("Authorization", bearer(&token))
        .body_json(&json!({ "content": "Ghost drink", "rating": 3 }))
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_the_author_may_change_a_review() {
    let (cli, _app_data) = setup_client().await;
    let (alice, _) = register_and_login(&cli, "alice").await;
    let (bob, _) = register_and_login(&cli, "bob").await;
    let cocktail_id = create_cocktail(&cli, &alice, "Negroni", &["Gin"]).await;
    let review_id = create_review(&cli, &alice, cocktail_id, "Great", 5).await;

    cli.put(format!("/api/reviews/{}", review_id))
        .header("Authorization", bearer(&bob))
        .body_json(&json!({ "rating": 1 }))
        .send()
        .await
        .assert_status(StatusCode::FORBIDDEN);

    cli.delete(format!("/api/reviews/{}", review_id))
        .header("Authorization", bearer(&bob))
        .send()
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let updated = cli
        .put(format!("/api/reviews/{}", review_id))
        .header("Authorization", bearer(&alice))
        .body_json(&json!({ "rating": 3 }))
        .send()
        .await;
    updated.assert_status_is_ok();
    let updated = json_body(updated).await;
    assert_eq!(updated["rating"], json!(3));
    assert_eq!(updated["content"], json!("Great"));

    cli.delete(format!("/api/reviews/{}", review_id))
        .header("Authorization", bearer(&alice))
        .send()
        .await
        .assert_status_is_ok();

    cli.delete(format!("/api/reviews/{}", review_id))
        .header("Authorization", bearer(&alice))
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_cocktail_removes_its_reviews() {
    let (cli, _app_data) = setup_client().await;
    let (token, _) = register_and_login(&cli, "alice").await;
    let cocktail_id = create_cocktail(&cli, &token, "Negroni", &["Gin"]).await;
    let review_id = create_review(&cli, &token, cocktail_id, "Great", 5).await;

    cli.delete(format!("/api/cocktails/{}", cocktail_id))
        .header("Authorization", bearer(&token))
        .send()
        .await
        .assert_status_is_ok();

    cli.get(format!("/api/cocktails/{}", cocktail_id))
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    cli.put(format!("/api/reviews/{}", review_id))
        .header("Authorization", bearer(&token))
        .body_json(&json!({ "rating": 1 }))
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Ingredients outlive the cocktails that used them
    let ingredients = json_body(cli.get("/api/ingredients").send().await).await;
    assert_eq!(ingredients[0]["name"], json!("Gin"));
}

#[tokio::test]
async fn test_deleting_account_removes_reviews_but_keeps_cocktails() {
    let (cli, _app_data) = setup_client().await;
    let (alice, _) = register_and_login(&cli, "alice").await;
    let (bob, _) = register_and_login(&cli, "bob").await;
    let cocktail_id = create_cocktail(&cli, &alice, "Negroni", &["Gin"]).await;
    create_review(&cli, &alice, cocktail_id, "Alice likes it", 5).await;
    create_review(&cli, &bob, cocktail_id, "Bob likes it", 4).await;

    cli.delete("/api/user/profile")
        .header("Authorization", bearer(&alice))
        .send()
        .await
        .assert_status_is_ok();

    let cocktail = json_body(cli.get(format!("/api/cocktails/{}", cocktail_id)).send().await).await;
    assert_eq!(cocktail["reviews"].as_array().map(Vec::len), Some(1));
    assert_eq!(cocktail["reviews"][0]["user"], json!("bob"));

    cli.post("/api/login")
        .body_json(&json!({ "username": "alice", "password": "password" }))
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    cli.post("/api/verify-token")
        .header("Authorization", bearer(&alice))
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_update_changes_login_and_checks_uniqueness() {
    let (cli, _app_data) = setup_client().await;
    let (alice, _) = register_and_login(&cli, "alice").await;
    register_and_login(&cli, "bob").await;

    cli.put("/api/user/profile")
        .header("Authorization", bearer(&alice))
        .body_json(&json!({ "username": "bob" }))
        .send()
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    cli.put("/api/user/profile")
        .header("Authorization", bearer(&alice))
        .body_json(&json!({ "email": "Alice.New@Example.com", "password": "new-password" }))
        .send()
        .await
        .assert_status_is_ok();

    let profile = json_body(
        cli.get("/api/user/profile")
            .header("Authorization", bearer(&alice))
            .send()
            .await,
    )
    .await;
    assert_eq!(profile["email"], json!("alice.new@example.com"));

    cli.post("/api/login")
        .body_json(&json!({ "username": "alice", "password": "new-password" }))
        .send()
        .await
        .assert_status_is_ok();
}

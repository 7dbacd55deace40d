mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_shorten_creates_link() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/links")
        .json(&json!({ "longUrl": "example.com/page" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "created");
    assert_eq!(json["longUrl"], "http://example.com/page");
    assert_eq!(json["token"].as_str().unwrap().len(), 6);
}

#[tokio::test]
async fn test_shorten_same_url_returns_existing_token() {
    let server = common::create_test_server(common::create_test_state());

    let first = server
        .post("/links")
        .json(&json!({ "longUrl": "https://example.com" }))
        .await
        .json::<Value>();

    let response = server
        .post("/links")
        .json(&json!({ "longUrl": "https://example.com", "customToken": "ignored" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "already_exists");
    assert_eq!(json["token"], first["token"]);

    let list = server.get("/links").await.json::<Value>();
    assert_eq!(list["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_shorten_with_custom_token() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/links")
        .json(&json!({ "longUrl": "https://example.com", "customToken": "promo" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["token"], "promo");
}

#[tokio::test]
async fn test_shorten_blank_custom_token_generates_one() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/links")
        .json(&json!({ "longUrl": "https://example.com", "customToken": "  " }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["token"].as_str().unwrap().len(), 6);
}

#[tokio::test]
async fn test_shorten_custom_token_taken() {
    let server = common::create_test_server(common::create_test_state());

    server
        .post("/links")
        .json(&json!({ "longUrl": "https://one.com", "customToken": "promo" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/links")
        .json(&json!({ "longUrl": "https://two.com", "customToken": "promo" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "token_taken");
    assert_eq!(json["error"]["message"], "Custom token already exists");
    assert!(json["error"]["detail"].as_str().unwrap().contains("promo"));
}

#[tokio::test]
async fn test_shorten_too_short() {
    let server = common::create_test_server(common::create_test_state());

    let response = server.post("/links").json(&json!({ "longUrl": "" })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "too_short");
}

#[tokio::test]
async fn test_shorten_invalid_format() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/links")
        .json(&json!({ "longUrl": "https://exa mple.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "invalid_format");
    assert_eq!(json["error"]["message"], "Invalid URL format");
}

#[tokio::test]
async fn test_shorten_url_over_size_limit() {
    let server = common::create_test_server(common::create_test_state());
    let long_url = format!("https://example.com/{}", "a".repeat(9000));

    let response = server
        .post("/links")
        .json(&json!({ "longUrl": long_url }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_format");
}

#[tokio::test]
async fn test_shorten_disallowed_custom_token() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/links")
        .json(&json!({ "longUrl": "https://example.com", "customToken": "a'b" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "disallowed_pattern"
    );
}

#[tokio::test]
async fn test_shorten_strips_disallowed_url_content() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/links")
        .json(&json!({ "longUrl": "https://example.com/a;b" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>()["longUrl"],
        "https://example.com/ab"
    );
}

#[tokio::test]
async fn test_shorten_bare_host_then_resolve() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/links")
        .json(&json!({ "longUrl": "example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let created = response.json::<Value>();
    assert_eq!(created["longUrl"], "http://example.com");
    let token = created["token"].as_str().unwrap().to_string();
    assert_eq!(token.len(), 6);

    let response = server.get(&format!("/links/{}", token)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["longUrl"], "http://example.com");

    let list = server.get("/links").await.json::<Value>();
    let items = list["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["token"], token.as_str());
    assert_eq!(items[0]["usageCount"], 1);
}

#[tokio::test]
async fn test_shorten_rejects_embedded_line_break() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/links")
        .json(&json!({ "longUrl": "http://exa\nmple.com/p" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_format");

    server
        .post("/links")
        .json(&json!({ "longUrl": "http://example.com/p" }))
        .await
        .assert_status(StatusCode::CREATED);

    let list = server.get("/links").await.json::<Value>();
    assert_eq!(list["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_shorten_rejects_route_name_tokens() {
    let server = common::create_test_server(common::create_test_state());

    for token in ["events", "health", "links", "resolve"] {
        let response = server
            .post("/links")
            .json(&json!({ "longUrl": "https://example.com", "customToken": token }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"]["code"], "reserved_token");
    }

    let list = server.get("/links").await.json::<Value>();
    assert!(list["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_shorten_rejects_token_with_slash() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/links")
        .json(&json!({ "longUrl": "https://example.com", "customToken": "a/b" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "reserved_token");

    let list = server.get("/links").await.json::<Value>();
    assert!(list["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_shorten_existing_url_with_unusable_token() {
    let server = common::create_test_server(common::create_test_state());
    let token = common::shorten(&server, "https://example.com").await;

    let response = server
        .post("/links")
        .json(&json!({ "longUrl": "https://example.com", "customToken": "a'b" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "already_exists");
    assert_eq!(json["token"], token.as_str());
}

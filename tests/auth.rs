mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::Duration;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{bearer, register, register_payload, TestContext};
use taskboard::auth::TokenService;
use taskboard::config::AuthConfig;
use taskboard::store::Store;

#[actix_rt::test]
async fn test_register_returns_token_and_stores_hash() {
    let ctx = TestContext::new();
    let app = ctx.app().await;

    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({
            "email": "a@b.com",
            "firstName": "A",
            "lastName": "B",
            "password": "secret"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "Authorization")
        .expect("register should set the Authorization cookie");
    let cookie_value = cookie.value().to_string();

    let token: String = test::read_body_json(resp).await;
    assert!(!token.is_empty(), "Token should be a non-empty string");
    assert_eq!(cookie_value, token);

    let claims = ctx.tokens.verify(&token).unwrap();
    let stored = ctx
        .store
        .get_user_by_email("a@b.com")
        .await
        .unwrap()
        .expect("user should be stored");
    assert_eq!(claims.user_id, stored.id.to_string());
    assert_ne!(stored.password_hash, "secret");
    assert!(taskboard::auth::verify_password(&stored.password_hash, "secret"));
}

#[actix_rt::test]
async fn test_duplicate_registration_is_rejected() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    register(&app, "dup@example.com").await;

    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(register_payload("dup@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "email already registered" }));
}

#[actix_rt::test]
async fn test_invalid_registration_inputs() {
    let ctx = TestContext::new();
    let app = ctx.app().await;

    let test_cases = vec![
        (
            json!({ "firstName": "A", "lastName": "B", "password": "secret" }),
            "email is required",
        ),
        (
            json!({ "email": "a@b.com", "lastName": "B", "password": "secret" }),
            "first name is required",
        ),
        (
            json!({ "email": "a@b.com", "firstName": "A", "password": "secret" }),
            "last name is required",
        ),
        (
            json!({ "email": "a@b.com", "firstName": "A", "lastName": "B", "password": "" }),
            "password is required",
        ),
    ];

    for (payload, expected) in test_cases {
        let req = test::TestRequest::post()
            .uri("/users/register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "case: {}", expected);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": expected }));
    }

    assert!(ctx.store.get_user_by_email("a@b.com").await.unwrap().is_none());
}

#[actix_rt::test]
async fn test_malformed_body_is_bad_request() {
    let ctx = TestContext::new();
    let app = ctx.app().await;

    let req = test::TestRequest::post()
        .uri("/users/register")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Invalid request payload" }));
}

#[actix_rt::test]
async fn test_register_and_login_flow() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    register(&app, "flow@example.com").await;

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "email": "flow@example.com", "password": "secret" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(resp.response().cookies().any(|c| c.name() == "Authorization"));
    let token: String = test::read_body_json(resp).await;

    // The login token opens protected routes.
    let req = test::TestRequest::get()
        .uri("/users/me")
        .append_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let me: Value = test::read_body_json(resp).await;
    assert_eq!(me["email"], "flow@example.com");
    assert_eq!(me["firstName"], "Ada");
    assert!(me.get("passwordHash").is_none());
    assert!(me.get("password").is_none());
}

#[actix_rt::test]
async fn test_invalid_login_inputs() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    register(&app, "login@example.com").await;

    let test_cases = vec![
        (json!({ "password": "secret" }), StatusCode::BAD_REQUEST, "email is required"),
        (json!({ "email": "login@example.com" }), StatusCode::BAD_REQUEST, "password is required"),
        (
            json!({ "email": "login@example.com", "password": "wrong" }),
            StatusCode::INTERNAL_SERVER_ERROR,
            "Not authenticated",
        ),
        (
            json!({ "email": "nobody@example.com", "password": "secret" }),
            StatusCode::INTERNAL_SERVER_ERROR,
            "Not authenticated",
        ),
    ];

    for (payload, expected_status, expected_error) in test_cases {
        let req = test::TestRequest::post()
            .uri("/users/login")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected_status, "case: {}", payload);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": expected_error }));
    }
}

#[actix_rt::test]
async fn test_missing_token_is_denied() {
    let ctx = TestContext::new();
    let app = ctx.app().await;

    for uri in ["/users/me", "/projects/1", "/tasks/1"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "uri: {}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "permission denied" }));
    }
}

#[actix_rt::test]
async fn test_token_in_query_param_is_accepted() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    let token = register(&app, "query@example.com").await;

    let req = test::TestRequest::get()
        .uri(&format!("/users/me?token={}", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_token_for_unknown_user_is_denied() {
    let ctx = TestContext::new();
    let app = ctx.app().await;

    // Correctly signed, but no user 999 exists.
    let token = ctx.tokens.issue("999").unwrap();
    let req = test::TestRequest::post()
        .uri("/projects")
        .append_header(bearer(&token))
        .set_json(json!({ "name": "Roadmap" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "permission denied" }));
    assert!(ctx.store.get_project(1).await.unwrap().is_none());
}

#[actix_rt::test]
async fn test_token_with_non_numeric_subject_is_denied() {
    let ctx = TestContext::new();
    let app = ctx.app().await;

    let token = ctx.tokens.issue("not-a-number").unwrap();
    let req = test::TestRequest::get()
        .uri("/users/me")
        .append_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_token_from_other_secret_is_denied() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    register(&app, "forged@example.com").await;

    let forger = TokenService::new(&AuthConfig::new("not-the-server-secret", Duration::hours(1)));
    let token = forger.issue("1").unwrap();
    let req = test::TestRequest::get()
        .uri("/users/me")
        .append_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "permission denied" }));
}

#[actix_rt::test]
async fn test_deleted_user_token_stops_working() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    let token = register(&app, "gone@example.com").await;

    let req = test::TestRequest::delete()
        .uri("/users/me")
        .append_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/users/me")
        .append_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_health_is_public() {
    let ctx = TestContext::new();
    let app = ctx.app().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

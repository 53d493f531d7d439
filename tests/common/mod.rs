#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{test, App, Error};
use chrono::Duration;
use serde_json::{json, Value};
use std::sync::Arc;

use taskboard::auth::TokenService;
use taskboard::config::AuthConfig;
use taskboard::routes;
use taskboard::store::{InMemoryStore, Store};

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestContext {
    pub tokens: Arc<TokenService>,
    pub store: Arc<InMemoryStore>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(TokenService::new(&AuthConfig::new(TEST_SECRET, Duration::hours(1)))),
            store: Arc::new(InMemoryStore::new()),
        }
    }

    pub async fn app(
        &self,
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
        let tokens = Arc::clone(&self.tokens);
        let store: Arc<dyn Store> = self.store.clone();
        test::init_service(
            App::new()
                .wrap(Logger::default())
                .configure(move |cfg| routes::config(cfg, tokens, store)),
        )
        .await
    }
}

pub fn register_payload(email: &str) -> Value {
    json!({
        "email": email,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "password": "secret"
    })
}

/// Registers a user and returns the token from the response body.
pub async fn register<S, B>(app: &S, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(register_payload(email))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201, "registration of {} failed", email);
    test::read_body_json(resp).await
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Reports that the taskboard API is up, with its build version.
///
/// Registered outside the authenticated scopes so load balancers can poll it
/// without a token. It does not touch the store.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now()
    }))
}

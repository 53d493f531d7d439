use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use serde::Deserialize;
use std::rc::Rc;
use std::sync::Arc;

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::token::{TokenError, TokenService};
use crate::error::AppError;
use crate::models::User;
use crate::store::{Store, StoreError};

/// Why a request was turned away. Logged, never sent to the client.
#[derive(Debug, thiserror::Error)]
enum Rejection {
    #[error("{0}")]
    Token(#[from] TokenError),
    #[error("token subject {0:?} is not a user id")]
    BadSubject(String),
    #[error("user {0} no longer exists")]
    UnknownUser(i64),
    #[error("user lookup failed: {0}")]
    Store(#[from] StoreError),
}

/// Guards a scope or resource: every request must carry a valid token for a
/// user that still exists.
///
/// Rejected requests get a 401 with the body `{"error": "permission denied"}`
/// whatever the reason; admitted ones carry an [`AuthenticatedUser`] in their
/// extensions.
#[derive(Clone)]
pub struct AuthMiddleware {
    tokens: Arc<TokenService>,
    store: Arc<dyn Store>,
}

impl AuthMiddleware {
    pub fn new(tokens: Arc<TokenService>, store: Arc<dyn Store>) -> Self {
        Self { tokens, store }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            tokens: Arc::clone(&self.tokens),
            store: Arc::clone(&self.store),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    tokens: Arc<TokenService>,
    store: Arc<dyn Store>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let tokens = Arc::clone(&self.tokens);
        let store = Arc::clone(&self.store);

        Box::pin(async move {
            let token = token_from_request(&req);

            match authenticate(&tokens, store.as_ref(), &token).await {
                Ok(user) => {
                    req.extensions_mut().insert(AuthenticatedUser(user));
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(reason) => {
                    log::warn!(
                        "permission denied for {} {}: {}",
                        req.method(),
                        req.path(),
                        reason
                    );
                    let response = AppError::permission_denied().error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Finds the bearer token: the `Authorization` header first (with or without a
/// `Bearer ` prefix), then the `token` query parameter. Returns an empty string
/// when neither is present, which then fails verification.
pub fn token_from_request(req: &ServiceRequest) -> String {
    let from_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim())
        .filter(|value| !value.is_empty());

    if let Some(token) = from_header {
        return token.to_string();
    }

    web::Query::<TokenQuery>::from_query(req.query_string())
        .ok()
        .and_then(|query| query.into_inner().token)
        .unwrap_or_default()
}

async fn authenticate(tokens: &TokenService, store: &dyn Store, token: &str) -> Result<User, Rejection> {
    let claims = tokens.verify(token)?;
    let user_id = claims
        .user_id
        .parse::<i64>()
        .map_err(|_| Rejection::BadSubject(claims.user_id.clone()))?;

    store
        .get_user_by_id(user_id)
        .await?
        .ok_or(Rejection::UnknownUser(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_token_from_bearer_header() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_srv_request();
        assert_eq!(token_from_request(&req), "abc.def.ghi");
    }

    #[test]
    fn test_token_from_raw_header() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "abc.def.ghi"))
            .to_srv_request();
        assert_eq!(token_from_request(&req), "abc.def.ghi");
    }

    #[test]
    fn test_header_wins_over_query() {
        let req = TestRequest::with_uri("/tasks/1?token=from.query.param")
            .insert_header((header::AUTHORIZATION, "from.the.header"))
            .to_srv_request();
        assert_eq!(token_from_request(&req), "from.the.header");
    }

    #[test]
    fn test_token_from_query_param() {
        let req = TestRequest::with_uri("/tasks/1?token=from.query.param").to_srv_request();
        assert_eq!(token_from_request(&req), "from.query.param");
    }

    #[test]
    fn test_empty_header_falls_back_to_query() {
        let req = TestRequest::with_uri("/tasks/1?token=from.query.param")
            .insert_header((header::AUTHORIZATION, ""))
            .to_srv_request();
        assert_eq!(token_from_request(&req), "from.query.param");
    }

    #[test]
    fn test_missing_token_is_empty() {
        let req = TestRequest::with_uri("/tasks/1").to_srv_request();
        assert_eq!(token_from_request(&req), "");
    }
}

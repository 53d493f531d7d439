use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::User;

/// The user resolved by `AuthMiddleware` for the current request.
///
/// The middleware inserts this into the request extensions after it has
/// verified the token and loaded the user from the store, so handlers get the
/// identity without a second lookup. On a route the middleware does not wrap,
/// extraction fails with 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>().cloned() {
            Some(user) => ready(Ok(user)),
            None => {
                log::error!(
                    "no authenticated user on {}; is AuthMiddleware applied?",
                    req.path()
                );
                ready(Err(AppError::permission_denied().into()))
            }
        }
    }
}

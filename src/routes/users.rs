use crate::{
    auth::{hash_password, verify_password, AuthenticatedUser, TokenService, AUTH_COOKIE},
    error::AppError,
    models::{CreateUserPayload, LoginPayload, NewUser},
    store::{Store, StoreError},
    validation::{validate_create_user, validate_login},
};
use actix_web::{cookie::Cookie, post, web, HttpResponse, HttpResponseBuilder};

/// Register a new user
///
/// Validates the payload, hashes the password and stores the user, then
/// returns a signed token (as a JSON string, and in the `Authorization` cookie).
///
/// ## Responses:
/// - `201 Created`: the token.
/// - `400 Bad Request`: a required field is empty, or the email is already registered.
/// - `500 Internal Server Error`: hashing, storage or signing failed.
#[post("/register")]
pub async fn register(
    store: web::Data<dyn Store>,
    tokens: web::Data<TokenService>,
    payload: web::Json<CreateUserPayload>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    validate_create_user(&payload)?;

    let password_hash = hash_password(&payload.password).map_err(|e| {
        log::error!("failed to hash password during registration: {}", e);
        AppError::InternalServerError("Error creating user".into())
    })?;

    let new_user = NewUser {
        email: payload.email,
        first_name: payload.first_name,
        last_name: payload.last_name,
        password_hash,
    };
    let user = match store.create_user(new_user).await {
        Ok(user) => user,
        Err(StoreError::Conflict(_)) => {
            return Err(AppError::BadRequest("email already registered".into()))
        }
        Err(e) => return Err(e.into()),
    };

    let token = tokens.issue(&user.id.to_string()).map_err(|e| {
        log::error!("failed to issue token for user {}: {}", user.id, e);
        AppError::InternalServerError("Error creating user".into())
    })?;

    log::info!("registered user {}", user.id);
    Ok(token_response(HttpResponse::Created(), token))
}

/// Login user
///
/// Checks the credentials and returns a fresh token the same way `register` does.
///
/// ## Responses:
/// - `201 Created`: the token.
/// - `400 Bad Request`: email or password is empty.
/// - `500 Internal Server Error`: unknown email, wrong password, or a storage/signing failure.
///   The message does not say which.
#[post("/login")]
pub async fn login(
    store: web::Data<dyn Store>,
    tokens: web::Data<TokenService>,
    payload: web::Json<LoginPayload>,
) -> Result<HttpResponse, AppError> {
    validate_login(&payload)?;

    let not_authenticated = || AppError::InternalServerError("Not authenticated".into());

    let user = store
        .get_user_by_email(&payload.email)
        .await
        .map_err(|e| {
            log::error!("user lookup failed during login: {}", e);
            not_authenticated()
        })?
        .ok_or_else(|| {
            log::warn!("login attempt for unknown email");
            not_authenticated()
        })?;

    if !verify_password(&user.password_hash, &payload.password) {
        log::warn!("login attempt with wrong password for user {}", user.id);
        return Err(not_authenticated());
    }

    let token = tokens.issue(&user.id.to_string()).map_err(|e| {
        log::error!("failed to issue token for user {}: {}", user.id, e);
        not_authenticated()
    })?;

    Ok(token_response(HttpResponse::Created(), token))
}

/// Returns the authenticated user. Registered on a resource wrapped by `AuthMiddleware`.
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(user.0)
}

/// Deletes the authenticated user's account. Tokens already issued for it stop
/// working, since the middleware resolves the user on every request.
pub async fn delete_me(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    if !store.delete_user(user.id()).await? {
        return Err(AppError::NotFound("user not found".into()));
    }
    log::info!("deleted user {}", user.id());
    Ok(HttpResponse::NoContent().finish())
}

fn token_response(mut builder: HttpResponseBuilder, token: String) -> HttpResponse {
    let cookie = Cookie::build(AUTH_COOKIE, token.clone())
        .path("/")
        .http_only(true)
        .finish();
    builder.cookie(cookie).json(token)
}

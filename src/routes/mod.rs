pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;

use actix_web::web;
use std::sync::Arc;

use crate::auth::{AuthMiddleware, TokenService};
use crate::error::AppError;
use crate::store::Store;

/// Registers shared state and every route.
///
/// `/health`, `/users/register` and `/users/login` are public; everything else
/// sits behind `AuthMiddleware`.
pub fn config(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>, store: Arc<dyn Store>) {
    let auth = AuthMiddleware::new(Arc::clone(&tokens), Arc::clone(&store));

    cfg.app_data(json_config())
        .app_data(web::Data::from(tokens))
        .app_data(web::Data::from(store))
        .service(health::health)
        .service(
            web::scope("/users")
                .service(users::register)
                .service(users::login)
                .service(
                    web::resource("/me")
                        .wrap(auth.clone())
                        .route(web::get().to(users::me))
                        .route(web::delete().to(users::delete_me)),
                ),
        )
        .service(
            web::scope("/projects")
                .wrap(auth.clone())
                .service(projects::create_project)
                .service(projects::get_project)
                .service(projects::delete_project),
        )
        .service(
            web::scope("/tasks")
                .wrap(auth)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}

/// Bodies that are not valid JSON get the same `{"error": ...}` shape as every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("rejecting request body: {}", err);
        AppError::BadRequest("Invalid request payload".into()).into()
    })
}

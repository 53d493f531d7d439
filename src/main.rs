use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use std::io;
use std::sync::Arc;

use taskboard::auth::TokenService;
use taskboard::config::Config;
use taskboard::routes;
use taskboard::store::{InMemoryStore, PostgresStore, Store};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let store = PostgresStore::connect(url).await.map_err(|e| {
                log::error!("failed to connect to database: {}", e);
                io::Error::new(io::ErrorKind::ConnectionRefused, e)
            })?;
            Arc::new(store)
        }
        None => {
            log::warn!("DATABASE_URL is not set; using the in-memory store, data will not persist");
            Arc::new(InMemoryStore::new())
        }
    };
    let tokens = Arc::new(TokenService::new(&config.auth));

    log::info!("Starting taskboard server at {}", config.server_url());
    HttpServer::new(move || {
        let tokens = Arc::clone(&tokens);
        let store = Arc::clone(&store);
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(move |cfg| routes::config(cfg, tokens, store))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}

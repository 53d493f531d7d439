#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "A JSON API backend for a lightweight project and task tracker. The crate holds"]
#![doc = "the authentication pipeline (password hashing, token issuance and the auth"]
#![doc = "middleware), payload validation, the domain models, the persistence port with"]
#![doc = "its Postgres and in-memory adapters, and the routes. The binary (`main.rs`)"]
#![doc = "only loads configuration and starts the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod validation;

pub use crate::error::AppError;

//! # Persistence port
//!
//! The rest of the crate talks to storage only through the [`Store`] trait,
//! held as an `Arc<dyn Store>`. Two adapters exist: [`PostgresStore`] backed by
//! `sqlx`, and [`InMemoryStore`] used by the test suite and for running the
//! server without a database.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::{CreateProjectPayload, NewTask, NewUser, Project, Task, TaskUpdate, User};

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated, e.g. a duplicate email.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(String),
}

/// CRUD access to users, projects and tasks.
///
/// Lookups return `Ok(None)` for a missing row; deletes return whether a row
/// was removed. `Err` is reserved for the backend itself failing.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn delete_user(&self, id: i64) -> Result<bool, StoreError>;

    async fn create_project(&self, project: &CreateProjectPayload) -> Result<Project, StoreError>;
    async fn get_project(&self, id: i64) -> Result<Option<Project>, StoreError>;
    async fn delete_project(&self, id: i64) -> Result<bool, StoreError>;

    async fn create_task(&self, task: NewTask) -> Result<Task, StoreError>;
    async fn get_task(&self, id: i64) -> Result<Option<Task>, StoreError>;
    async fn update_task(&self, id: i64, update: TaskUpdate) -> Result<Option<Task>, StoreError>;
    async fn delete_task(&self, id: i64) -> Result<bool, StoreError>;
}

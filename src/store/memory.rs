use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{Store, StoreError};
use crate::models::{CreateProjectPayload, NewTask, NewUser, Project, Task, TaskUpdate, User};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    projects: BTreeMap<i64, Project>,
    tasks: BTreeMap<i64, Task>,
    last_user_id: i64,
    last_project_id: i64,
    last_task_id: i64,
}

/// A `Store` that keeps everything in process memory.
///
/// Ids start at 1 and are never reused. Emails are unique, compared exactly.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "user with email '{}' already exists",
                user.email
            )));
        }

        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn delete_user(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.users.remove(&id).is_some())
    }

    async fn create_project(&self, project: &CreateProjectPayload) -> Result<Project, StoreError> {
        let mut tables = self.tables.write().await;
        tables.last_project_id += 1;
        let project = Project {
            id: tables.last_project_id,
            name: project.name.clone(),
            created_at: Utc::now(),
        };
        tables.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn get_project(&self, id: i64) -> Result<Option<Project>, StoreError> {
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }

    async fn delete_project(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.projects.remove(&id).is_some())
    }

    async fn create_task(&self, task: NewTask) -> Result<Task, StoreError> {
        let mut tables = self.tables.write().await;
        tables.last_task_id += 1;
        let task = Task {
            id: tables.last_task_id,
            name: task.name,
            status: task.status,
            project_id: task.project_id,
            assigned_to_id: task.assigned_to_id,
            created_at: Utc::now(),
        };
        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn get_task(&self, id: i64) -> Result<Option<Task>, StoreError> {
        Ok(self.tables.read().await.tasks.get(&id).cloned())
    }

    async fn update_task(&self, id: i64, update: TaskUpdate) -> Result<Option<Task>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.tasks.get_mut(&id).map(|task| {
            task.name = update.name;
            task.status = update.status;
            task.assigned_to_id = update.assigned_to_id;
            task.clone()
        }))
    }

    async fn delete_task(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.tasks.remove(&id).is_some())
    }
}

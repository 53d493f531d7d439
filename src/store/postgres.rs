use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::{Store, StoreError};
use crate::models::{CreateProjectPayload, NewTask, NewUser, Project, Task, TaskUpdate, User};

/// Postgres SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

const USER_COLUMNS: &str = "id, email, first_name, last_name, password_hash, created_at";
const PROJECT_COLUMNS: &str = "id, name, created_at";
const TASK_COLUMNS: &str = "id, name, status, project_id, assigned_to_id, created_at";

/// `Store` backed by a Postgres connection pool.
///
/// Expects `users`, `projects` and `tasks` tables whose columns match the
/// model field names; task status is stored as text.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        let unique_violation = error
            .as_database_error()
            .and_then(|db| db.code())
            .map_or(false, |code| code == UNIQUE_VIOLATION);

        if unique_violation {
            StoreError::Conflict(error.to_string())
        } else {
            StoreError::Database(error.to_string())
        }
    }
}

/// Raw task row; `status` is parsed into `TaskStatus` on the way out.
#[derive(FromRow)]
struct TaskRow {
    id: i64,
    name: String,
    status: String,
    project_id: i64,
    assigned_to_id: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = StoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|_| {
            StoreError::Database(format!("task {} has unknown status {:?}", row.id, row.status))
        })?;
        Ok(Task {
            id: row.id,
            name: row.name,
            status,
            project_id: row.project_id,
            assigned_to_id: row.assigned_to_id,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let sql = format!(
            "INSERT INTO users (email, first_name, last_name, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_user(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_project(&self, project: &CreateProjectPayload) -> Result<Project, StoreError> {
        let sql = format!("INSERT INTO projects (name) VALUES ($1) RETURNING {PROJECT_COLUMNS}");
        Ok(sqlx::query_as::<_, Project>(&sql)
            .bind(&project.name)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn get_project(&self, id: i64) -> Result<Option<Project>, StoreError> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        Ok(sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_project(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_task(&self, task: NewTask) -> Result<Task, StoreError> {
        let sql = format!(
            "INSERT INTO tasks (name, status, project_id, assigned_to_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {TASK_COLUMNS}"
        );
        sqlx::query_as::<_, TaskRow>(&sql)
            .bind(&task.name)
            .bind(task.status.as_str())
            .bind(task.project_id)
            .bind(task.assigned_to_id)
            .fetch_one(&self.pool)
            .await?
            .try_into()
    }

    async fn get_task(&self, id: i64) -> Result<Option<Task>, StoreError> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, TaskRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Task::try_from)
            .transpose()
    }

    async fn update_task(&self, id: i64, update: TaskUpdate) -> Result<Option<Task>, StoreError> {
        let sql = format!(
            "UPDATE tasks
             SET name = $1, status = $2, assigned_to_id = $3
             WHERE id = $4
             RETURNING {TASK_COLUMNS}"
        );
        sqlx::query_as::<_, TaskRow>(&sql)
            .bind(&update.name)
            .bind(update.status.as_str())
            .bind(update.assigned_to_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Task::try_from)
            .transpose()
    }

    async fn delete_task(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    fn row(status: &str) -> TaskRow {
        TaskRow {
            id: 5,
            name: "Ship".to_string(),
            status: status.to_string(),
            project_id: 1,
            assigned_to_id: 2,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_task_row_parses_status() {
        let task = Task::try_from(row("IN_TESTING")).unwrap();
        assert_eq!(task.status, TaskStatus::InTesting);
        assert_eq!(task.assigned_to_id, 2);
    }

    #[test]
    fn test_task_row_with_unknown_status_is_a_database_error() {
        match Task::try_from(row("ARCHIVED")) {
            Err(StoreError::Database(msg)) => assert!(msg.contains("ARCHIVED")),
            other => panic!("expected database error, got {:?}", other),
        }
    }

    #[test]
    fn test_row_not_found_is_a_database_error() {
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::Database(_)
        ));
    }
}

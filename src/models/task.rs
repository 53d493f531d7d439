use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Represents the status of a task.
/// Serialized as `TODO`, `IN_PROGRESS`, `IN_TESTING` or `DONE`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task is yet to be started. New tasks start here unless told otherwise.
    #[default]
    Todo,
    /// Task is currently being worked on.
    InProgress,
    /// Task is implemented and being tested.
    InTesting,
    /// Task is completed.
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::InTesting,
        TaskStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::InTesting => "IN_TESTING",
            TaskStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(ValidationError::InvalidStatus)
    }
}

/// Represents a task entity as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub status: TaskStatus,
    /// Project this task belongs to.
    pub project_id: i64,
    /// User the task is assigned to.
    pub assigned_to_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /tasks`.
///
/// `status` stays a raw string until validation so that an empty value can be
/// defaulted and an unknown one reported, instead of failing deserialization.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTaskPayload {
    pub name: String,
    pub status: String,
    pub project_id: i64,
    pub assigned_to_id: i64,
}

/// Body of `PUT /tasks/{id}`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditTaskPayload {
    pub name: String,
    pub status: String,
    pub assigned_to_id: i64,
}

/// A validated task ready to be inserted by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub name: String,
    pub status: TaskStatus,
    pub project_id: i64,
    pub assigned_to_id: i64,
}

impl NewTask {
    pub fn new(payload: CreateTaskPayload, status: TaskStatus) -> Self {
        Self {
            name: payload.name,
            status,
            project_id: payload.project_id,
            assigned_to_id: payload.assigned_to_id,
        }
    }
}

/// A validated set of changes for an existing task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskUpdate {
    pub name: String,
    pub status: TaskStatus,
    pub assigned_to_id: i64,
}

impl TaskUpdate {
    pub fn new(payload: EditTaskPayload, status: TaskStatus) -> Self {
        Self {
            name: payload.name,
            status,
            assigned_to_id: payload.assigned_to_id,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project groups tasks.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /projects`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateProjectPayload {
    pub name: String,
}

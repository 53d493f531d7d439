use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user.
///
/// `password_hash` is never serialized, so a `User` can be returned from any
/// handler without leaking the credential.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A user about to be inserted; the password has already been hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// Body of `POST /users/register`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateUserPayload {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String, // plaintext, only lives for the request
}

/// Body of `POST /users/login`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_serialization_omits_password_hash() {
        let user = User {
            id: 1,
            email: "a@b.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            created_at: Utc::now(),
        };

        let value = json!(user);
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["firstName"], "A");
        assert_eq!(value["lastName"], "B");
    }

    #[test]
    fn test_create_user_payload_reads_camel_case() {
        let payload: CreateUserPayload = serde_json::from_value(json!({
            "email": "a@b.com",
            "firstName": "A",
            "lastName": "B",
            "password": "secret"
        }))
        .unwrap();
        assert_eq!(payload.first_name, "A");
        assert_eq!(payload.last_name, "B");
    }
}

//! Payload validation for every mutating request.
//!
//! Each function checks one payload type and returns the first rule it breaks.
//! Nothing here touches the store, so a payload is fully checked before any
//! write is attempted.

use crate::models::{
    CreateProjectPayload, CreateTaskPayload, CreateUserPayload, EditTaskPayload, LoginPayload,
    TaskStatus,
};

/// A client-side defect in a request payload. Rendered as a 400 response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("email is required")]
    EmailRequired,
    #[error("first name is required")]
    FirstNameRequired,
    #[error("last name is required")]
    LastNameRequired,
    #[error("password is required")]
    PasswordRequired,
    #[error("name is required")]
    NameRequired,
    #[error("project id is required")]
    ProjectIdRequired,
    #[error("user id is required")]
    UserIdRequired,
    #[error("status is required")]
    StatusRequired,
    #[error("invalid status")]
    InvalidStatus,
}

pub fn validate_create_user(payload: &CreateUserPayload) -> Result<(), ValidationError> {
    if payload.email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if payload.first_name.is_empty() {
        return Err(ValidationError::FirstNameRequired);
    }
    if payload.last_name.is_empty() {
        return Err(ValidationError::LastNameRequired);
    }
    if payload.password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    Ok(())
}

pub fn validate_login(payload: &LoginPayload) -> Result<(), ValidationError> {
    if payload.email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if payload.password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    Ok(())
}

pub fn validate_create_project(payload: &CreateProjectPayload) -> Result<(), ValidationError> {
    if payload.name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(())
}

/// Validates a new task, defaulting an empty status to `TODO` in place.
///
/// Returns the parsed status on success.
pub fn validate_create_task(payload: &mut CreateTaskPayload) -> Result<TaskStatus, ValidationError> {
    if payload.status.is_empty() {
        payload.status = TaskStatus::Todo.as_str().to_string();
    }
    if payload.name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if payload.project_id == 0 {
        return Err(ValidationError::ProjectIdRequired);
    }
    if payload.assigned_to_id == 0 {
        return Err(ValidationError::UserIdRequired);
    }
    payload.status.parse()
}

/// Validates an edit. Unlike creation, the status must be given explicitly.
///
/// Returns the parsed status on success.
pub fn validate_edit_task(payload: &EditTaskPayload) -> Result<TaskStatus, ValidationError> {
    if payload.status.is_empty() {
        return Err(ValidationError::StatusRequired);
    }
    let status = payload.status.parse()?;
    if payload.name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if payload.assigned_to_id == 0 {
        return Err(ValidationError::UserIdRequired);
    }
    Ok(status)
}

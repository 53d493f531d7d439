use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{CreateTaskPayload, EditTaskPayload, NewTask, TaskUpdate},
    store::Store,
    validation::{validate_create_task, validate_edit_task},
};
use actix_web::{delete, get, post, put, web, HttpResponse};

/// Creates a new task.
///
/// ## Request Body:
/// A JSON object matching `CreateTaskPayload`:
/// - `name`: the name of the task (required).
/// - `status` (optional): one of `TODO`, `IN_PROGRESS`, `IN_TESTING`, `DONE`. Defaults to `TODO`.
/// - `projectId`: the project the task belongs to (required, non-zero).
/// - `assignedToId`: the user the task is assigned to (required, non-zero).
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `400 Bad Request`: If a required field is missing or the status is unknown.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `500 Internal Server Error`: For storage failures.
#[post("")]
pub async fn create_task(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
    payload: web::Json<CreateTaskPayload>,
) -> Result<HttpResponse, AppError> {
    let mut payload = payload.into_inner();
    let status = validate_create_task(&mut payload)?;

    let task = store.create_task(NewTask::new(payload, status)).await?;
    log::info!("user {} created task {}", user.id(), task.id);

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: Returns the `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no task has the given ID.
#[get("/{id}")]
pub async fn get_task(
    store: web::Data<dyn Store>,
    task_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let task_id = task_id.into_inner();
    let task = store
        .get_task(task_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("task with ID {} not found", task_id)))?;

    Ok(HttpResponse::Ok().json(task))
}

/// Updates an existing task.
///
/// The task must exist before the payload is validated, so an edit to a
/// missing task is a 404 even when the body is also invalid.
///
/// ## Request Body:
/// A JSON object matching `EditTaskPayload`; `name`, `status` and
/// `assignedToId` are all required.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `400 Bad Request`: If a field is missing or the status is unknown.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no task has the given ID.
#[put("/{id}")]
pub async fn update_task(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
    task_id: web::Path<i64>,
    payload: web::Json<EditTaskPayload>,
) -> Result<HttpResponse, AppError> {
    let task_id = task_id.into_inner();
    let not_found = || AppError::NotFound(format!("task with ID {} not found", task_id));

    if store.get_task(task_id).await?.is_none() {
        return Err(not_found());
    }

    let payload = payload.into_inner();
    let status = validate_edit_task(&payload)?;

    let task = store
        .update_task(task_id, TaskUpdate::new(payload, status))
        .await?
        .ok_or_else(not_found)?;
    log::info!("user {} updated task {}", user.id(), task.id);

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by its ID.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no task has the given ID.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
    task_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let task_id = task_id.into_inner();

    if !store.delete_task(task_id).await? {
        return Err(AppError::NotFound(format!("task with ID {} not found", task_id)));
    }
    log::info!("user {} deleted task {}", user.id(), task_id);

    Ok(HttpResponse::NoContent().finish())
}

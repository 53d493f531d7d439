use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::CreateProjectPayload,
    store::Store,
    validation::validate_create_project,
};
use actix_web::{delete, get, post, web, HttpResponse};

#[post("")]
pub async fn create_project(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
    payload: web::Json<CreateProjectPayload>,
) -> Result<HttpResponse, AppError> {
    validate_create_project(&payload)?;

    let project = store.create_project(&payload).await?;
    log::info!("user {} created project {}", user.id(), project.id);

    Ok(HttpResponse::Created().json(project))
}

#[get("/{id}")]
pub async fn get_project(
    store: web::Data<dyn Store>,
    project_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let project = store
        .get_project(project_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("project not found".into()))?;

    Ok(HttpResponse::Ok().json(project))
}

#[delete("/{id}")]
pub async fn delete_project(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
    project_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let project_id = project_id.into_inner();
    if !store.delete_project(project_id).await? {
        return Err(AppError::NotFound("project not found".into()));
    }
    log::info!("user {} deleted project {}", user.id(), project_id);

    Ok(HttpResponse::NoContent().finish())
}

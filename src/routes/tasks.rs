use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::NewTask,
    routes::{storage_failure, MessageResponse},
    state::AppState,
};
use actix_web::{get, post, web, HttpResponse, Responder};

/// Retrieves every task owned by the authenticated user.
///
/// There is no filtering, ordering or pagination; the result is the full set
/// of the caller's tasks and may be empty.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects.
/// - `401 Unauthorized`: missing or invalid token.
/// - `500 Internal Server Error`: storage failed.
#[get("")]
pub async fn list_tasks(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = state
        .tasks
        .list_by_user(user.user_id)
        .await
        .map_err(|e| storage_failure(e, "Could not fetch tasks"))?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// The owner comes from the token, never from the body. The new task's status
/// is always `pending`. Title and description are stored as given.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Task created successfully"}`.
/// - `400 Bad Request`: body is not a JSON object.
/// - `401 Unauthorized`: missing or invalid token.
/// - `500 Internal Server Error`: storage failed.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_data: web::Json<NewTask>,
) -> Result<impl Responder, AppError> {
    let task = state
        .tasks
        .create_task(task_data.into_inner(), user.user_id)
        .await
        .map_err(|e| storage_failure(e, "Failed to create task"))?;
    log::debug!("user {} created task {}", user.username, task.id);

    Ok(HttpResponse::Ok().json(MessageResponse::new("Task created successfully")))
}

// handlers/protected/tasks.rs - /api/tasks CRUD for the authenticated caller
//
// Every handler reads the caller from the `AuthUser` extension installed by
// `jwt_auth_middleware` and never trusts an owner id from the request.

use axum::extract::{Extension, Query, State};
use serde::Deserialize;

use crate::api::format::TaskResponse;
use crate::api::state::AppState;
use crate::features::tasks::{
    complete::{self, SetCompletionRequest},
    create, delete, get, list,
    update::{self, UpdateTaskRequest},
    CreateTaskCommand, DeleteTaskCommand, GetTaskByIdQuery, ListTasksQuery, SetTaskCompletionCommand,
    UpdateTaskCommand,
};
use crate::handlers::extract::{AppJson, TaskId};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::types::TaskStatusFilter;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// `active` or `completed`, any case. Anything else lists everything.
    pub status: Option<String>,
}

/// GET /api/tasks?status=
pub async fn task_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    params: Option<Query<ListParams>>,
) -> ApiResult<Vec<TaskResponse>> {
    let params = params.map(|Query(params)| params).unwrap_or_default();
    let query = ListTasksQuery {
        status: TaskStatusFilter::parse(params.status.as_deref()),
    };

    let tasks = list::handle(&state, user.user_id, query).await?;
    Ok(ApiResponse::success(tasks))
}

/// GET /api/tasks/:id
pub async fn task_show(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    TaskId(id): TaskId,
) -> ApiResult<TaskResponse> {
    let task = get::handle(&state, user.user_id, GetTaskByIdQuery { id }).await?;
    Ok(ApiResponse::success(task))
}

/// POST /api/tasks
pub async fn task_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    AppJson(command): AppJson<CreateTaskCommand>,
) -> ApiResult<TaskResponse> {
    let task = create::handle(&state, user.user_id, command).await?;
    let location = format!("/api/tasks/{}", task.id);
    Ok(ApiResponse::created(task, location))
}

/// PUT /api/tasks/:id
pub async fn task_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    TaskId(id): TaskId,
    AppJson(request): AppJson<UpdateTaskRequest>,
) -> ApiResult<TaskResponse> {
    let task = update::handle(&state, user.user_id, UpdateTaskCommand::new(id, request)).await?;
    Ok(ApiResponse::success(task))
}

/// PATCH /api/tasks/:id/complete
pub async fn task_complete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    TaskId(id): TaskId,
    AppJson(request): AppJson<SetCompletionRequest>,
) -> ApiResult<TaskResponse> {
    let command = SetTaskCompletionCommand {
        id,
        is_completed: request.is_completed,
    };
    let task = complete::handle(&state, user.user_id, command).await?;
    Ok(ApiResponse::success(task))
}

/// DELETE /api/tasks/:id
pub async fn task_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    TaskId(id): TaskId,
) -> ApiResult<()> {
    delete::handle(&state, user.user_id, DeleteTaskCommand { id }).await?;
    Ok(ApiResponse::no_content())
}

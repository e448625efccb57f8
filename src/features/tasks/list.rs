use uuid::Uuid;

use crate::api::format::TaskResponse;
use crate::api::state::AppState;
use crate::error::AppResult;
use crate::types::TaskStatusFilter;

#[derive(Debug, Clone, Copy, Default)]
pub struct ListTasksQuery {
    pub status: TaskStatusFilter,
}

/// Newest first. Has no input rules; only store failures can fail it.
pub async fn handle(state: &AppState, user_id: Uuid, query: ListTasksQuery) -> AppResult<Vec<TaskResponse>> {
    let tasks = state.db.tasks().list(user_id, query.status).await?;
    Ok(tasks.into_iter().map(TaskResponse::from).collect())
}

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::format::TaskResponse;
use crate::api::state::AppState;
use crate::error::AppResult;
use crate::validation::{Rules, Validate};

use super::not_found;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCompletionRequest {
    pub is_completed: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct SetTaskCompletionCommand {
    pub id: Uuid,
    pub is_completed: bool,
}

impl Validate for SetTaskCompletionCommand {
    fn rules(&self, rules: &mut Rules) {
        rules.id("Task ID", self.id);
    }
}

/// Sets the flag unconditionally; `updated_at` moves even if nothing changed.
pub async fn handle(state: &AppState, user_id: Uuid, command: SetTaskCompletionCommand) -> AppResult<TaskResponse> {
    command.validate()?;

    let tasks = state.db.tasks();
    let task = tasks
        .find_owned(command.id, user_id)
        .await?
        .ok_or_else(|| not_found(command.id))?
        .with_completion(command.is_completed, Utc::now());

    if !tasks.update(&task).await? {
        return Err(not_found(task.id));
    }

    Ok(task.into())
}

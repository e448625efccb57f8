use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::format::TaskResponse;
use crate::api::state::AppState;
use crate::error::AppResult;
use crate::validation::{Rules, Validate};

use super::{detail_rules, into_details, not_found};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_due_date")]
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct UpdateTaskCommand {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl UpdateTaskCommand {
    pub fn new(id: Uuid, request: UpdateTaskRequest) -> Self {
        Self {
            id,
            title: request.title,
            description: request.description,
            priority: request.priority,
            due_date: request.due_date,
        }
    }
}

impl Validate for UpdateTaskCommand {
    fn rules(&self, rules: &mut Rules) {
        rules.id("Task ID", self.id);
        detail_rules(
            rules,
            &self.title,
            self.description.as_deref(),
            self.priority.as_deref(),
        );
    }
}

pub async fn handle(state: &AppState, user_id: Uuid, command: UpdateTaskCommand) -> AppResult<TaskResponse> {
    command.validate()?;

    let tasks = state.db.tasks();
    let task = tasks
        .find_owned(command.id, user_id)
        .await?
        .ok_or_else(|| not_found(command.id))?;

    let details = into_details(command.title, command.description, command.priority, command.due_date);
    let task = task.revise(details, Utc::now());

    // The row can vanish between load and write if a delete races us
    if !tasks.update(&task).await? {
        return Err(not_found(task.id));
    }

    Ok(task.into())
}

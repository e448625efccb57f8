use uuid::Uuid;

use crate::api::format::TaskResponse;
use crate::api::state::AppState;
use crate::error::AppResult;
use crate::validation::{Rules, Validate};

use super::not_found;

#[derive(Debug, Clone, Copy)]
pub struct GetTaskByIdQuery {
    pub id: Uuid,
}

impl Validate for GetTaskByIdQuery {
    fn rules(&self, rules: &mut Rules) {
        rules.id("Task ID", self.id);
    }
}

pub async fn handle(state: &AppState, user_id: Uuid, query: GetTaskByIdQuery) -> AppResult<TaskResponse> {
    query.validate()?;

    state
        .db
        .tasks()
        .find_owned(query.id, user_id)
        .await?
        .map(TaskResponse::from)
        .ok_or_else(|| not_found(query.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::features::tasks::{create, CreateTaskCommand};
    use crate::testing;

    #[tokio::test]
    async fn returns_what_was_created() {
        let (state, _) = testing::state().await;
        let owner = testing::seed_user(&state.db, "owner@example.com").await;
        let created = create::handle(
            &state,
            owner.id,
            CreateTaskCommand {
                title: "T".repeat(3),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let task = handle(&state, owner.id, GetTaskByIdQuery { id: created.id }).await.unwrap();

        assert_eq!(task, created);
        assert!(task.created_at <= task.updated_at);
    }

    #[tokio::test]
    async fn another_users_task_is_not_found() {
        let (state, _) = testing::state().await;
        let owner = testing::seed_user(&state.db, "owner@example.com").await;
        let stranger = testing::seed_user(&state.db, "stranger@example.com").await;
        let task = testing::seed_task(&state.db, owner.id, "Private").await;

        let err = handle(&state, stranger.id, GetTaskByIdQuery { id: task.id }).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let missing = Uuid::new_v4();
        let err = handle(&state, owner.id, GetTaskByIdQuery { id: missing }).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, format!("Task with ID '{missing}' was not found."));
    }

    #[tokio::test]
    async fn nil_id_is_a_validation_error() {
        let (state, _) = testing::state().await;
        let err = handle(&state, Uuid::new_v4(), GetTaskByIdQuery { id: Uuid::nil() }).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);
    }
}

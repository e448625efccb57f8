use uuid::Uuid;

use crate::api::state::AppState;
use crate::error::AppResult;
use crate::validation::{Rules, Validate};

use super::not_found;

#[derive(Debug, Clone, Copy)]
pub struct DeleteTaskCommand {
    pub id: Uuid,
}

impl Validate for DeleteTaskCommand {
    fn rules(&self, rules: &mut Rules) {
        rules.id("Task ID", self.id);
    }
}

pub async fn handle(state: &AppState, user_id: Uuid, command: DeleteTaskCommand) -> AppResult<()> {
    command.validate()?;

    if !state.db.tasks().delete(command.id, user_id).await? {
        return Err(not_found(command.id));
    }

    tracing::debug!("Deleted task {} for user {}", command.id, user_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing;

    #[tokio::test]
    async fn removes_the_task() {
        let (state, _) = testing::state().await;
        let owner = testing::seed_user(&state.db, "owner@example.com").await;
        let task = testing::seed_task(&state.db, owner.id, "Remove me").await;

        handle(&state, owner.id, DeleteTaskCommand { id: task.id }).await.unwrap();

        assert!(state.db.tasks().find_owned(task.id, owner.id).await.unwrap().is_none());
        let again = handle(&state, owner.id, DeleteTaskCommand { id: task.id }).await.unwrap_err();
        assert_eq!(again.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn nonexistent_or_foreign_task_is_not_found() {
        let (state, _) = testing::state().await;
        let owner = testing::seed_user(&state.db, "owner@example.com").await;
        let stranger = testing::seed_user(&state.db, "stranger@example.com").await;
        let task = testing::seed_task(&state.db, owner.id, "Keep me").await;

        let err = handle(&state, stranger.id, DeleteTaskCommand { id: task.id }).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(state.db.tasks().find_owned(task.id, owner.id).await.unwrap().is_some());

        let err = handle(&state, owner.id, DeleteTaskCommand { id: Uuid::new_v4() }).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}

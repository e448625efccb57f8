use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::format::TaskResponse;
use crate::api::state::AppState;
use crate::database::models::Task;
use crate::error::AppResult;
use crate::validation::{Rules, Validate};

use super::{detail_rules, into_details};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskCommand {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_due_date")]
    pub due_date: Option<DateTime<Utc>>,
}

impl Validate for CreateTaskCommand {
    fn rules(&self, rules: &mut Rules) {
        detail_rules(
            rules,
            &self.title,
            self.description.as_deref(),
            self.priority.as_deref(),
        );
    }
}

/// `user_id` comes from the verified token, never from the request body.
pub async fn handle(state: &AppState, user_id: Uuid, command: CreateTaskCommand) -> AppResult<TaskResponse> {
    command.validate()?;

    let details = into_details(command.title, command.description, command.priority, command.due_date);
    let task = Task::new(user_id, details, Utc::now());

    state.db.tasks().insert(&task).await?;
    tracing::debug!("Created task {} for user {}", task.id, user_id);

    Ok(task.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing;
    use crate::types::Priority;

    fn command(title: &str) -> CreateTaskCommand {
        CreateTaskCommand {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn defaults_to_incomplete_medium_priority() {
        let (state, _) = testing::state().await;
        let owner = testing::seed_user(&state.db, "owner@example.com").await;

        let task = handle(&state, owner.id, command("Write report")).await.unwrap();

        assert!(!task.is_completed);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.created_at, task.updated_at);
        assert!(!task.id.is_nil());

        let stored = state.db.tasks().find_owned(task.id, owner.id).await.unwrap().unwrap();
        assert_eq!(stored.user_id, owner.id);
    }

    #[tokio::test]
    async fn keeps_supplied_fields() {
        let (state, _) = testing::state().await;
        let owner = testing::seed_user(&state.db, "owner@example.com").await;
        let due = Utc::now() + chrono::Duration::days(2);

        let task = handle(
            &state,
            owner.id,
            CreateTaskCommand {
                title: "Ship release".to_string(),
                description: Some("v1.2".to_string()),
                priority: Some("high".to_string()),
                due_date: Some(due),
            },
        )
        .await
        .unwrap();

        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.description.as_deref(), Some("v1.2"));
        assert_eq!(task.due_date, Some(due));
    }

    #[tokio::test]
    async fn short_title_is_a_validation_error_mentioning_title() {
        let (state, _) = testing::state().await;
        let owner = testing::seed_user(&state.db, "owner@example.com").await;

        let err = handle(&state, owner.id, command("ab")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::Validation);
        assert!(err.message.contains("Title"));
        assert!(state.db.tasks().list(owner.id, Default::default()).await.unwrap().is_empty());
    }

    #[test]
    fn validation_rules() {
        assert!(command("abc").validate().is_ok());
        assert!(command(&"t".repeat(120)).validate().is_ok());
        assert!(command(&"t".repeat(121)).validate().is_err());
        assert!(command("   ").validate().unwrap_err().message.contains("Title is required."));

        let bad_priority = CreateTaskCommand {
            priority: Some("Urgent".to_string()),
            ..command("Write report")
        };
        assert_eq!(
            bad_priority.validate().unwrap_err().message,
            "Priority must be Low, Medium, or High."
        );

        let long_description = CreateTaskCommand {
            description: Some("d".repeat(2001)),
            ..command("Write report")
        };
        assert_eq!(
            long_description.validate().unwrap_err().message,
            "Description must not exceed 2000 characters."
        );
    }
}

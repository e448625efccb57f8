use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::types::Priority;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
}

/// Fields a caller may set on create or replace on update.
#[derive(Debug, Clone)]
pub struct TaskDetails {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(user_id: Uuid, details: TaskDetails, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: details.title,
            description: details.description,
            is_completed: false,
            priority: details.priority.unwrap_or_default(),
            due_date: details.due_date,
            created_at: now,
            updated_at: now,
            user_id,
        }
    }

    /// Title, description and due date are replaced outright; priority only
    /// when a new one is given.
    pub fn revise(self, details: TaskDetails, now: DateTime<Utc>) -> Self {
        Self {
            title: details.title,
            description: details.description,
            priority: details.priority.unwrap_or(self.priority),
            due_date: details.due_date,
            updated_at: now,
            ..self
        }
    }

    /// Always touches `updated_at`, even when the flag is unchanged.
    pub fn with_completion(self, is_completed: bool, now: DateTime<Utc>) -> Self {
        Self {
            is_completed,
            updated_at: now,
            ..self
        }
    }
}

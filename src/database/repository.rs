use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Task, User};
use crate::types::TaskStatusFilter;

const TASK_COLUMNS: &str =
    "id, title, description, is_completed, priority, due_date, created_at, updated_at, user_id";

pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Expects an already-normalized email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Fails with `UniqueViolation` when the email is already taken.
    pub async fn insert(&self, user: &User) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO users (id, email, password_hash, created_at) VALUES ($1, $2, $3, $4)")
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}

/// Every lookup is scoped by owner: another user's task reads as absent.
pub struct TaskRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TaskRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_owned(&self, id: Uuid, user_id: Uuid) -> Result<Option<Task>, DatabaseError> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2");
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(task)
    }

    /// Newest first.
    pub async fn list(&self, user_id: Uuid, status: TaskStatusFilter) -> Result<Vec<Task>, DatabaseError> {
        let tasks = match status.completion() {
            Some(is_completed) => {
                let sql = format!(
                    "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 AND is_completed = $2 \
                     ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, Task>(&sql)
                    .bind(user_id)
                    .bind(is_completed)
                    .fetch_all(self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC");
                sqlx::query_as::<_, Task>(&sql)
                    .bind(user_id)
                    .fetch_all(self.pool)
                    .await?
            }
        };
        Ok(tasks)
    }

    pub async fn insert(&self, task: &Task) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO tasks (id, title, description, is_completed, priority, due_date, created_at, updated_at, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.is_completed)
        .bind(task.priority.as_str())
        .bind(task.due_date)
        .bind(task.created_at)
        .bind(task.updated_at)
        .bind(task.user_id)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Writes back every mutable column. Returns false if no owned row matched.
    pub async fn update(&self, task: &Task) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE tasks SET title = $1, description = $2, is_completed = $3, priority = $4, \
             due_date = $5, updated_at = $6 WHERE id = $7 AND user_id = $8",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.is_completed)
        .bind(task.priority.as_str())
        .bind(task.due_date)
        .bind(task.updated_at)
        .bind(task.id)
        .bind(task.user_id)
        .execute(self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

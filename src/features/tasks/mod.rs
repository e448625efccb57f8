pub mod complete;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub use complete::SetTaskCompletionCommand;
pub use create::CreateTaskCommand;
pub use delete::DeleteTaskCommand;
pub use get::GetTaskByIdQuery;
pub use list::ListTasksQuery;
pub use update::UpdateTaskCommand;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer};

use crate::database::models::TaskDetails;
use crate::error::AppError;
use crate::types::Priority;
use crate::validation::Rules;

const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 120;
const DESCRIPTION_MAX: usize = 2000;

pub(crate) fn not_found(id: impl std::fmt::Display) -> AppError {
    AppError::not_found(format!("Task with ID '{id}' was not found."))
}

/// Rules shared by create and update.
fn detail_rules(
    rules: &mut Rules,
    title: &str,
    description: Option<&str>,
    priority: Option<&str>,
) {
    rules
        .required("Title", title)
        .min_len("Title", title, TITLE_MIN)
        .max_len("Title", title, TITLE_MAX);

    if let Some(description) = description {
        rules.max_len("Description", description, DESCRIPTION_MAX);
    }

    rules.check(
        priority.map_or(true, |p| p.parse::<Priority>().is_ok()),
        "Priority must be Low, Medium, or High.",
    );
}

/// Only called after validation, so an unparsable priority cannot occur here.
fn into_details(
    title: String,
    description: Option<String>,
    priority: Option<String>,
    due_date: Option<DateTime<Utc>>,
) -> TaskDetails {
    TaskDetails {
        title,
        description,
        priority: priority.and_then(|p| p.parse().ok()),
        due_date,
    }
}

/// Accepts RFC 3339, an offset-less date-time (read as UTC) or a bare date
/// (midnight UTC). `null` and a missing field both mean no due date.
pub(crate) fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(naive.and_utc()));
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Some(midnight.and_utc()));
    }

    Err(de::Error::custom(format!("'{raw}' is not a valid dueDate")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn due(json: &str) -> Result<Option<DateTime<Utc>>, serde_json::Error> {
        serde_json::from_str::<CreateTaskCommand>(json).map(|command| command.due_date)
    }

    #[test]
    fn due_date_accepts_common_forms() {
        let ten_am = Utc.with_ymd_and_hms(2026, 10, 20, 10, 0, 0).unwrap();
        let midnight = Utc.with_ymd_and_hms(2026, 10, 20, 0, 0, 0).unwrap();

        assert_eq!(due(r#"{"dueDate": "2026-10-20T10:00:00Z"}"#).unwrap(), Some(ten_am));
        assert_eq!(due(r#"{"dueDate": "2026-10-20T12:00:00+02:00"}"#).unwrap(), Some(ten_am));
        assert_eq!(due(r#"{"dueDate": "2026-10-20T10:00:00"}"#).unwrap(), Some(ten_am));
        assert_eq!(due(r#"{"dueDate": "2026-10-20T10:00:00.000"}"#).unwrap(), Some(ten_am));
        assert_eq!(due(r#"{"dueDate": "2026-10-20"}"#).unwrap(), Some(midnight));
    }

    #[test]
    fn due_date_absent_or_null_is_none() {
        assert_eq!(due(r#"{"title": "Write report"}"#).unwrap(), None);
        assert_eq!(due(r#"{"dueDate": null}"#).unwrap(), None);
    }

    #[test]
    fn due_date_rejects_garbage() {
        assert!(due(r#"{"dueDate": "next tuesday"}"#).is_err());
        assert!(due(r#"{"dueDate": "2026-13-40"}"#).is_err());
    }

    #[test]
    fn update_body_uses_the_same_rules() {
        let request: update::UpdateTaskRequest =
            serde_json::from_str(r#"{"title": "Write report", "dueDate": "2026-10-20"}"#).unwrap();
        assert_eq!(request.due_date, Some(Utc.with_ymd_and_hms(2026, 10, 20, 0, 0, 0).unwrap()));
    }
}

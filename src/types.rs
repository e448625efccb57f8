//! Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown priority '{0}'")]
pub struct ParsePriorityError(pub String);

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    /// Case-insensitive, so "high" and "HIGH" both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Which tasks a listing returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskStatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskStatusFilter {
    /// Anything other than `active`/`completed` (any casing) means all tasks.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("active") => TaskStatusFilter::Active,
            Some("completed") => TaskStatusFilter::Completed,
            _ => TaskStatusFilter::All,
        }
    }

    pub fn completion(&self) -> Option<bool> {
        match self {
            TaskStatusFilter::All => None,
            TaskStatusFilter::Active => Some(false),
            TaskStatusFilter::Completed => Some(true),
        }
    }
}

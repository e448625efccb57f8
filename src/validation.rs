//! Field rules run ahead of every command handler.
//!
//! Rules never stop at the first failure: every violation is collected and
//! the messages are joined with `"; "` into a single Validation error.

use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A command that knows its own field rules.
pub trait Validate {
    fn rules(&self, rules: &mut Rules);

    fn validate(&self) -> AppResult<()> {
        let mut rules = Rules::default();
        self.rules(&mut rules);
        rules.finish()
    }
}

#[derive(Debug, Default)]
pub struct Rules {
    violations: Vec<String>,
}

impl Rules {
    pub fn check(&mut self, ok: bool, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.violations.push(message.into());
        }
        self
    }

    /// Whitespace-only counts as empty.
    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(!value.trim().is_empty(), format!("{field} is required."))
    }

    pub fn min_len(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        self.check(
            value.chars().count() >= min,
            format!("{field} must be at least {min} characters."),
        )
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        self.check(
            value.chars().count() <= max,
            format!("{field} must not exceed {max} characters."),
        )
    }

    pub fn email(&mut self, value: &str) -> &mut Self {
        self.check(is_email(value), "A valid email address is required.")
    }

    pub fn id(&mut self, field: &str, id: Uuid) -> &mut Self {
        self.check(!id.is_nil(), format!("{field} is required."))
    }

    pub fn finish(self) -> AppResult<()> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(self.violations.join("; ")))
        }
    }
}

/// Exactly one `@`, with something on both sides of it.
pub fn is_email(value: &str) -> bool {
    match value.find('@') {
        Some(at) => at > 0 && at < value.len() - 1 && value.rfind('@') == Some(at),
        None => false,
    }
}

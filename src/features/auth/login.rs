use serde::Deserialize;

use crate::api::format::AuthResponse;
use crate::api::state::AppState;
use crate::auth::password;
use crate::database::models::normalize_email;
use crate::error::{AppError, AppResult};
use crate::validation::{Rules, Validate};

use super::{email_rules, PASSWORD_MAX};

/// Identical for unknown emails and wrong passwords.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginCommand {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for LoginCommand {
    fn rules(&self, rules: &mut Rules) {
        email_rules(rules, &self.email);
        rules
            .required("Password", &self.password)
            .max_len("Password", &self.password, PASSWORD_MAX);
    }
}

pub async fn handle(state: &AppState, command: LoginCommand) -> AppResult<AuthResponse> {
    command.validate()?;

    let email = normalize_email(&command.email);
    let user = state.db.users().find_by_email(&email).await?;

    // Unknown emails are checked against a dummy hash so they take as long as a wrong password
    let stored = user.as_ref().map(|user| user.password_hash.clone());
    let verified = password::verify_password(state.hasher.clone(), command.password, stored).await?;

    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::warn!("Rejected login attempt");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }
    };

    let token = state.tokens.generate(&user)?;
    tracing::debug!("User {} logged in", user.id);

    Ok(AuthResponse {
        token,
        email: user.email,
    })
}

use serde::Deserialize;

use crate::api::format::AuthResponse;
use crate::api::state::AppState;
use crate::auth::password;
use crate::database::models::{normalize_email, User};
use crate::database::DatabaseError;
use crate::error::{AppError, AppResult};
use crate::validation::{Rules, Validate};

use super::{email_rules, PASSWORD_MAX, PASSWORD_MIN};

const DUPLICATE_EMAIL: &str = "A user with this email already exists.";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterCommand {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for RegisterCommand {
    fn rules(&self, rules: &mut Rules) {
        email_rules(rules, &self.email);
        rules
            .required("Password", &self.password)
            .min_len("Password", &self.password, PASSWORD_MIN)
            .max_len("Password", &self.password, PASSWORD_MAX);
    }
}

pub async fn handle(state: &AppState, command: RegisterCommand) -> AppResult<AuthResponse> {
    command.validate()?;

    let email = normalize_email(&command.email);
    let users = state.db.users();

    // Cheap early exit that also spares the hasher; the unique index
    // remains the authority when two registrations race.
    if users.email_exists(&email).await? {
        return Err(AppError::conflict(DUPLICATE_EMAIL));
    }

    let password_hash = password::hash_password(state.hasher.clone(), command.password).await?;
    let user = User::new(email, password_hash);

    match users.insert(&user).await {
        Ok(()) => {}
        Err(DatabaseError::UniqueViolation(_)) => return Err(AppError::conflict(DUPLICATE_EMAIL)),
        Err(e) => return Err(e.into()),
    }

    let token = state.tokens.generate(&user)?;
    tracing::info!("Registered user {}", user.id);

    Ok(AuthResponse {
        token,
        email: user.email,
    })
}

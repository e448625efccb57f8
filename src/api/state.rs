use std::sync::Arc;

use crate::auth::password::{Argon2Hasher, PasswordHasher};
use crate::auth::{JwtError, TokenService};
use crate::config::AppConfig;
use crate::database::Database;

/// Everything a request needs, cloned cheaply into each one.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database) -> Result<Self, JwtError> {
        Self::with_hasher(config, db, Arc::new(Argon2Hasher))
    }

    pub fn with_hasher(
        config: AppConfig,
        db: Database,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Result<Self, JwtError> {
        let tokens = TokenService::new(&config.security)?;
        Ok(Self {
            config: Arc::new(config),
            db,
            hasher,
            tokens,
        })
    }
}

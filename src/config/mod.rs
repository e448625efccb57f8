use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub auto_migrate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_expiry_minutes: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be configured outside of Development")]
    Missing(&'static str),
}

const DEV_DATABASE_URL: &str = "sqlite://taskmanagement.db?mode=rwc";
const DEV_CORS_ORIGIN: &str = "http://localhost:5173";
const DEV_JWT_SECRET: &str = "development-only-secret-do-not-use-in-production!";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
            }
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_AUTO_MIGRATE") {
            self.database.auto_migrate = v.parse().unwrap_or(self.database.auto_migrate);
        }

        // API overrides
        if let Some(v) = env::var("PORT").ok().and_then(|v| v.parse().ok()) {
            self.api.port = v;
        }
        if let Ok(v) = env::var("CORS_ALLOWED_ORIGINS") {
            self.api.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_ISSUER") {
            self.security.jwt_issuer = v;
        }
        if let Ok(v) = env::var("JWT_AUDIENCE") {
            self.security.jwt_audience = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_MINUTES") {
            self.security.jwt_expiry_minutes = v.parse().unwrap_or(self.security.jwt_expiry_minutes);
        }

        self
    }

    /// Fills development defaults for anything left unset, or rejects the
    /// configuration when running in any other environment.
    pub fn resolve(mut self) -> Result<Self, ConfigError> {
        let is_development = self.environment == Environment::Development;

        if self.database.url.is_none() {
            if !is_development {
                return Err(ConfigError::Missing("DATABASE_URL"));
            }
            tracing::warn!("DATABASE_URL is not configured. Using default: \"{}\"", DEV_DATABASE_URL);
            self.database.url = Some(DEV_DATABASE_URL.to_string());
        }

        if self.api.cors_origins.is_empty() {
            if !is_development {
                return Err(ConfigError::Missing("CORS_ALLOWED_ORIGINS"));
            }
            tracing::warn!("CORS_ALLOWED_ORIGINS is not configured. Using default: \"{}\"", DEV_CORS_ORIGIN);
            self.api.cors_origins = vec![DEV_CORS_ORIGIN.to_string()];
        }

        if self.security.jwt_secret.is_empty() {
            if !is_development {
                return Err(ConfigError::Missing("JWT_SECRET"));
            }
            tracing::warn!("JWT_SECRET is not configured. Using the development secret");
            self.security.jwt_secret = DEV_JWT_SECRET.to_string();
        }

        Ok(self)
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
                auto_migrate: true,
            },
            api: ApiConfig {
                port: 3000,
                cors_origins: Vec::new(),
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_issuer: "TaskManagementSystem".to_string(),
                jwt_audience: "TaskManagementSystem".to_string(),
                jwt_expiry_minutes: 60,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 10,
                auto_migrate: false,
            },
            ..Self::development()
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 5,
                auto_migrate: false,
            },
            api: ApiConfig {
                port: 8080,
                cors_origins: Vec::new(),
            },
            ..Self::development()
        }
    }

    pub fn database_url(&self) -> &str {
        self.database.url.as_deref().unwrap_or(DEV_DATABASE_URL)
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

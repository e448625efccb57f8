//! Fixtures for unit tests: a migrated in-memory store, seeded rows and a
//! hasher that counts how often it is used.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::api::state::AppState;
use crate::auth::password::{HashError, PasswordHasher};
use crate::config::{AppConfig, DatabaseConfig};
use crate::database::models::{Task, TaskDetails, User};
use crate::database::Database;

pub async fn memory_database() -> Database {
    let config = DatabaseConfig {
        url: Some("sqlite::memory:".to_string()),
        max_connections: 1,
        connection_timeout: 5,
        auto_migrate: true,
    };
    let db = Database::connect(&config).await.expect("in-memory database");
    db.migrate().await.expect("migrations");
    db
}

pub async fn seed_user(db: &Database, email: &str) -> User {
    let user = User::new(email.to_string(), format!("hashed:{email}"));
    db.users().insert(&user).await.expect("seed user");
    user
}

/// Stored a minute in the past so later writes always move `updated_at`.
pub async fn seed_task(db: &Database, user_id: Uuid, title: &str) -> Task {
    let created = Utc::now() - Duration::minutes(1);
    let task = Task::new(
        user_id,
        TaskDetails {
            title: title.to_string(),
            description: None,
            priority: None,
            due_date: None,
        },
        created,
    );
    db.tasks().insert(&task).await.expect("seed task");
    task
}

/// Deterministic stand-in for Argon2.
#[derive(Debug, Default)]
pub struct CountingHasher {
    hashes: AtomicUsize,
    verifies: AtomicUsize,
}

impl CountingHasher {
    pub fn hash_calls(&self) -> usize {
        self.hashes.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.verifies.load(Ordering::SeqCst)
    }
}

impl PasswordHasher for CountingHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        self.hashes.fetch_add(1, Ordering::SeqCst);
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        Ok(hash == format!("hashed:{password}"))
    }
}

/// Blocks its thread for 100 ms per call, like a slow real hash.
#[derive(Debug, Default)]
pub struct SlowHasher;

impl PasswordHasher for SlowHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        std::thread::sleep(StdDuration::from_millis(100));
        Ok(format!("slow:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        std::thread::sleep(StdDuration::from_millis(100));
        Ok(hash == format!("slow:{password}"))
    }
}

/// Counts 1 ms ticks on the current runtime until aborted.
pub fn spawn_ticker() -> (Arc<AtomicUsize>, tokio::task::JoinHandle<()>) {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();
    let handle = tokio::spawn(async move {
        loop {
            tokio::time::sleep(StdDuration::from_millis(1)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });
    (ticks, handle)
}

pub fn config() -> AppConfig {
    let mut config = AppConfig::development();
    config.database.url = Some("sqlite::memory:".to_string());
    config.resolve().expect("development config resolves")
}

pub async fn state() -> (AppState, Arc<CountingHasher>) {
    let hasher = Arc::new(CountingHasher::default());
    let state = AppState::with_hasher(config(), memory_database().await, hasher.clone())
        .expect("token service");
    (state, hasher)
}

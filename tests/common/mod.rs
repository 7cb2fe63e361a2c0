//! Shared helpers for integration tests.

#![allow(dead_code)]

use proticket_auth::config::DatabaseConfig;
use proticket_auth::{AccountService, Argon2Hasher, Database, SqliteAccountStore};

/// Roles seeded into every test database.
pub const ROLES: [&str; 3] = ["customer", "organizer", "admin"];

pub type TestService = AccountService<SqliteAccountStore, Argon2Hasher>;

/// Argon2 at minimum cost so tests stay fast.
pub fn fast_hasher() -> Argon2Hasher {
    Argon2Hasher::new(8, 1, 1).unwrap()
}

/// Argon2 at a cost where one hash takes a noticeable fraction of a second.
pub fn production_like_hasher() -> Argon2Hasher {
    Argon2Hasher::new(16 * 1024, 2, 1).unwrap()
}

/// Seed the standard test roles.
pub async fn seed(db: &Database) {
    let names: Vec<String> = ROLES.iter().map(|r| r.to_string()).collect();
    db.seed_roles(&names).await.unwrap();
}

/// In-memory database with roles seeded, plus a service over it.
pub async fn setup() -> (Database, TestService) {
    let db = Database::open_in_memory().await.unwrap();
    seed(&db).await;
    let service = AccountService::new(SqliteAccountStore::new(&db), fast_hasher());
    (db, service)
}

/// File-backed database with a multi-connection pool.
///
/// The returned `TempDir` must outlive the database.
pub async fn setup_file_db(max_connections: u32) -> (tempfile::TempDir, Database) {
    setup_file_db_with_timeout(max_connections, 10).await
}

/// Like [`setup_file_db`], with the busy and acquire timeout in seconds.
pub async fn setup_file_db_with_timeout(
    max_connections: u32,
    timeout_secs: u64,
) -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        path: dir.path().join("auth.db").to_string_lossy().into_owned(),
        max_connections,
        acquire_timeout_secs: timeout_secs,
    };
    let db = Database::open(&config).await.unwrap();
    seed(&db).await;
    (dir, db)
}

//! Database schema and migrations.
//!
//! Migrations are applied in order the first time a database is opened or
//! upgraded. The `schema_version` table records which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: roles
    r#"
CREATE TABLE roles (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
"#,
    // v2: users, one role each
    r#"
CREATE TABLE users (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    email          TEXT NOT NULL UNIQUE,
    password_hash  TEXT NOT NULL,           -- Argon2 PHC string
    role_id        INTEGER NOT NULL REFERENCES roles(id),
    created_at     TEXT NOT NULL,
    last_login     TEXT
);

CREATE INDEX idx_users_role_id ON users(role_id);
"#,
];

//! User and role models.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// A named permission class users belong to.
///
/// Roles are seeded ahead of time; the account service only reads them.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Role {
    /// Unique role ID.
    pub id: i64,
    /// Role name (unique), e.g. `customer`.
    pub name: String,
}

/// A registered account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique user ID, assigned by the store on insert.
    pub id: i64,
    /// Login email (unique, matched exactly).
    pub email: String,
    /// PHC-formatted password hash. Never the raw password.
    pub password_hash: String,
    /// The role this user belongs to.
    pub role: Role,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last successful authentication.
    pub last_login: Option<DateTime<Utc>>,
}

impl<'r> FromRow<'r, SqliteRow> for User {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            role: Role {
                id: row.try_get("role_id")?,
                name: row.try_get("role_name")?,
            },
            created_at: row.try_get("created_at")?,
            last_login: row.try_get("last_login")?,
        })
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login email.
    pub email: String,
    /// Password hash (already produced by a `PasswordHasher`).
    pub password_hash: String,
    /// Resolved role.
    pub role: Role,
}

impl NewUser {
    /// Create a new user record from all required fields.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            role,
        }
    }
}

/// What `UserStore::save` persists: a fresh record is inserted, an existing
/// one is updated in place.
#[derive(Debug, Clone)]
pub enum UserRecord {
    New(NewUser),
    Existing(User),
}

impl From<NewUser> for UserRecord {
    fn from(user: NewUser) -> Self {
        UserRecord::New(user)
    }
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        UserRecord::Existing(user)
    }
}

//! SQLite-backed user and role repositories.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use super::repository_traits::{AccountStore, RoleStore, UnitOfWork, UserStore};
use super::user::{Role, User, UserRecord};
use super::Database;
use crate::{AppError, Result};

/// Select list shared by every query that loads a `User`.
const USER_SELECT: &str = "SELECT u.id, u.email, u.password_hash, u.created_at, u.last_login,
        r.id AS role_id, r.name AS role_name
 FROM users u JOIN roles r ON r.id = u.role_id";

/// `AccountStore` over a SQLite pool.
#[derive(Clone)]
pub struct SqliteAccountStore {
    db: Database,
}

impl SqliteAccountStore {
    /// Create a store sharing the given database's pool.
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    type Unit = SqliteUnitOfWork;

    async fn begin(&self) -> Result<SqliteUnitOfWork> {
        let tx = self.db.begin().await?;
        Ok(SqliteUnitOfWork { tx })
    }

    async fn begin_read(&self) -> Result<SqliteUnitOfWork> {
        let tx = self.db.begin_read().await?;
        Ok(SqliteUnitOfWork { tx })
    }
}

/// One SQLite transaction. Rolled back on drop unless committed.
pub struct SqliteUnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl SqliteUnitOfWork {
    async fn get_by_id(&mut self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!("{USER_SELECT} WHERE u.id = ?"))
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl UserStore for SqliteUnitOfWork {
    async fn exists_by_email(&mut self, email: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(count > 0)
    }

    async fn find_by_email(&mut self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!("{USER_SELECT} WHERE u.email = ?"))
            .bind(email)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(user)
    }

    async fn save(&mut self, user: UserRecord) -> Result<User> {
        match user {
            UserRecord::New(new_user) => {
                let result = sqlx::query(
                    "INSERT INTO users (email, password_hash, role_id, created_at)
                     VALUES (?, ?, ?, ?)",
                )
                .bind(&new_user.email)
                .bind(&new_user.password_hash)
                .bind(new_user.role.id)
                .bind(Utc::now())
                .execute(&mut *self.tx)
                .await?;

                let id = result.last_insert_rowid();
                debug!(user_id = id, "Inserted user row");
                self.get_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("user".to_string()))
            }
            UserRecord::Existing(user) => {
                let result = sqlx::query(
                    "UPDATE users SET email = ?, password_hash = ?, role_id = ?, last_login = ?
                     WHERE id = ?",
                )
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(user.role.id)
                .bind(user.last_login)
                .bind(user.id)
                .execute(&mut *self.tx)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(AppError::NotFound("user".to_string()));
                }
                self.get_by_id(user.id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("user".to_string()))
            }
        }
    }
}

#[async_trait]
impl RoleStore for SqliteUnitOfWork {
    async fn find_by_name(&mut self, name: &str) -> Result<Option<Role>> {
        let role = sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(role)
    }
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn commit(self) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

/// Read access to users outside a unit of work.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by exact email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!("{USER_SELECT} WHERE u.email = ?"))
            .bind(email)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

/// Role provisioning. Roles are written here only, never by the account service.
pub struct RoleRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RoleRepository<'a> {
    /// Create a new RoleRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a role if no role with that name exists, and return it.
    pub async fn ensure(&self, name: &str) -> Result<Role> {
        sqlx::query("INSERT INTO roles (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
            .bind(name)
            .execute(self.pool)
            .await?;

        self.get_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role {name}")))
    }

    /// Get a role by exact name.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Role>> {
        let role = sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE name = ?")
            .bind(name)
            .fetch_optional(self.pool)
            .await?;
        Ok(role)
    }
}

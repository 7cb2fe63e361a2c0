//! Store seams used by the account service.
//!
//! The service never talks to SQL directly. It opens a unit of work from an
//! [`AccountStore`], runs its reads and writes through the [`UserStore`] and
//! [`RoleStore`] views of that unit, and commits. A unit of work dropped
//! without `commit` is rolled back.

use async_trait::async_trait;

use crate::db::{Role, User, UserRecord};
use crate::Result;

/// User lookups and writes.
#[async_trait]
pub trait UserStore: Send {
    /// Check whether a user with exactly this email exists.
    async fn exists_by_email(&mut self, email: &str) -> Result<bool>;

    /// Find a user by exact email.
    async fn find_by_email(&mut self, email: &str) -> Result<Option<User>>;

    /// Insert a new user or update an existing one.
    ///
    /// Returns the persisted record; on insert the ID is populated. A
    /// duplicate email on insert is reported as `AppError::Conflict`.
    async fn save(&mut self, user: UserRecord) -> Result<User>;
}

/// Role lookups.
#[async_trait]
pub trait RoleStore: Send {
    /// Find a role by exact name.
    async fn find_by_name(&mut self, name: &str) -> Result<Option<Role>>;
}

/// A transaction spanning user and role operations.
#[async_trait]
pub trait UnitOfWork: UserStore + RoleStore {
    /// Make every write done through this unit durable.
    async fn commit(self) -> Result<()>;
}

/// Factory for units of work.
#[async_trait]
pub trait AccountStore: Send + Sync {
    type Unit: UnitOfWork;

    /// Start a write transaction.
    async fn begin(&self) -> Result<Self::Unit>;

    /// Start a transaction for lookups only. It must not block writers.
    ///
    /// Stores without a separate read mode fall back to `begin`.
    async fn begin_read(&self) -> Result<Self::Unit> {
        self.begin().await
    }
}

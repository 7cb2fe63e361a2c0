//! ProTicket auth - user account registration and password authentication.
//!
//! An [`AccountService`] registers users against seeded roles and
//! authenticates them by Argon2 password verification, on top of a SQLite
//! store reached through the [`AccountStore`] unit-of-work seam.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod i18n;
pub mod logging;

pub use auth::{AccountError, AccountService, Argon2Hasher, PasswordError, PasswordHasher};
pub use config::Config;
pub use db::{
    AccountStore, Database, NewUser, Role, RoleRepository, RoleStore, SqliteAccountStore,
    UnitOfWork, User, UserRecord, UserRepository, UserStore,
};
pub use error::{AppError, Result};
pub use i18n::Locale;

//! Account registration and password authentication.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::auth::{PasswordError, PasswordHasher};
use crate::db::{AccountStore, NewUser, RoleStore, UnitOfWork, User, UserStore};
use crate::i18n::{t, Locale, MessageKey};
use crate::AppError;

/// Account operation errors.
#[derive(Error, Debug)]
pub enum AccountError {
    /// A user with this email already exists.
    #[error("email already registered")]
    DuplicateEmail,

    /// No role with this name exists.
    #[error("invalid role: {0}")]
    InvalidRole(String),

    /// No user with this email exists.
    #[error("user not found")]
    UserNotFound,

    /// The password does not match the stored hash.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A required input was empty.
    #[error("validation error: {0}")]
    Validation(String),

    /// The hasher failed (bad parameters or an unreadable stored hash).
    #[error("password error: {0}")]
    Hashing(#[from] PasswordError),

    /// The store failed for infrastructure reasons.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] AppError),
}

impl From<AppError> for AccountError {
    fn from(e: AppError) -> Self {
        AccountError::StoreUnavailable(e)
    }
}

impl AccountError {
    /// The message table entry for this error.
    pub fn message_key(&self) -> MessageKey {
        match self {
            AccountError::DuplicateEmail => MessageKey::EmailTaken,
            AccountError::InvalidRole(_) => MessageKey::RoleInvalid,
            AccountError::UserNotFound => MessageKey::UserNotFound,
            AccountError::InvalidCredentials => MessageKey::WrongPassword,
            AccountError::Validation(_) => MessageKey::MissingField,
            AccountError::Hashing(_) | AccountError::StoreUnavailable(_) => {
                MessageKey::ServiceUnavailable
            }
        }
    }

    /// End-user guidance for this error in the given locale.
    pub fn user_message(&self, locale: Locale) -> &'static str {
        t(locale, self.message_key())
    }
}

/// Registers users and authenticates them by password.
///
/// Holds no state of its own; the store is the only authority for users and
/// roles, so one service can be shared across tasks behind an `Arc`.
///
/// Argon2 runs on the blocking thread pool and never while a store
/// transaction is open.
pub struct AccountService<S, H> {
    store: S,
    hasher: Arc<H>,
}

impl<S, H> AccountService<S, H>
where
    S: AccountStore,
    H: PasswordHasher + 'static,
{
    pub fn new(store: S, hasher: H) -> Self {
        Self {
            store,
            hasher: Arc::new(hasher),
        }
    }

    /// Run a hasher call on the blocking pool.
    async fn with_hasher<T, F>(&self, f: F) -> Result<T, AccountError>
    where
        F: FnOnce(&H) -> Result<T, PasswordError> + Send + 'static,
        T: Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        let result = tokio::task::spawn_blocking(move || f(hasher.as_ref()))
            .await
            .map_err(|e| PasswordError::HashError(e.to_string()))?;
        Ok(result?)
    }

    /// Register a new user.
    ///
    /// The password is hashed first. The email check, role lookup and insert
    /// then run in one transaction; any error rolls all of it back. A
    /// concurrent registration that slips past the email check is caught by
    /// the store's unique constraint and reported as `DuplicateEmail` as well.
    pub async fn register(
        &self,
        email: &str,
        raw_password: &str,
        role_name: &str,
    ) -> Result<User, AccountError> {
        if email.is_empty() {
            return Err(AccountError::Validation("email must not be empty".to_string()));
        }
        if raw_password.is_empty() {
            return Err(AccountError::Validation(
                "password must not be empty".to_string(),
            ));
        }

        let plaintext = raw_password.to_owned();
        let password_hash = self.with_hasher(move |h| h.hash(&plaintext)).await?;

        let mut tx = self.store.begin().await?;

        if tx.exists_by_email(email).await? {
            return Err(AccountError::DuplicateEmail);
        }

        let role = tx
            .find_by_name(role_name)
            .await?
            .ok_or_else(|| AccountError::InvalidRole(role_name.to_string()))?;

        let user = tx
            .save(NewUser::new(email, password_hash, role).into())
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => AccountError::DuplicateEmail,
                other => AccountError::StoreUnavailable(other),
            })?;

        tx.commit().await?;

        info!(user_id = user.id, role = %user.role.name, "User registered");
        Ok(user)
    }

    /// Verify a password and record the login time.
    ///
    /// The lookup and verification happen outside the write transaction;
    /// only the `last_login` update takes the write lock. Nothing is written
    /// unless the password verifies.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let stored_hash = {
            let mut reader = self.store.begin_read().await?;
            let user = reader
                .find_by_email(email)
                .await?
                .ok_or(AccountError::UserNotFound)?;
            user.password_hash
        };

        let plaintext = password.to_owned();
        let verified = self
            .with_hasher(move |h| h.verify(&plaintext, &stored_hash))
            .await?;
        if !verified {
            return Err(AccountError::InvalidCredentials);
        }

        let mut tx = self.store.begin().await?;
        let mut user = tx
            .find_by_email(email)
            .await?
            .ok_or(AccountError::UserNotFound)?;
        user.last_login = Some(Utc::now());
        let user = tx.save(user.into()).await?;
        tx.commit().await?;

        info!(user_id = user.id, role = %user.role.name, "User authenticated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            AccountError::DuplicateEmail.to_string(),
            "email already registered"
        );
        assert_eq!(
            AccountError::InvalidRole("vip".to_string()).to_string(),
            "invalid role: vip"
        );
        assert_eq!(AccountError::UserNotFound.to_string(), "user not found");
        assert_eq!(
            AccountError::InvalidCredentials.to_string(),
            "invalid credentials"
        );
    }

    #[test]
    fn test_store_error_conversion() {
        let err: AccountError = AppError::Database("disk I/O error".to_string()).into();

        assert!(matches!(err, AccountError::StoreUnavailable(_)));
        assert!(err.to_string().contains("disk I/O error"));
    }

    #[test]
    fn test_store_error_keeps_source() {
        use std::error::Error as _;

        let err = AccountError::StoreUnavailable(AppError::Database("locked".to_string()));
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "database error: locked");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AccountError::DuplicateEmail.user_message(Locale::Es),
            "El email ya está registrado. Por favor, inicia sesión o usa otro email."
        );
        assert_eq!(
            AccountError::InvalidCredentials.user_message(Locale::En),
            "Incorrect password. Please try again."
        );
        assert_eq!(
            AccountError::StoreUnavailable(AppError::Database("x".to_string())).message_key(),
            MessageKey::ServiceUnavailable
        );
        assert_eq!(
            AccountError::Validation("email must not be empty".to_string()).message_key(),
            MessageKey::MissingField
        );
    }
}

//! Authentication module for ProTicket auth.
//!
//! This module provides password hashing and the account service that
//! registers and authenticates users.

mod account;
mod password;

pub use account::{AccountError, AccountService};
pub use password::{Argon2Hasher, PasswordError, PasswordHasher};

//! User-facing messages for account errors.
//!
//! Callers branch on error variants; these strings are only what an end user
//! reads. English is the fallback for unknown locale codes.
//!
//! ```
//! use proticket_auth::i18n::{t, Locale, MessageKey};
//!
//! let locale = Locale::from_code("es");
//! assert!(t(locale, MessageKey::UserNotFound).starts_with("Usuario no encontrado"));
//! ```

use std::fmt;

/// Default locale code.
pub const DEFAULT_LOCALE: &str = "en";

/// Supported message locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Resolve a language code such as `es` or `es-AR`. Unknown codes map to English.
    pub fn from_code(code: &str) -> Self {
        let lang = code
            .split(['-', '_'])
            .next()
            .unwrap_or(DEFAULT_LOCALE)
            .to_ascii_lowercase();
        match lang.as_str() {
            "es" => Locale::Es,
            _ => Locale::En,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Message identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    EmailTaken,
    RoleInvalid,
    UserNotFound,
    WrongPassword,
    MissingField,
    ServiceUnavailable,
}

/// Look up the message for a key in the given locale.
pub fn t(locale: Locale, key: MessageKey) -> &'static str {
    match (locale, key) {
        (Locale::En, MessageKey::EmailTaken) => {
            "This email is already registered. Please sign in or use a different email."
        }
        (Locale::En, MessageKey::RoleInvalid) => "Invalid role.",
        (Locale::En, MessageKey::UserNotFound) => {
            "User not found. Please check your email or sign up."
        }
        (Locale::En, MessageKey::WrongPassword) => "Incorrect password. Please try again.",
        (Locale::En, MessageKey::MissingField) => "Email and password are required.",
        (Locale::En, MessageKey::ServiceUnavailable) => {
            "The service is temporarily unavailable. Please try again later."
        }

        (Locale::Es, MessageKey::EmailTaken) => {
            "El email ya está registrado. Por favor, inicia sesión o usa otro email."
        }
        (Locale::Es, MessageKey::RoleInvalid) => "Rol no válido.",
        (Locale::Es, MessageKey::UserNotFound) => {
            "Usuario no encontrado. Por favor, verifica tu email o regístrate."
        }
        (Locale::Es, MessageKey::WrongPassword) => {
            "Contraseña incorrecta. Por favor, inténtalo de nuevo."
        }
        (Locale::Es, MessageKey::MissingField) => "El email y la contraseña son obligatorios.",
        (Locale::Es, MessageKey::ServiceUnavailable) => {
            "El servicio no está disponible en este momento. Inténtalo más tarde."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KEYS: [MessageKey; 6] = [
        MessageKey::EmailTaken,
        MessageKey::RoleInvalid,
        MessageKey::UserNotFound,
        MessageKey::WrongPassword,
        MessageKey::MissingField,
        MessageKey::ServiceUnavailable,
    ];

    #[test]
    fn test_from_code() {
        assert_eq!(Locale::from_code("en"), Locale::En);
        assert_eq!(Locale::from_code("es"), Locale::Es);
        assert_eq!(Locale::from_code("ES"), Locale::Es);
        assert_eq!(Locale::from_code("es-AR"), Locale::Es);
        assert_eq!(Locale::from_code("es_MX"), Locale::Es);
        assert_eq!(Locale::from_code("ja"), Locale::En);
        assert_eq!(Locale::from_code(""), Locale::En);
    }

    #[test]
    fn test_code_round_trip() {
        assert_eq!(Locale::from_code(Locale::Es.code()), Locale::Es);
        assert_eq!(Locale::default().to_string(), DEFAULT_LOCALE);
    }

    #[test]
    fn test_every_key_translated() {
        for key in ALL_KEYS {
            assert!(!t(Locale::En, key).is_empty());
            assert!(!t(Locale::Es, key).is_empty());
            assert_ne!(t(Locale::En, key), t(Locale::Es, key));
        }
    }

    #[test]
    fn test_spanish_messages() {
        assert!(t(Locale::Es, MessageKey::EmailTaken).starts_with("El email ya está registrado"));
        assert!(t(Locale::Es, MessageKey::WrongPassword).starts_with("Contraseña incorrecta"));
    }
}

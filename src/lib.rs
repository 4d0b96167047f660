//! Envios Driver Library
//!
//! A Rust client for the Khelcom shipments backend. Drivers list the
//! shipments served by a WordPress REST API and move them between a fixed
//! set of bilingual delivery states.

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use constants::*;

    #[test]
    fn test_constants_accessible() {
        assert_eq!(storage::NAMESPACE, "khelcom_prefs");
        assert_eq!(env::HOME, "ENVIOS_HOME");
        assert_eq!(status::ALL_SENTINEL, "Todos");
    }

    #[test]
    fn test_error_types() {
        let auth_error = errors::AuthError::MissingCredentials;
        let app_error = AppError::Auth(auth_error);

        assert_eq!(app_error.category(), "authentication");
        assert!(!app_error.is_recoverable());
    }
}

//! Credential management for the shipments backend
//!
//! # Examples
//!
//! ```rust,no_run
//! use envios_driver::auth::CredentialStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CredentialStore::open_default()?;
//! if !store.has_credentials() {
//!     store.save("https://khelcomtransporte.com/", "driver", "abcd efgh ijkl")?;
//! }
//! let credentials = store.credentials()?;
//! println!("Logged in as {}", credentials.username);
//! # Ok(())
//! # }
//! ```

pub mod credentials;

// Re-export main public API
pub use credentials::{
    AuthStatus, CredentialStore, Credentials, StoredCredentials, sanitize_app_password,
    sanitize_base_url, storage_dir,
};

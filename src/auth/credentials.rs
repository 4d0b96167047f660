//! Credential storage for the shipments backend
//!
//! Credentials are the backend base URL, the WordPress username and an
//! application password. They are kept in a single TOML file named after the
//! storage namespace, with owner-only permissions on Unix.

use std::env;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{env as env_constants, storage};
use crate::errors::{AuthError, AuthResult};

/// A complete, sanitized set of credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Backend base URL without trailing slash
    pub base_url: String,
    /// Trimmed username
    pub username: String,
    /// Application password with all whitespace removed
    pub app_password: String,
}

impl Credentials {
    /// Build credentials from raw form input, sanitizing every field
    pub fn new(base_url: &str, username: &str, app_password: &str) -> Self {
        Self {
            base_url: sanitize_base_url(base_url),
            username: username.trim().to_string(),
            app_password: sanitize_app_password(app_password),
        }
    }

    /// True when no field is blank
    pub fn is_complete(&self) -> bool {
        !self.base_url.trim().is_empty()
            && !self.username.trim().is_empty()
            && !self.app_password.trim().is_empty()
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("app_password", &"********")
            .finish()
    }
}

/// Strip surrounding whitespace and every trailing slash
pub fn sanitize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Remove all whitespace; application passwords are displayed in groups
pub fn sanitize_app_password(password: &str) -> String {
    password.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Fields as persisted; any of them may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub app_password: Option<String>,
}

impl StoredCredentials {
    /// Complete credentials, if every field is present and non-blank
    pub fn complete(&self) -> Option<Credentials> {
        let non_blank = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
        Some(Credentials {
            base_url: non_blank(&self.base_url)?,
            username: non_blank(&self.username)?,
            app_password: non_blank(&self.app_password)?,
        })
    }
}

/// Authentication status information
#[derive(Debug, Clone)]
pub struct AuthStatus {
    /// Stored base URL, if any
    pub base_url: Option<String>,
    /// Stored username, if any
    pub username: Option<String>,
    /// Whether a non-blank password is stored
    pub password_set: bool,
    /// Whether the credential file exists
    pub file_exists: bool,
    /// Whether credentials have been verified against the backend (None = not tested)
    pub credentials_valid: Option<bool>,
}

impl AuthStatus {
    /// Check if all three fields are available
    pub fn has_credentials(&self) -> bool {
        let set = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        set(&self.base_url) && set(&self.username) && self.password_set
    }

    /// Get descriptive status message for display
    pub fn status_message(&self) -> String {
        match (self.has_credentials(), self.credentials_valid) {
            (false, _) => "Missing credentials - run 'envios login' to configure".to_string(),
            (true, None) => "Credentials configured but not verified".to_string(),
            (true, Some(true)) => "Credentials configured and verified".to_string(),
            (true, Some(false)) => "Credentials configured but rejected by the backend".to_string(),
        }
    }
}

/// Persists credentials to a file under a storage directory
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store credentials in `dir`, which is created on first save
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir
                .as_ref()
                .join(format!("{}.toml", storage::NAMESPACE)),
        }
    }

    /// Store under `ENVIOS_HOME`, or the user config directory
    pub fn open_default() -> AuthResult<Self> {
        Ok(Self::new(storage_dir()?))
    }

    /// Location of the credential file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sanitize and persist all three fields, replacing anything stored
    pub fn save(
        &self,
        base_url: &str,
        username: &str,
        app_password: &str,
    ) -> AuthResult<Credentials> {
        let credentials = Credentials::new(base_url, username, app_password);
        let stored = StoredCredentials {
            base_url: Some(credentials.base_url.clone()),
            username: Some(credentials.username.clone()),
            app_password: Some(credentials.app_password.clone()),
        };
        let content = toml::to_string(&stored)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| self.io_error(e))?;

        // Set restrictive permissions (Unix-like systems only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = file.metadata().map_err(|e| self.io_error(e))?.permissions();
            perms.set_mode(storage::FILE_PERMISSIONS);
            file.set_permissions(perms).map_err(|e| self.io_error(e))?;
        }

        tracing::info!(
            "Saved credentials for {} at {}",
            credentials.username,
            credentials.base_url
        );
        Ok(credentials)
    }

    /// Read the stored fields; a missing file reads as all-absent
    pub fn get(&self) -> AuthResult<StoredCredentials> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(StoredCredentials::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        toml::from_str(&content).map_err(|source| AuthError::Corrupted {
            path: self.path.clone(),
            source,
        })
    }

    /// Complete stored credentials, or `MissingCredentials`
    pub fn credentials(&self) -> AuthResult<Credentials> {
        self.get()?.complete().ok_or(AuthError::MissingCredentials)
    }

    /// True iff all three fields are present and non-blank
    pub fn has_credentials(&self) -> bool {
        match self.get() {
            Ok(stored) => stored.complete().is_some(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable credential file: {}", e);
                false
            }
        }
    }

    /// Remove every stored field
    pub fn clear(&self) -> AuthResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Cleared stored credentials");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Current authentication status, without contacting the backend;
    /// `credentials_valid` is left unset
    pub fn status(&self) -> AuthStatus {
        let stored = self.get().unwrap_or_default();
        AuthStatus {
            base_url: stored.base_url,
            username: stored.username,
            password_set: stored
                .app_password
                .as_deref()
                .is_some_and(|p| !p.trim().is_empty()),
            file_exists: self.path.exists(),
            credentials_valid: None,
        }
    }

    fn io_error(&self, source: io::Error) -> AuthError {
        AuthError::CredentialStorage {
            path: self.path.clone(),
            source,
        }
    }
}

/// Directory holding local state: `ENVIOS_HOME`, else `<config dir>/envios-driver`
pub fn storage_dir() -> AuthResult<PathBuf> {
    if let Ok(home) = env::var(env_constants::HOME) {
        if !home.trim().is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join(storage::APP_DIR))
        .ok_or(AuthError::NoStorageDir)
}

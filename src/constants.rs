//! Application constants for the envios driver client
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Environment variable names
pub mod env {
    /// Overrides the directory holding stored credentials and configuration
    pub const HOME: &str = "ENVIOS_HOME";
}

/// Local credential storage
pub mod storage {
    /// Storage namespace; the credential file is named after it
    pub const NAMESPACE: &str = "khelcom_prefs";

    /// Directory name created under the user config directory
    pub const APP_DIR: &str = "envios-driver";

    /// File permissions for the credential file (Unix only) - owner read/write only
    #[cfg(unix)]
    pub const FILE_PERMISSIONS: u32 = 0o600;
}

/// Backend REST API
pub mod api {
    /// Site offered by default on the login prompt
    pub const DEFAULT_BASE_URL: &str = "https://khelcomtransporte.com";

    /// Path of the shipment listing endpoint, relative to the base URL
    pub const LIST_PATH: &str = "/wp-json/envios/v1/list";

    /// Path of the status update endpoint, relative to the base URL
    pub const UPDATE_PATH: &str = "/wp-json/envios/v1/update";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("envios-driver/", env!("CARGO_PKG_VERSION"));

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Status labels and presentation text
pub mod status {
    /// Canonical bilingual delivery states, in display order
    pub const CANONICAL: [&str; 7] = [
        "En preparación (En préparation)",
        "En espera (En attente)",
        "En tránsito (En transit)",
        "Entregado (Livré)",
        "Recogido (Ramassé)",
        "Cancelado (Annulé)",
        "Devuelto (Retourné)",
    ];

    /// Filter selection meaning "every shipment"
    pub const ALL_SENTINEL: &str = "Todos";

    /// Markers identifying a delivered shipment in either language
    pub const DELIVERED_MARKERS: [&str; 2] = ["entregado", "livré"];

    /// Rendered in place of a missing title
    pub const UNTITLED: &str = "Sin título";

    /// Rendered in place of a missing or blank status
    pub const UNKNOWN: &str = "—";
}

/// Configuration file locations
pub mod config {
    /// Project-local configuration file name
    pub const LOCAL_FILE: &str = "envios.toml";

    /// Configuration file name inside the application directory
    pub const FILE_NAME: &str = "config.toml";
}

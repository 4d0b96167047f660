//! Core application logic for the envios driver client
//!
//! This module contains the backend HTTP client, the shipment models, the
//! status catalog and the controller that ties them together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use envios_driver::app::{ApiClient, ShipmentListController, StatusFilter};
//! use envios_driver::auth::CredentialStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = CredentialStore::open_default()?.credentials()?;
//! let mut controller = ShipmentListController::new(ApiClient::new(credentials)?);
//!
//! controller.refresh().await;
//! for shipment in controller.filtered_view(&StatusFilter::parse("En tránsito (En transit)")).iter() {
//!     println!("{} - {}", shipment.id, shipment.display_title());
//! }
//!
//! let report = controller.update_status(42, "Entregado (Livré)").await;
//! println!("{}", report.notice());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod controller;
pub mod models;
pub mod status;

// Re-export main public API
pub use client::{ApiClient, ClientConfig, ShipmentApi, decode_shipments};
pub use controller::{LoadState, ShipmentListController, UpdateReport};
pub use models::{Shipment, UpdateOutcome, UpdateRequest};
pub use status::{
    StatusCatalog, StatusFilter, filter_shipments, is_delivered, normalize, same_status,
};

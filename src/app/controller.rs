//! Shipment list orchestration
//!
//! The controller owns the backend client and the last loaded list. Each load
//! cycle moves `Idle → Loading → {Loaded, Failed}`. Operations take `&mut self`,
//! so one controller can never have two requests in flight.

use std::borrow::Cow;

use crate::app::client::ShipmentApi;
use crate::app::models::{Shipment, UpdateOutcome};
use crate::app::status::{filter_shipments, StatusFilter};
use crate::errors::ApiError;

/// Where the controller is in its load cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Last load failed with this message
    Failed(String),
}

/// What happened when a status update was requested
#[derive(Debug)]
pub struct UpdateReport {
    /// Shipment the update targeted
    pub id: i64,
    /// Status the driver asked for
    pub requested_status: String,
    /// Backend answer, or the transport error that prevented one
    pub result: Result<UpdateOutcome, ApiError>,
}

impl UpdateReport {
    /// Confirmation shown to the driver; names the requested status, which is
    /// not necessarily what the refreshed list shows
    pub fn notice(&self) -> String {
        format!("Estado actualizado a \"{}\"", self.requested_status)
    }

    /// Whether the backend accepted the change
    pub fn is_applied(&self) -> bool {
        matches!(&self.result, Ok(outcome) if outcome.is_applied())
    }

    /// Failure description, if the update did not go through
    pub fn failure(&self) -> Option<String> {
        match &self.result {
            Ok(outcome) if outcome.is_applied() => None,
            Ok(outcome) => Some(outcome.describe()),
            Err(e) => Some(e.to_string()),
        }
    }
}

/// Loads shipments, applies updates and serves filtered views
pub struct ShipmentListController<A> {
    api: A,
    state: LoadState,
    shipments: Vec<Shipment>,
}

impl<A: ShipmentApi> ShipmentListController<A> {
    /// Creates an idle controller with an empty list
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: LoadState::Idle,
            shipments: Vec::new(),
        }
    }

    /// Reload the list from the backend
    ///
    /// On failure the list is emptied and the error message recorded in
    /// [`LoadState::Failed`].
    pub async fn refresh(&mut self) -> &LoadState {
        self.state = LoadState::Loading;

        match self.api.list_shipments().await {
            Ok(shipments) => {
                tracing::debug!("Loaded {} shipments", shipments.len());
                self.shipments = shipments;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::error!("Failed to load shipments: {}", e);
                self.shipments.clear();
                self.state = LoadState::Failed(e.to_string());
            }
        }

        &self.state
    }

    /// Request a status change, then reload the list whatever the outcome
    pub async fn update_status(&mut self, id: i64, new_status: &str) -> UpdateReport {
        self.state = LoadState::Loading;

        let result = self.api.update_shipment(id, new_status).await;
        match &result {
            Ok(UpdateOutcome::Applied { .. }) => {}
            Ok(rejected) => {
                tracing::warn!("Update of shipment {} not applied: {}", id, rejected.describe())
            }
            Err(e) => tracing::warn!("Update of shipment {} failed: {}", id, e),
        }

        self.refresh().await;

        UpdateReport {
            id,
            requested_status: new_status.to_string(),
            result,
        }
    }

    /// Shipments passing `filter`; `All` borrows the current list as is
    pub fn filtered_view(&self, filter: &StatusFilter) -> Cow<'_, [Shipment]> {
        filter_shipments(&self.shipments, filter)
    }

    /// Current load state
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// True while a request is outstanding
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Message of the last failed load
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Every shipment from the last successful load
    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    /// The backend client
    pub fn api(&self) -> &A {
        &self.api
    }
}

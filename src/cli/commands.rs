//! Command handlers for the envios CLI
//!
//! This module implements the command handlers that connect CLI arguments to
//! the credential store, the API client and the shipment list controller.

use std::io::{self, Write};

use tracing::{info, warn};

use crate::app::{
    is_delivered, same_status, ApiClient, LoadState, Shipment, ShipmentListController,
    StatusCatalog, StatusFilter,
};
use crate::auth::{AuthStatus, CredentialStore, Credentials};
use crate::cli::{ListArgs, LoginArgs, UpdateArgs};
use crate::config::AppConfig;
use crate::constants::api;
use crate::errors::{ApiError, AppError, AuthError, Result};

/// Handle the login command
///
/// Prompts for whatever was not given on the command line, stores the
/// sanitized credentials and, unless told otherwise, checks them by loading
/// the shipment list once.
pub async fn handle_login(args: LoginArgs, config: &AppConfig, store: &CredentialStore) -> Result<()> {
    let stored = store.get()?;

    let url = match args.url {
        Some(url) => url,
        None => {
            let default = stored
                .base_url
                .clone()
                .unwrap_or_else(|| api::DEFAULT_BASE_URL.to_string());
            prompt_with_default("URL del sitio (https://...)", &default)?
        }
    };
    let username = match args.username {
        Some(username) => username,
        None => prompt_with_default(
            "Usuario WordPress",
            stored.username.as_deref().unwrap_or_default(),
        )?,
    };
    let password = rpassword::prompt_password("Application Password: ")?;

    let credentials = Credentials::new(&url, &username, &password);
    if !credentials.is_complete() {
        return Err(AppError::generic(
            "URL, username and application password are all required",
        ));
    }

    let credentials = store.save(&url, &username, &password)?;
    println!("💾 Credentials saved to {}", store.path().display());

    if args.no_verify {
        return Ok(());
    }

    println!("🔍 Checking credentials against {}...", credentials.base_url);
    let client = ApiClient::with_config(credentials, config.client.clone())?;
    match client.list_shipments().await {
        Ok(shipments) => {
            println!("✅ Logged in. {} shipments available.", shipments.len());
            Ok(())
        }
        Err(e @ ApiError::Remote { status, .. }) if status == 401 || status == 403 => {
            warn!("Backend rejected credentials with HTTP {}", status);
            println!("❌ The backend rejected these credentials (HTTP {}).", status);
            println!("   Run 'envios login' again to re-enter them.");
            Err(AppError::Api(e))
        }
        Err(e) => {
            println!("⚠️  Credentials saved, but the backend could not be checked: {}", e);
            Ok(())
        }
    }
}

/// Handle the logout command
pub fn handle_logout(store: &CredentialStore) -> Result<()> {
    store.clear()?;
    println!("🗑️  Stored credentials cleared.");
    Ok(())
}

/// Stored authentication status, checked against the backend
///
/// A complete set of credentials is tried with one list request: success
/// marks them valid, HTTP 401 or 403 marks them rejected. Any other failure
/// leaves them unverified.
pub async fn check_status(config: &AppConfig, store: &CredentialStore) -> Result<AuthStatus> {
    let mut status = store.status();
    if !status.has_credentials() {
        return Ok(status);
    }

    let client = ApiClient::with_config(store.credentials()?, config.client.clone())?;
    status.credentials_valid = match client.list_shipments().await {
        Ok(_) => Some(true),
        Err(ApiError::Remote { status, .. }) if status == 401 || status == 403 => Some(false),
        Err(e) => {
            warn!("Could not verify credentials: {}", e);
            None
        }
    };

    Ok(status)
}

/// Handle the status command
pub async fn handle_status(config: &AppConfig, store: &CredentialStore) -> Result<()> {
    let status = check_status(config, store).await?;

    println!("Envios Authentication Status");
    println!("============================");
    println!();
    println!(
        "Site:     {}",
        status.base_url.as_deref().unwrap_or("Not set")
    );
    println!(
        "Username: {}",
        status.username.as_deref().unwrap_or("Not set")
    );
    println!(
        "Password: {}",
        if status.password_set { "Set" } else { "Not set" }
    );
    println!(
        "File:     {} ({})",
        store.path().display(),
        if status.file_exists { "exists" } else { "not found" }
    );
    println!();
    println!("Status: {}", status.status_message());

    Ok(())
}

/// Handle the statuses command
pub fn handle_statuses() -> Result<()> {
    for (index, label) in StatusCatalog.labels().iter().enumerate() {
        println!("{}. {}", index + 1, label);
    }
    Ok(())
}

/// Handle the list command
pub async fn handle_list(args: ListArgs, config: &AppConfig, store: &CredentialStore) -> Result<()> {
    let filter = args.filter();
    let mut controller = connect(config, store)?;

    info!("Loading shipments (filter: {})", filter);
    if let LoadState::Failed(message) = controller.refresh().await {
        return Err(AppError::generic(format!("Error: {}", message)));
    }

    let view = controller.filtered_view(&filter);
    println!("{}", render_filter_bar(&filter));
    println!("Mostrando: {}", view.len());
    println!();

    for shipment in view.iter() {
        println!("{}", render_shipment(shipment));
    }

    Ok(())
}

/// Handle the update command
pub async fn handle_update(args: UpdateArgs, config: &AppConfig, store: &CredentialStore) -> Result<()> {
    let label = args.validate().map_err(AppError::generic)?;
    let mut controller = connect(config, store)?;

    info!("Updating shipment {} to {:?}", args.id, label);
    let report = controller.update_status(args.id, label).await;

    if let Some(failure) = report.failure() {
        println!("❌ Shipment {} was not updated: {}", args.id, failure);
        return Err(match report.result {
            Err(e) => AppError::Api(e),
            Ok(_) => AppError::generic(failure),
        });
    }

    println!("✅ {}", report.notice());
    match controller
        .shipments()
        .iter()
        .find(|shipment| shipment.id == args.id)
    {
        Some(shipment) => println!("{}", render_shipment(shipment)),
        None if controller.error().is_some() => {
            println!("⚠️  Could not reload the list: {}", controller.error().unwrap_or_default())
        }
        None => println!("⚠️  Shipment {} is no longer listed", args.id),
    }

    Ok(())
}

/// Build a controller from stored credentials
fn connect(config: &AppConfig, store: &CredentialStore) -> Result<ShipmentListController<ApiClient>> {
    let credentials = store.credentials().map_err(|e| match e {
        AuthError::MissingCredentials => {
            AppError::generic("Not logged in. Run 'envios login' first")
        }
        other => AppError::Auth(other),
    })?;
    let client = ApiClient::with_config(credentials, config.client.clone())?;
    Ok(ShipmentListController::new(client))
}

/// One line of filter chips with the selection bracketed
pub fn render_filter_bar(selected: &StatusFilter) -> String {
    StatusFilter::choices()
        .into_iter()
        .map(|choice| {
            let is_selected = match (StatusFilter::parse(choice), selected) {
                (StatusFilter::All, StatusFilter::All) => true,
                (StatusFilter::Status(label), StatusFilter::Status(wanted)) => {
                    same_status(&label, wanted)
                }
                _ => false,
            };
            if is_selected {
                format!("[{}]", choice)
            } else {
                choice.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Render a shipment as a text card
pub fn render_shipment(shipment: &Shipment) -> String {
    let status = shipment.display_status();
    let badge = if is_delivered(status) { "✅" } else { "🚚" };

    let mut lines = vec![
        format!("#{} {}", shipment.id, shipment.display_title()),
        format!("   {} Estado: {}", badge, status),
    ];
    if let Some(dest) = shipment.destination() {
        lines.push(format!("   Destino: {}", dest));
    }
    if let Some(track) = shipment.track.as_deref().filter(|t| !t.trim().is_empty()) {
        lines.push(format!("   Seguimiento: {}", track));
    }

    let options = StatusCatalog.available_transitions(shipment.status_or_empty());
    let numbered = options
        .iter()
        .map(|label| {
            let index = StatusCatalog
                .labels()
                .iter()
                .position(|l| l == label)
                .map(|i| i + 1)
                .unwrap_or_default();
            format!("{}. {}", index, label)
        })
        .collect::<Vec<_>>();
    lines.push(format!(
        "   Para actualizar: envios update {} <N>  ({})",
        shipment.id,
        numbered.join(", ")
    ));

    lines.join("\n")
}

/// Prompt on stdout, returning `default` for an empty answer
fn prompt_with_default(label: &str, default: &str) -> Result<String> {
    if default.is_empty() {
        print!("{}: ", label);
    } else {
        print!("{} [{}]: ", label, default);
    }
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim();

    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    })
}

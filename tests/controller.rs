//! Controller and CLI command tests against a mock backend

mod common;

use common::{LIST_PATH, MockBackend, UPDATE_PATH};
use envios_driver::app::{ApiClient, LoadState, ShipmentListController, StatusFilter};
use envios_driver::auth::CredentialStore;
use envios_driver::cli::{ListArgs, UpdateArgs, check_status, handle_list, handle_update};
use envios_driver::config::AppConfig;
use tempfile::TempDir;

const TWO_SHIPMENTS: &str = r#"[
    {"id":1,"title":"Box A","status":"En tránsito (En transit)","dest":"Dakar"},
    {"id":2,"title":"Box B","status":"  entregado (LIVRÉ) ","track":"TRK-2"}
]"#;

#[tokio::test]
async fn test_refresh_and_filter() {
    let backend = MockBackend::start().await;
    backend.respond(LIST_PATH, 200, TWO_SHIPMENTS);

    let client = ApiClient::new(backend.credentials()).unwrap();
    let mut controller = ShipmentListController::new(client);

    assert_eq!(controller.refresh().await, &LoadState::Loaded);
    assert_eq!(controller.shipments().len(), 2);

    let delivered = controller.filtered_view(&StatusFilter::parse("Entregado (Livré)"));
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].id, 2);

    let all = controller.filtered_view(&StatusFilter::parse("Todos"));
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_refresh_failure_records_message() {
    let backend = MockBackend::start().await;
    backend.respond(LIST_PATH, 401, "rest_forbidden");

    let client = ApiClient::new(backend.credentials()).unwrap();
    let mut controller = ShipmentListController::new(client);
    controller.refresh().await;

    assert!(controller.shipments().is_empty());
    assert_eq!(controller.error(), Some("Error 401: rest_forbidden"));
}

#[tokio::test]
async fn test_update_posts_then_reloads() {
    let backend = MockBackend::start().await;
    backend.respond(LIST_PATH, 200, TWO_SHIPMENTS);
    backend.respond(UPDATE_PATH, 200, "{\"ok\":true}");

    let client = ApiClient::new(backend.credentials()).unwrap();
    let mut controller = ShipmentListController::new(client);
    let report = controller.update_status(1, "Entregado (Livré)").await;

    assert!(report.is_applied());
    assert_eq!(report.notice(), "Estado actualizado a \"Entregado (Livré)\"");
    assert_eq!(controller.state(), &LoadState::Loaded);

    let paths: Vec<(String, String)> = backend
        .requests()
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();
    assert_eq!(
        paths,
        vec![
            ("POST".to_string(), UPDATE_PATH.to_string()),
            ("GET".to_string(), LIST_PATH.to_string()),
        ]
    );
}

#[tokio::test]
async fn test_failed_update_still_reloads() {
    let backend = MockBackend::start().await;
    backend.respond(LIST_PATH, 200, TWO_SHIPMENTS);
    backend.respond(UPDATE_PATH, 500, "oops");

    let client = ApiClient::new(backend.credentials()).unwrap();
    let mut controller = ShipmentListController::new(client);
    let report = controller.update_status(1, "Devuelto (Retourné)").await;

    assert!(!report.is_applied());
    assert!(report.failure().unwrap().contains("500"));
    assert_eq!(controller.shipments().len(), 2);
    assert_eq!(backend.requests().len(), 2);
}

#[tokio::test]
async fn test_cli_list_and_update_with_stored_credentials() {
    let backend = MockBackend::start().await;
    backend.respond(LIST_PATH, 200, TWO_SHIPMENTS);
    backend.respond(UPDATE_PATH, 200, "{\"ok\":true}");

    let temp_dir = TempDir::new().unwrap();
    let store = CredentialStore::new(temp_dir.path());
    store.save(&backend.base_url(), "u", "p").unwrap();
    let config = AppConfig::default();

    let list = ListArgs {
        status: "4".to_string(),
    };
    handle_list(list, &config, &store).await.unwrap();

    let update = UpdateArgs {
        id: 1,
        status: "4".to_string(),
    };
    handle_update(update, &config, &store).await.unwrap();

    let requests = backend.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[1].body.contains("Entregado (Livré)"));
}

#[tokio::test]
async fn test_cli_update_reports_rejection() {
    let backend = MockBackend::start().await;
    backend.respond(LIST_PATH, 200, "[]");
    backend.respond(UPDATE_PATH, 403, "forbidden");

    let temp_dir = TempDir::new().unwrap();
    let store = CredentialStore::new(temp_dir.path());
    store.save(&backend.base_url(), "u", "p").unwrap();

    let update = UpdateArgs {
        id: 1,
        status: "2".to_string(),
    };
    let err = handle_update(update, &AppConfig::default(), &store)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("403"));
}

#[tokio::test]
async fn test_status_verifies_stored_credentials() {
    let backend = MockBackend::start().await;
    backend.respond(LIST_PATH, 200, "[]");

    let temp_dir = TempDir::new().unwrap();
    let store = CredentialStore::new(temp_dir.path());
    let config = AppConfig::default();

    // Nothing stored: no request is made
    let status = check_status(&config, &store).await.unwrap();
    assert!(!status.has_credentials());
    assert_eq!(status.credentials_valid, None);
    assert!(backend.requests().is_empty());

    store.save(&backend.base_url(), "u", "p").unwrap();
    let status = check_status(&config, &store).await.unwrap();
    assert_eq!(status.credentials_valid, Some(true));
    assert!(status.status_message().contains("verified"));

    backend.respond(LIST_PATH, 401, "rest_forbidden");
    let status = check_status(&config, &store).await.unwrap();
    assert_eq!(status.credentials_valid, Some(false));
    assert!(status.status_message().contains("rejected"));

    backend.respond(LIST_PATH, 500, "database down");
    let status = check_status(&config, &store).await.unwrap();
    assert_eq!(status.credentials_valid, None);
    assert!(status.status_message().contains("not verified"));
}

use std::collections::BTreeSet;

use fleet_ledger::error::LedgerError;
use fleet_ledger::ledger::FleetLedger;
use fleet_ledger::models::client::Client;
use fleet_ledger::models::driver::{Driver, DriverStatus};
use fleet_ledger::models::request::{RequestAction, RequestStatus, WaybillFile};
use fleet_ledger::models::truck::Truck;
use fleet_ledger::seed::{demo_fleet, SeedData};
use fleet_ledger::service::{spawn_service, LedgerHandle};

fn setup() -> LedgerHandle {
    let seed = SeedData {
        drivers: vec![
            driver("d1"),
            driver("d2"),
        ],
        clients: vec![Client {
            id: "o1".to_string(),
            name: "Berbera Cement Traders".to_string(),
            phone: "+252 63 4209914".to_string(),
            assigned_drivers: BTreeSet::new(),
        }],
        trucks: vec![Truck {
            id: "t1".to_string(),
            plate: "BRB-1042".to_string(),
            available: true,
            driver_id: Some("d1".to_string()),
        }],
        requests: vec![],
    };

    spawn_service(FleetLedger::load(seed), 64)
}

fn driver(id: &str) -> Driver {
    Driver {
        id: id.to_string(),
        name: format!("driver {id}"),
        phone: "+252 63 0000000".to_string(),
        truck_id: None,
        status: DriverStatus::Idle,
        assigned_client_id: None,
        verified: true,
        rating: 4.5,
    }
}

#[tokio::test]
async fn full_lifecycle_through_the_handle() {
    let handle = setup();

    let request = handle
        .create_request("o1", "d1", "Cement bags", "Berbera", "Hargeisa")
        .await
        .unwrap();
    assert_eq!(request.status, RequestStatus::Pending);

    let available = handle.available_drivers().await.unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, "d2");

    let outcome = handle
        .respond_to_request(&request.id, RequestAction::Approve)
        .await
        .unwrap();
    assert_eq!(outcome.request().status, RequestStatus::ApprovedByDriver);

    let outcome = handle
        .respond_to_request(&request.id, RequestAction::Accept)
        .await
        .unwrap();
    assert_eq!(outcome.request().status, RequestStatus::Accepted);

    let updated = handle
        .update_driver_status("d1", DriverStatus::Loading, Some(WaybillFile::new("wb1.pdf")))
        .await
        .unwrap();
    assert_eq!(updated.status, DriverStatus::Loading);

    let with_waybill = handle
        .upload_client_waybill(&request.id, WaybillFile::new("wb-client.pdf"))
        .await
        .unwrap();
    assert!(with_waybill
        .client_waybill
        .as_deref()
        .unwrap()
        .contains("wb-client.pdf"));
    assert!(with_waybill
        .driver_waybill
        .as_deref()
        .unwrap()
        .contains("wb1.pdf"));

    let outcome = handle
        .respond_to_request(&request.id, RequestAction::Complete)
        .await
        .unwrap();
    assert_eq!(outcome.request().status, RequestStatus::Completed);

    let snapshot = handle.snapshot().await.unwrap();
    let d1 = snapshot.drivers.iter().find(|d| d.id == "d1").unwrap();
    assert_eq!(d1.status, DriverStatus::Idle);
    assert!(d1.assigned_client_id.is_none());

    let o1 = snapshot.clients.iter().find(|c| c.id == "o1").unwrap();
    assert!(o1.assigned_drivers.is_empty());

    let stats = handle.stats().await.unwrap();
    assert_eq!(stats.requests_total, 1);
    assert_eq!(stats.requests_created_7d, 1);
    assert_eq!(stats.requests_processed_7d, 1);
}

#[tokio::test]
async fn errors_cross_the_channel_intact() {
    let handle = setup();

    let err = handle
        .create_request("o9", "d1", "Cement bags", "Berbera", "Hargeisa")
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { entity: "client", .. }));

    handle
        .create_request("o1", "d1", "Cement bags", "Berbera", "Hargeisa")
        .await
        .unwrap();
    let err = handle
        .create_request("o1", "d1", "Charcoal", "Burco", "Berbera")
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::ConstraintViolation(_)));
}

#[tokio::test]
async fn metrics_expose_operation_counters() {
    let handle = setup();

    let request = handle
        .create_request("o1", "d1", "Cement bags", "Berbera", "Hargeisa")
        .await
        .unwrap();
    handle
        .respond_to_request(&request.id, RequestAction::Accept)
        .await
        .unwrap();
    // Second accept lands in the ignored bucket.
    handle
        .respond_to_request(&request.id, RequestAction::Accept)
        .await
        .unwrap();

    let text = handle.metrics().encode().unwrap();
    assert!(text.contains(
        "ledger_operations_total{operation=\"create_request\",outcome=\"applied\"} 1"
    ));
    assert!(text.contains(
        "ledger_operations_total{operation=\"respond_to_request\",outcome=\"applied\"} 1"
    ));
    assert!(text.contains(
        "ledger_operations_total{operation=\"respond_to_request\",outcome=\"ignored\"} 1"
    ));
    assert!(text.contains("operation_latency_seconds"));
    assert!(text.contains("live_requests 1"));
    assert!(text.contains("drivers_available 1"));
}

#[tokio::test]
async fn demo_fleet_seeds_a_working_ledger() {
    let handle = spawn_service(FleetLedger::load(demo_fleet()), 64);

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.drivers.len(), 4);
    assert_eq!(snapshot.clients.len(), 2);
    assert_eq!(snapshot.trucks.len(), 4);
    // The seeded history is settled, so every driver is free.
    assert_eq!(handle.available_drivers().await.unwrap().len(), 4);

    let trucks = handle.available_trucks().await.unwrap();
    assert!(trucks.iter().all(|t| t.available));

    handle
        .create_request("o1", "d1", "Cement bags", "Berbera", "Hargeisa")
        .await
        .unwrap();
    handle
        .respond_to_request(
            &handle.snapshot().await.unwrap().requests.last().unwrap().id,
            RequestAction::Accept,
        )
        .await
        .unwrap();
    handle
        .update_driver_status("d1", DriverStatus::InTransit, None)
        .await
        .unwrap();

    let active = handle.active_deliveries().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "d1");
}

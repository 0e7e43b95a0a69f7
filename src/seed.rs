use std::collections::BTreeSet;

use chrono::{Duration, Utc};

use crate::models::client::Client;
use crate::models::driver::{Driver, DriverStatus};
use crate::models::request::{RequestStatus, ShipmentRequest};
use crate::models::truck::Truck;

/// Startup collections handed to the ledger in one piece.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub drivers: Vec<Driver>,
    pub clients: Vec<Client>,
    pub trucks: Vec<Truck>,
    pub requests: Vec<ShipmentRequest>,
}

/// A small fleet to exercise the ledger without external input: four
/// drivers around the Berbera corridor, two cargo owners, and a couple
/// of already settled requests so the trailing stats have history.
pub fn demo_fleet() -> SeedData {
    let now = Utc::now();

    SeedData {
        drivers: vec![
            driver("d1", "Axmed Warsame", "+252 63 4410182", Some("t1"), true, 4.6),
            driver("d2", "Hodan Jaamac", "+252 63 4427755", Some("t2"), true, 4.9),
            driver("d3", "Maxamed Geelle", "+252 63 4480021", Some("t3"), false, 3.8),
            driver("d4", "Sahra Ducaale", "+252 63 4455307", None, true, 4.2),
        ],
        clients: vec![
            client("o1", "Berbera Cement Traders", "+252 63 4209914"),
            client("o2", "Saylac Import Export", "+252 63 4231168"),
        ],
        trucks: vec![
            truck("t1", "BRB-1042", true, Some("d1")),
            truck("t2", "HGA-7733", true, Some("d2")),
            truck("t3", "HGA-2018", false, Some("d3")),
            truck("t4", "BRB-5561", true, None),
        ],
        requests: vec![
            settled_request(
                "req-seed-1",
                "o1",
                "d2",
                "Cement bags",
                "Berbera",
                "Hargeisa",
                RequestStatus::Completed,
                now - Duration::days(3),
            ),
            settled_request(
                "req-seed-2",
                "o2",
                "d3",
                "Refrigerated goods",
                "Berbera",
                "Burco",
                RequestStatus::Rejected,
                now - Duration::days(12),
            ),
        ],
    }
}

fn driver(
    id: &str,
    name: &str,
    phone: &str,
    truck_id: Option<&str>,
    verified: bool,
    rating: f64,
) -> Driver {
    Driver {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        truck_id: truck_id.map(str::to_string),
        status: DriverStatus::Idle,
        assigned_client_id: None,
        verified,
        rating,
    }
}

fn client(id: &str, name: &str, phone: &str) -> Client {
    Client {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        assigned_drivers: BTreeSet::new(),
    }
}

fn truck(id: &str, plate: &str, available: bool, driver_id: Option<&str>) -> Truck {
    Truck {
        id: id.to_string(),
        plate: plate.to_string(),
        available,
        driver_id: driver_id.map(str::to_string),
    }
}

#[allow(clippy::too_many_arguments)]
fn settled_request(
    id: &str,
    client_id: &str,
    driver_id: &str,
    cargo: &str,
    origin: &str,
    destination: &str,
    status: RequestStatus,
    created_at: chrono::DateTime<Utc>,
) -> ShipmentRequest {
    ShipmentRequest {
        id: id.to_string(),
        client_id: client_id.to_string(),
        driver_id: driver_id.to_string(),
        cargo: cargo.to_string(),
        origin: origin.to_string(),
        destination: destination.to_string(),
        status,
        created_at,
        driver_waybill: None,
        client_waybill: None,
        current_driver_status: None,
    }
}

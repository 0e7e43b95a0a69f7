pub mod lifecycle;
pub mod queries;
pub mod stats;

use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

use crate::models::client::Client;
use crate::models::driver::{Driver, DriverStatus};
use crate::models::request::ShipmentRequest;
use crate::models::truck::Truck;
use crate::seed::SeedData;

/// In-memory domain state: the four entity collections keyed by id, with
/// insertion order preserved for display.
#[derive(Debug, Default)]
pub struct FleetLedger {
    drivers: IndexMap<String, Driver>,
    clients: IndexMap<String, Client>,
    trucks: IndexMap<String, Truck>,
    requests: IndexMap<String, ShipmentRequest>,
}

/// Cloned view of all four collections, in insertion order. Consumers
/// re-read a fresh snapshot after every operation.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerSnapshot {
    pub drivers: Vec<Driver>,
    pub clients: Vec<Client>,
    pub trucks: Vec<Truck>,
    pub requests: Vec<ShipmentRequest>,
}

impl FleetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest the startup collections. Records are stored as given, in
    /// order; driver ratings are clamped to the 0-5 scale.
    pub fn load(seed: SeedData) -> Self {
        let mut ledger = Self::new();

        for mut driver in seed.drivers {
            driver.rating = driver.rating.clamp(0.0, 5.0);
            ledger.drivers.insert(driver.id.clone(), driver);
        }
        for client in seed.clients {
            ledger.clients.insert(client.id.clone(), client);
        }
        for truck in seed.trucks {
            ledger.trucks.insert(truck.id.clone(), truck);
        }
        for request in seed.requests {
            ledger.requests.insert(request.id.clone(), request);
        }

        ledger
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            drivers: self.drivers.values().cloned().collect(),
            clients: self.clients.values().cloned().collect(),
            trucks: self.trucks.values().cloned().collect(),
            requests: self.requests.values().cloned().collect(),
        }
    }

    pub fn get_driver(&self, id: &str) -> Option<&Driver> {
        self.drivers.get(id)
    }

    pub fn get_client(&self, id: &str) -> Option<&Client> {
        self.clients.get(id)
    }

    pub fn get_truck(&self, id: &str) -> Option<&Truck> {
        self.trucks.get(id)
    }

    pub fn get_request(&self, id: &str) -> Option<&ShipmentRequest> {
        self.requests.get(id)
    }

    pub(crate) fn fresh_request_id() -> String {
        format!("req-{}", Uuid::new_v4())
    }

    pub(crate) fn has_live_request(&self, driver_id: &str) -> bool {
        self.requests
            .values()
            .any(|request| request.driver_id == driver_id && !request.status.is_terminal())
    }

    /// Refresh the informational driver-status mirror on every request
    /// referencing the driver, regardless of request status.
    pub(crate) fn mirror_driver_status(&mut self, driver_id: &str, status: DriverStatus) {
        for request in self.requests.values_mut() {
            if request.driver_id == driver_id {
                request.current_driver_status = Some(status);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::FleetLedger;
    use crate::models::client::Client;
    use crate::models::driver::{Driver, DriverStatus};
    use crate::seed::SeedData;

    fn driver(id: &str, rating: f64) -> Driver {
        Driver {
            id: id.to_string(),
            name: format!("driver {id}"),
            phone: "+252 63 0000000".to_string(),
            truck_id: None,
            status: DriverStatus::Idle,
            assigned_client_id: None,
            verified: true,
            rating,
        }
    }

    #[test]
    fn load_clamps_driver_ratings() {
        let seed = SeedData {
            drivers: vec![driver("d1", 9.9), driver("d2", -1.0)],
            ..SeedData::default()
        };

        let ledger = FleetLedger::load(seed);

        assert_eq!(ledger.get_driver("d1").unwrap().rating, 5.0);
        assert_eq!(ledger.get_driver("d2").unwrap().rating, 0.0);
    }

    #[test]
    fn snapshot_preserves_insertion_order() {
        let seed = SeedData {
            drivers: vec![driver("d2", 4.0), driver("d1", 4.0)],
            clients: vec![Client {
                id: "o1".to_string(),
                name: "owner".to_string(),
                phone: "+252 63 0000001".to_string(),
                assigned_drivers: BTreeSet::new(),
            }],
            ..SeedData::default()
        };

        let snapshot = FleetLedger::load(seed).snapshot();

        let ids: Vec<&str> = snapshot.drivers.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["d2", "d1"]);
    }

    #[test]
    fn fresh_request_ids_are_unique() {
        let a = FleetLedger::fresh_request_id();
        let b = FleetLedger::fresh_request_id();
        assert!(a.starts_with("req-"));
        assert_ne!(a, b);
    }
}

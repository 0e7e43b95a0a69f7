use crate::ledger::FleetLedger;
use crate::models::driver::{Driver, DriverStatus};
use crate::models::truck::Truck;

impl FleetLedger {
    /// Drivers free to take a new request: idle and not referenced by any
    /// request in a non-terminal status.
    pub fn available_drivers(&self) -> Vec<Driver> {
        self.drivers
            .values()
            .filter(|driver| {
                driver.status == DriverStatus::Idle && !self.has_live_request(&driver.id)
            })
            .cloned()
            .collect()
    }

    pub fn available_trucks(&self) -> Vec<Truck> {
        self.trucks
            .values()
            .filter(|truck| truck.available)
            .cloned()
            .collect()
    }

    /// Drivers currently out on a delivery.
    pub fn active_deliveries(&self) -> Vec<Driver> {
        self.drivers
            .values()
            .filter(|driver| {
                driver.status != DriverStatus::Idle && driver.assigned_client_id.is_some()
            })
            .cloned()
            .collect()
    }

    pub fn live_request_count(&self) -> usize {
        self.requests
            .values()
            .filter(|request| !request.status.is_terminal())
            .count()
    }
}

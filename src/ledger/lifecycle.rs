use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::LedgerError;
use crate::ledger::FleetLedger;
use crate::models::driver::{Driver, DriverStatus};
use crate::models::request::{RequestAction, RequestStatus, ShipmentRequest, WaybillFile};

/// Result of answering a request. A transition either applies, or the
/// action is ignored because the current status does not admit it —
/// ignored actions are benign, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    Applied(ShipmentRequest),
    Ignored(ShipmentRequest),
}

impl TransitionOutcome {
    pub fn request(&self) -> &ShipmentRequest {
        match self {
            Self::Applied(request) | Self::Ignored(request) => request,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

fn waybill_reference(request_id: &str, side: &str, file: &WaybillFile) -> String {
    format!("waybills/{request_id}/{side}/{}", file.name)
}

impl FleetLedger {
    /// Open a new shipment request from a client to a driver. The request
    /// starts pending and the driver is flagged as awaiting a response.
    pub fn create_request(
        &mut self,
        client_id: &str,
        driver_id: &str,
        cargo: &str,
        origin: &str,
        destination: &str,
    ) -> Result<ShipmentRequest, LedgerError> {
        if !self.clients.contains_key(client_id) {
            return Err(LedgerError::not_found("client", client_id));
        }
        if !self.drivers.contains_key(driver_id) {
            return Err(LedgerError::not_found("driver", driver_id));
        }
        if self.has_live_request(driver_id) {
            return Err(LedgerError::constraint(format!(
                "driver {driver_id} already has a request in progress"
            )));
        }

        let request = ShipmentRequest {
            id: Self::fresh_request_id(),
            client_id: client_id.to_string(),
            driver_id: driver_id.to_string(),
            cargo: cargo.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            driver_waybill: None,
            client_waybill: None,
            current_driver_status: Some(DriverStatus::PendingRequest),
        };

        if let Some(driver) = self.drivers.get_mut(driver_id) {
            driver.status = DriverStatus::PendingRequest;
        }
        self.requests.insert(request.id.clone(), request.clone());

        info!(
            request_id = %request.id,
            client_id,
            driver_id,
            cargo,
            "shipment request created"
        );

        Ok(request)
    }

    /// Answer a request with one of the lifecycle actions. Transitions
    /// follow the request lifecycle table; actions the current status does
    /// not admit are reported as `Ignored` and leave all state untouched.
    pub fn respond_to_request(
        &mut self,
        request_id: &str,
        action: RequestAction,
    ) -> Result<TransitionOutcome, LedgerError> {
        let request = self
            .requests
            .get(request_id)
            .ok_or_else(|| LedgerError::not_found("request", request_id))?;

        let Some(next) = request.status.next(action) else {
            debug!(
                request_id,
                status = %request.status,
                %action,
                "action ignored in current status"
            );
            return Ok(TransitionOutcome::Ignored(request.clone()));
        };

        let previous = request.status;
        let driver_id = request.driver_id.clone();
        let client_id = request.client_id.clone();

        match next {
            RequestStatus::Accepted => self.bind_driver(&driver_id, &client_id),
            RequestStatus::Rejected | RequestStatus::Completed => {
                self.release_driver(&driver_id, &client_id)
            }
            _ => {}
        }

        let updated = match self.requests.get_mut(request_id) {
            Some(request) => {
                request.status = next;
                request.clone()
            }
            None => return Err(LedgerError::not_found("request", request_id)),
        };

        info!(
            request_id,
            from = %previous,
            to = %next,
            %action,
            "request transitioned"
        );

        Ok(TransitionOutcome::Applied(updated))
    }

    /// Set a driver's operational status. Any enumerated value is accepted
    /// in any order; only the closed enum constrains it. A `loading` update
    /// carrying a waybill file attaches the driver waybill to the driver's
    /// accepted request, if one exists.
    pub fn update_driver_status(
        &mut self,
        driver_id: &str,
        new_status: DriverStatus,
        waybill: Option<&WaybillFile>,
    ) -> Result<Driver, LedgerError> {
        let driver = self
            .drivers
            .get_mut(driver_id)
            .ok_or_else(|| LedgerError::not_found("driver", driver_id))?;

        driver.status = new_status;
        let updated = driver.clone();

        if new_status == DriverStatus::Loading {
            if let Some(file) = waybill {
                self.attach_driver_waybill(driver_id, file);
            }
        }
        self.mirror_driver_status(driver_id, new_status);

        info!(driver_id, status = %new_status, "driver status updated");

        Ok(updated)
    }

    /// Attach the client-side waybill to a request. Only accepted requests
    /// take a client waybill.
    pub fn upload_client_waybill(
        &mut self,
        request_id: &str,
        file: &WaybillFile,
    ) -> Result<ShipmentRequest, LedgerError> {
        let request = self
            .requests
            .get_mut(request_id)
            .ok_or_else(|| LedgerError::not_found("request", request_id))?;

        if request.status != RequestStatus::Accepted {
            return Err(LedgerError::constraint(format!(
                "client waybill requires an accepted request (status is {})",
                request.status
            )));
        }

        request.client_waybill = Some(waybill_reference(&request.id, "client", file));
        let updated = request.clone();

        info!(request_id, file = %file.name, "client waybill attached");

        Ok(updated)
    }

    fn bind_driver(&mut self, driver_id: &str, client_id: &str) {
        if let Some(driver) = self.drivers.get_mut(driver_id) {
            driver.assigned_client_id = Some(client_id.to_string());
            driver.status = DriverStatus::Idle;
        } else {
            warn!(driver_id, "accepted request references a missing driver");
        }

        if let Some(client) = self.clients.get_mut(client_id) {
            client.assigned_drivers.insert(driver_id.to_string());
        } else {
            warn!(client_id, "accepted request references a missing client");
        }

        self.mirror_driver_status(driver_id, DriverStatus::Idle);
    }

    fn release_driver(&mut self, driver_id: &str, client_id: &str) {
        if let Some(driver) = self.drivers.get_mut(driver_id) {
            driver.assigned_client_id = None;
            driver.status = DriverStatus::Idle;
        } else {
            warn!(driver_id, "closed request references a missing driver");
        }

        if let Some(client) = self.clients.get_mut(client_id) {
            client.assigned_drivers.remove(driver_id);
        } else {
            warn!(client_id, "closed request references a missing client");
        }

        self.mirror_driver_status(driver_id, DriverStatus::Idle);
    }

    fn attach_driver_waybill(&mut self, driver_id: &str, file: &WaybillFile) {
        let accepted = self.requests.values_mut().find(|request| {
            request.driver_id == driver_id && request.status == RequestStatus::Accepted
        });

        match accepted {
            Some(request) => {
                request.driver_waybill = Some(waybill_reference(&request.id, "driver", file));
                info!(
                    request_id = %request.id,
                    driver_id,
                    file = %file.name,
                    "driver waybill attached"
                );
            }
            None => {
                debug!(
                    driver_id,
                    file = %file.name,
                    "no accepted request; driver waybill skipped"
                );
            }
        }
    }
}

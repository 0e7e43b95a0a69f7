use std::time::Instant;

use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use crate::error::LedgerError;
use crate::ledger::lifecycle::TransitionOutcome;
use crate::ledger::stats::LedgerStats;
use crate::ledger::{FleetLedger, LedgerSnapshot};
use crate::models::driver::{Driver, DriverStatus};
use crate::models::request::{RequestAction, ShipmentRequest, WaybillFile};
use crate::models::truck::Truck;
use crate::observability::metrics::Metrics;

type Reply<T> = oneshot::Sender<T>;

pub enum LedgerCommand {
    CreateRequest {
        client_id: String,
        driver_id: String,
        cargo: String,
        origin: String,
        destination: String,
        reply: Reply<Result<ShipmentRequest, LedgerError>>,
    },
    RespondToRequest {
        request_id: String,
        action: RequestAction,
        reply: Reply<Result<TransitionOutcome, LedgerError>>,
    },
    UpdateDriverStatus {
        driver_id: String,
        status: DriverStatus,
        waybill: Option<WaybillFile>,
        reply: Reply<Result<Driver, LedgerError>>,
    },
    UploadClientWaybill {
        request_id: String,
        file: WaybillFile,
        reply: Reply<Result<ShipmentRequest, LedgerError>>,
    },
    Snapshot {
        reply: Reply<LedgerSnapshot>,
    },
    Stats {
        reply: Reply<LedgerStats>,
    },
    AvailableDrivers {
        reply: Reply<Vec<Driver>>,
    },
    AvailableTrucks {
        reply: Reply<Vec<Truck>>,
    },
    ActiveDeliveries {
        reply: Reply<Vec<Driver>>,
    },
}

/// Single-writer loop owning the ledger. All mutation flows through this
/// task in command order; readers get cloned views.
pub async fn run_ledger_service(
    mut ledger: FleetLedger,
    mut command_rx: mpsc::Receiver<LedgerCommand>,
    metrics: Metrics,
) {
    info!("ledger service started");

    while let Some(command) = command_rx.recv().await {
        handle_command(&mut ledger, command, &metrics);
    }

    warn!("ledger service stopped: command channel closed");
}

fn handle_command(ledger: &mut FleetLedger, command: LedgerCommand, metrics: &Metrics) {
    match command {
        LedgerCommand::CreateRequest {
            client_id,
            driver_id,
            cargo,
            origin,
            destination,
            reply,
        } => {
            let start = Instant::now();
            let result =
                ledger.create_request(&client_id, &driver_id, &cargo, &origin, &destination);
            metrics.record_operation("create_request", result_outcome(&result), start.elapsed());
            refresh_gauges(ledger, metrics);
            let _ = reply.send(result);
        }
        LedgerCommand::RespondToRequest {
            request_id,
            action,
            reply,
        } => {
            let start = Instant::now();
            let result = ledger.respond_to_request(&request_id, action);
            let outcome = match &result {
                Ok(TransitionOutcome::Applied(_)) => "applied",
                Ok(TransitionOutcome::Ignored(_)) => "ignored",
                Err(_) => "error",
            };
            metrics.record_operation("respond_to_request", outcome, start.elapsed());
            refresh_gauges(ledger, metrics);
            let _ = reply.send(result);
        }
        LedgerCommand::UpdateDriverStatus {
            driver_id,
            status,
            waybill,
            reply,
        } => {
            let start = Instant::now();
            let result = ledger.update_driver_status(&driver_id, status, waybill.as_ref());
            metrics.record_operation(
                "update_driver_status",
                result_outcome(&result),
                start.elapsed(),
            );
            refresh_gauges(ledger, metrics);
            let _ = reply.send(result);
        }
        LedgerCommand::UploadClientWaybill {
            request_id,
            file,
            reply,
        } => {
            let start = Instant::now();
            let result = ledger.upload_client_waybill(&request_id, &file);
            metrics.record_operation(
                "upload_client_waybill",
                result_outcome(&result),
                start.elapsed(),
            );
            refresh_gauges(ledger, metrics);
            let _ = reply.send(result);
        }
        LedgerCommand::Snapshot { reply } => {
            let _ = reply.send(ledger.snapshot());
        }
        LedgerCommand::Stats { reply } => {
            let _ = reply.send(ledger.stats());
        }
        LedgerCommand::AvailableDrivers { reply } => {
            let _ = reply.send(ledger.available_drivers());
        }
        LedgerCommand::AvailableTrucks { reply } => {
            let _ = reply.send(ledger.available_trucks());
        }
        LedgerCommand::ActiveDeliveries { reply } => {
            let _ = reply.send(ledger.active_deliveries());
        }
    }
}

fn result_outcome<T>(result: &Result<T, LedgerError>) -> &'static str {
    if result.is_ok() { "applied" } else { "error" }
}

fn refresh_gauges(ledger: &FleetLedger, metrics: &Metrics) {
    metrics.live_requests.set(ledger.live_request_count() as i64);
    metrics
        .drivers_available
        .set(ledger.available_drivers().len() as i64);
}

/// Spawn the service task and hand back its command facade.
pub fn spawn_service(ledger: FleetLedger, command_queue_size: usize) -> LedgerHandle {
    let metrics = Metrics::new();
    let (command_tx, command_rx) = mpsc::channel(command_queue_size);

    tokio::spawn(run_ledger_service(ledger, command_rx, metrics.clone()));

    LedgerHandle {
        command_tx,
        metrics,
    }
}

#[derive(Clone)]
pub struct LedgerHandle {
    command_tx: mpsc::Sender<LedgerCommand>,
    metrics: Metrics,
}

impl LedgerHandle {
    pub async fn create_request(
        &self,
        client_id: &str,
        driver_id: &str,
        cargo: &str,
        origin: &str,
        destination: &str,
    ) -> Result<ShipmentRequest, LedgerError> {
        let (reply, response) = oneshot::channel();
        self.send(LedgerCommand::CreateRequest {
            client_id: client_id.to_string(),
            driver_id: driver_id.to_string(),
            cargo: cargo.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            reply,
        })
        .await?;
        self.receive(response).await?
    }

    pub async fn respond_to_request(
        &self,
        request_id: &str,
        action: RequestAction,
    ) -> Result<TransitionOutcome, LedgerError> {
        let (reply, response) = oneshot::channel();
        self.send(LedgerCommand::RespondToRequest {
            request_id: request_id.to_string(),
            action,
            reply,
        })
        .await?;
        self.receive(response).await?
    }

    pub async fn update_driver_status(
        &self,
        driver_id: &str,
        status: DriverStatus,
        waybill: Option<WaybillFile>,
    ) -> Result<Driver, LedgerError> {
        let (reply, response) = oneshot::channel();
        self.send(LedgerCommand::UpdateDriverStatus {
            driver_id: driver_id.to_string(),
            status,
            waybill,
            reply,
        })
        .await?;
        self.receive(response).await?
    }

    pub async fn upload_client_waybill(
        &self,
        request_id: &str,
        file: WaybillFile,
    ) -> Result<ShipmentRequest, LedgerError> {
        let (reply, response) = oneshot::channel();
        self.send(LedgerCommand::UploadClientWaybill {
            request_id: request_id.to_string(),
            file,
            reply,
        })
        .await?;
        self.receive(response).await?
    }

    pub async fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError> {
        let (reply, response) = oneshot::channel();
        self.send(LedgerCommand::Snapshot { reply }).await?;
        self.receive(response).await
    }

    pub async fn stats(&self) -> Result<LedgerStats, LedgerError> {
        let (reply, response) = oneshot::channel();
        self.send(LedgerCommand::Stats { reply }).await?;
        self.receive(response).await
    }

    pub async fn available_drivers(&self) -> Result<Vec<Driver>, LedgerError> {
        let (reply, response) = oneshot::channel();
        self.send(LedgerCommand::AvailableDrivers { reply }).await?;
        self.receive(response).await
    }

    pub async fn available_trucks(&self) -> Result<Vec<Truck>, LedgerError> {
        let (reply, response) = oneshot::channel();
        self.send(LedgerCommand::AvailableTrucks { reply }).await?;
        self.receive(response).await
    }

    pub async fn active_deliveries(&self) -> Result<Vec<Driver>, LedgerError> {
        let (reply, response) = oneshot::channel();
        self.send(LedgerCommand::ActiveDeliveries { reply }).await?;
        self.receive(response).await
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    async fn send(&self, command: LedgerCommand) -> Result<(), LedgerError> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| service_closed())
    }

    async fn receive<T>(&self, response: oneshot::Receiver<T>) -> Result<T, LedgerError> {
        response.await.map_err(|_| service_closed())
    }
}

fn service_closed() -> LedgerError {
    LedgerError::Internal("ledger service unavailable: command channel closed".to_string())
}

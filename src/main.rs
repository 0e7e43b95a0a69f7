mod config;
mod error;
mod ledger;
mod models;
mod observability;
mod seed;
mod service;

use tracing_subscriber::EnvFilter;

use crate::models::driver::DriverStatus;
use crate::models::request::{RequestAction, WaybillFile};

#[tokio::main]
async fn main() -> Result<(), error::LedgerError> {
    let config = config::Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let fleet = if config.seed_demo {
        ledger::FleetLedger::load(seed::demo_fleet())
    } else {
        ledger::FleetLedger::new()
    };

    let handle = service::spawn_service(fleet, config.command_queue_size);

    let available = handle.available_drivers().await?;
    tracing::info!(count = available.len(), "drivers ready for work");

    // One shipment driven end to end, the way callers would hand the
    // ledger raw action and status strings.
    let request = handle
        .create_request("o1", "d1", "Cement bags", "Berbera", "Hargeisa")
        .await?;
    tracing::info!(request_id = %request.id, "owner filed a request");

    let action = RequestAction::parse_action("approve")?;
    handle.respond_to_request(&request.id, action).await?;

    let action = RequestAction::parse_action("accept")?;
    let outcome = handle.respond_to_request(&request.id, action).await?;
    tracing::info!(status = %outcome.request().status, "owner accepted");

    let status = DriverStatus::parse_status("loading")?;
    handle
        .update_driver_status("d1", status, Some(WaybillFile::new("wb-outbound.pdf")))
        .await?;

    handle
        .upload_client_waybill(&request.id, WaybillFile::new("wb-client.pdf"))
        .await?;

    let status = DriverStatus::parse_status("in-transit")?;
    handle.update_driver_status("d1", status, None).await?;

    let action = RequestAction::parse_action("completed")?;
    let outcome = handle.respond_to_request(&request.id, action).await?;
    tracing::info!(status = %outcome.request().status, "shipment settled");

    let snapshot = handle.snapshot().await?;
    let stats = handle.stats().await?;

    println!("{}", to_pretty_json(&snapshot)?);
    println!("{}", to_pretty_json(&stats)?);

    Ok(())
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, error::LedgerError> {
    serde_json::to_string_pretty(value)
        .map_err(|err| error::LedgerError::Internal(format!("failed to render json: {err}")))
}

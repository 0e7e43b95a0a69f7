use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::LedgerError;

/// Operational stage of a driver, independent of any request lifecycle.
/// Wire strings are the legacy dashboard values, hyphens included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum DriverStatus {
    #[serde(rename = "idle")]
    #[strum(serialize = "idle")]
    Idle,
    #[serde(rename = "pending_request")]
    #[strum(serialize = "pending_request")]
    PendingRequest,
    #[serde(rename = "loading")]
    #[strum(serialize = "loading")]
    Loading,
    #[serde(rename = "in-transit")]
    #[strum(serialize = "in-transit")]
    InTransit,
    #[serde(rename = "custom-reached")]
    #[strum(serialize = "custom-reached")]
    CustomReached,
    #[serde(rename = "unloading")]
    #[strum(serialize = "unloading")]
    Unloading,
    #[serde(rename = "purchaser-reached")]
    #[strum(serialize = "purchaser-reached")]
    PurchaserReached,
}

impl DriverStatus {
    /// Conversion for string-typed callers. Unrecognized values are
    /// rejected instead of silently accepted.
    pub fn parse_status(value: &str) -> Result<Self, LedgerError> {
        value
            .parse()
            .map_err(|_| LedgerError::constraint(format!("unrecognized driver status: {value}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub truck_id: Option<String>,
    pub status: DriverStatus,
    pub assigned_client_id: Option<String>,
    pub verified: bool,
    pub rating: f64,
}

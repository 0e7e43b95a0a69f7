use serde::{Deserialize, Serialize};

/// Fleet vehicle. Trucks are seeded and queried; no ledger operation
/// mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    pub id: String,
    pub plate: String,
    pub available: bool,
    pub driver_id: Option<String>,
}

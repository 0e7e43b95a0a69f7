use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A cargo owner. `assigned_drivers` mirrors the drivers of this client's
/// requests currently in accepted status; set semantics, no duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub assigned_drivers: BTreeSet<String>,
}

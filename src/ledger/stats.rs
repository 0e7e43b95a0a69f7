use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::ledger::FleetLedger;

/// Dashboard counters computed from current state. Trailing windows are
/// measured against an explicit reference time so tests stay
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerStats {
    pub drivers_total: usize,
    pub clients_total: usize,
    pub trucks_total: usize,
    pub trucks_available: usize,
    pub trucks_unavailable: usize,
    pub requests_total: usize,
    pub requests_created_7d: usize,
    pub requests_created_30d: usize,
    pub requests_processed_7d: usize,
    pub requests_processed_30d: usize,
}

// Half-open trailing window: (now - days, now].
fn within_trailing(created_at: DateTime<Utc>, now: DateTime<Utc>, days: i64) -> bool {
    created_at <= now && created_at > now - Duration::days(days)
}

impl FleetLedger {
    pub fn stats(&self) -> LedgerStats {
        self.stats_at(Utc::now())
    }

    pub fn stats_at(&self, now: DateTime<Utc>) -> LedgerStats {
        let trucks_available = self.trucks.values().filter(|t| t.available).count();

        let created_within = |days| {
            self.requests
                .values()
                .filter(|r| within_trailing(r.created_at, now, days))
                .count()
        };
        let processed_within = |days| {
            self.requests
                .values()
                .filter(|r| r.status.is_processed() && within_trailing(r.created_at, now, days))
                .count()
        };

        LedgerStats {
            drivers_total: self.drivers.len(),
            clients_total: self.clients.len(),
            trucks_total: self.trucks.len(),
            trucks_available,
            trucks_unavailable: self.trucks.len() - trucks_available,
            requests_total: self.requests.len(),
            requests_created_7d: created_within(7),
            requests_created_30d: created_within(30),
            requests_processed_7d: processed_within(7),
            requests_processed_30d: processed_within(30),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::LedgerError;
use crate::models::driver::DriverStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    ApprovedByDriver,
    Accepted,
    Rejected,
    Completed,
    // Part of the closed status set but produced by no ledger operation.
    Canceled,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Canceled)
    }

    /// A request that has been decided one way or the other.
    pub fn is_processed(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected | Self::Completed)
    }

    /// The request lifecycle table. `None` means the action is ignored in
    /// the current status.
    pub fn next(self, action: RequestAction) -> Option<RequestStatus> {
        use RequestAction::*;
        use RequestStatus::*;

        match (self, action) {
            (Pending, Approve) => Some(ApprovedByDriver),
            (Pending | ApprovedByDriver, Accept) => Some(Accepted),
            (Pending | ApprovedByDriver, Reject) => Some(Rejected),
            (Accepted, Complete) => Some(Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestAction {
    Approve,
    Accept,
    Reject,
    // The legacy wire value is "completed", not "complete".
    #[serde(rename = "completed")]
    #[strum(serialize = "completed")]
    Complete,
}

impl RequestAction {
    /// Conversion for string-typed callers. Unrecognized values are
    /// rejected instead of silently accepted.
    pub fn parse_action(value: &str) -> Result<Self, LedgerError> {
        value
            .parse()
            .map_err(|_| LedgerError::constraint(format!("unrecognized action: {value}")))
    }
}

/// An uploaded document handle. Only the name participates in the derived
/// waybill reference; the blob itself lives outside this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaybillFile {
    pub name: String,
}

impl WaybillFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub id: String,
    pub client_id: String,
    pub driver_id: String,
    pub cargo: String,
    pub origin: String,
    pub destination: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub driver_waybill: Option<String>,
    pub client_waybill: Option<String>,
    /// Informational mirror of the driver's operational status; refreshed
    /// whenever the ledger changes it.
    pub current_driver_status: Option<DriverStatus>,
}

#[cfg(test)]
mod tests {
    use super::{RequestAction, RequestStatus};
    use crate::error::LedgerError;

    const ALL_STATUSES: [RequestStatus; 6] = [
        RequestStatus::Pending,
        RequestStatus::ApprovedByDriver,
        RequestStatus::Accepted,
        RequestStatus::Rejected,
        RequestStatus::Completed,
        RequestStatus::Canceled,
    ];

    const ALL_ACTIONS: [RequestAction; 4] = [
        RequestAction::Approve,
        RequestAction::Accept,
        RequestAction::Reject,
        RequestAction::Complete,
    ];

    #[test]
    fn pending_admits_approve_accept_and_reject() {
        assert_eq!(
            RequestStatus::Pending.next(RequestAction::Approve),
            Some(RequestStatus::ApprovedByDriver)
        );
        assert_eq!(
            RequestStatus::Pending.next(RequestAction::Accept),
            Some(RequestStatus::Accepted)
        );
        assert_eq!(
            RequestStatus::Pending.next(RequestAction::Reject),
            Some(RequestStatus::Rejected)
        );
        assert_eq!(RequestStatus::Pending.next(RequestAction::Complete), None);
    }

    #[test]
    fn approved_admits_accept_and_reject_only() {
        let approved = RequestStatus::ApprovedByDriver;
        assert_eq!(approved.next(RequestAction::Approve), None);
        assert_eq!(
            approved.next(RequestAction::Accept),
            Some(RequestStatus::Accepted)
        );
        assert_eq!(
            approved.next(RequestAction::Reject),
            Some(RequestStatus::Rejected)
        );
        assert_eq!(approved.next(RequestAction::Complete), None);
    }

    #[test]
    fn accepted_admits_complete_only() {
        let accepted = RequestStatus::Accepted;
        assert_eq!(accepted.next(RequestAction::Approve), None);
        assert_eq!(accepted.next(RequestAction::Accept), None);
        assert_eq!(accepted.next(RequestAction::Reject), None);
        assert_eq!(
            accepted.next(RequestAction::Complete),
            Some(RequestStatus::Completed)
        );
    }

    #[test]
    fn terminal_statuses_ignore_every_action() {
        for status in [
            RequestStatus::Rejected,
            RequestStatus::Completed,
            RequestStatus::Canceled,
        ] {
            for action in ALL_ACTIONS {
                assert_eq!(status.next(action), None, "{status} must ignore {action}");
            }
        }
    }

    #[test]
    fn canceled_is_never_a_transition_target() {
        for status in ALL_STATUSES {
            for action in ALL_ACTIONS {
                assert_ne!(status.next(action), Some(RequestStatus::Canceled));
            }
        }
    }

    #[test]
    fn terminal_and_processed_partitions() {
        assert!(RequestStatus::Rejected.is_terminal());
        assert!(RequestStatus::Completed.is_terminal());
        assert!(RequestStatus::Canceled.is_terminal());
        assert!(!RequestStatus::Accepted.is_terminal());

        assert!(RequestStatus::Accepted.is_processed());
        assert!(RequestStatus::Rejected.is_processed());
        assert!(RequestStatus::Completed.is_processed());
        assert!(!RequestStatus::Pending.is_processed());
        assert!(!RequestStatus::ApprovedByDriver.is_processed());
        assert!(!RequestStatus::Canceled.is_processed());
    }

    #[test]
    fn action_wire_strings_match_legacy_values() {
        assert_eq!(RequestAction::Complete.to_string(), "completed");
        assert_eq!(
            RequestAction::parse_action("completed").unwrap(),
            RequestAction::Complete
        );
        assert_eq!(
            serde_json::to_string(&RequestAction::Complete).unwrap(),
            "\"completed\""
        );
        assert_eq!(
            serde_json::to_string(&RequestStatus::ApprovedByDriver).unwrap(),
            "\"approved_by_driver\""
        );
    }

    #[test]
    fn parse_action_rejects_unknown_values() {
        let err = RequestAction::parse_action("banana").unwrap_err();
        assert!(matches!(err, LedgerError::ConstraintViolation(_)));
    }
}

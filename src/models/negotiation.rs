use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle of a response or invitation.
///
/// `pending -> accepted` and `pending -> canceled` are the only legal
/// transitions through the status endpoint. Accepted and canceled rows are
/// terminal there; resubmitting through the upsert path is what reopens a
/// row to `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegotiationStatus {
    Pending,
    Accepted,
    Canceled,
}

impl NegotiationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NegotiationStatus::Pending => "pending",
            NegotiationStatus::Accepted => "accepted",
            NegotiationStatus::Canceled => "canceled",
        }
    }

    /// Whether the status endpoint may move a row from `self` to `next`.
    pub fn can_transition_to(self, next: NegotiationStatus) -> bool {
        matches!(
            (self, next),
            (NegotiationStatus::Pending, NegotiationStatus::Accepted)
                | (NegotiationStatus::Pending, NegotiationStatus::Canceled)
        )
    }
}

impl FromStr for NegotiationStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(NegotiationStatus::Pending),
            "accepted" => Ok(NegotiationStatus::Accepted),
            "canceled" => Ok(NegotiationStatus::Canceled),
            _ => Err(()),
        }
    }
}

impl fmt::Display for NegotiationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An applicant's response to a vacancy. One row per (user_id, vacancy_id);
/// repeat submissions reactivate the existing row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VacancyResponse {
    pub id: Uuid,
    pub vacancy_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
}

/// An employer's invitation to an applicant for a vacancy. One row per
/// (company_owner_id, applicant_id, vacancy_id), reactivated on resubmit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VacancyInvitation {
    pub id: Uuid,
    pub company_owner_id: Uuid,
    pub applicant_id: Uuid,
    pub vacancy_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::NegotiationStatus::*;

    #[test]
    fn pending_may_be_accepted_or_canceled() {
        assert!(Pending.can_transition_to(Accepted));
        assert!(Pending.can_transition_to(Canceled));
    }

    #[test]
    fn accepted_and_canceled_are_terminal() {
        for terminal in [Accepted, Canceled] {
            assert!(!terminal.can_transition_to(Pending));
            assert!(!terminal.can_transition_to(Accepted));
            assert!(!terminal.can_transition_to(Canceled));
        }
    }

    #[test]
    fn no_self_transitions() {
        for status in [Pending, Accepted, Canceled] {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn status_parses_known_values_only() {
        assert_eq!("pending".parse(), Ok(Pending));
        assert_eq!("accepted".parse(), Ok(Accepted));
        assert_eq!("canceled".parse(), Ok(Canceled));
        assert!("rejected".parse::<super::NegotiationStatus>().is_err());
    }
}

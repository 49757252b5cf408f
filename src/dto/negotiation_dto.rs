use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitResponsePayload {
    #[validate(length(min = 1))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitInvitationPayload {
    pub applicant_id: Uuid,
    #[validate(length(min = 1))]
    pub message: String,
}

/// Target status for a transition; parsed and checked against the state
/// machine in the negotiation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: String,
}

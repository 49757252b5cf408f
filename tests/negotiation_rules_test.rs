use jobboard_backend::dto::negotiation_dto::{
    SubmitInvitationPayload, SubmitResponsePayload, UpdateStatusPayload,
};
use jobboard_backend::models::negotiation::NegotiationStatus;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

#[test]
fn full_lifecycle_through_the_state_machine() {
    let pending = NegotiationStatus::Pending;

    assert!(pending.can_transition_to(NegotiationStatus::Accepted));
    assert!(pending.can_transition_to(NegotiationStatus::Canceled));

    // Once decided, the status endpoint cannot move the row again.
    let accepted = NegotiationStatus::Accepted;
    assert!(!accepted.can_transition_to(NegotiationStatus::Pending));
    assert!(!accepted.can_transition_to(NegotiationStatus::Canceled));

    let canceled = NegotiationStatus::Canceled;
    assert!(!canceled.can_transition_to(NegotiationStatus::Pending));
    assert!(!canceled.can_transition_to(NegotiationStatus::Accepted));
}

#[test]
fn status_serializes_as_lowercase_text() {
    assert_eq!(
        serde_json::to_value(NegotiationStatus::Pending).unwrap(),
        json!("pending")
    );
    assert_eq!(NegotiationStatus::Accepted.to_string(), "accepted");
    assert_eq!(
        "canceled".parse::<NegotiationStatus>(),
        Ok(NegotiationStatus::Canceled)
    );
}

#[test]
fn update_payload_carries_raw_status_text() {
    let payload: UpdateStatusPayload =
        serde_json::from_value(json!({"status": "accepted"})).unwrap();
    assert_eq!(
        payload.status.parse::<NegotiationStatus>(),
        Ok(NegotiationStatus::Accepted)
    );

    let unknown: UpdateStatusPayload =
        serde_json::from_value(json!({"status": "rejected"})).unwrap();
    assert!(unknown.status.parse::<NegotiationStatus>().is_err());
}

#[test]
fn response_payload_requires_a_message() {
    let ok = SubmitResponsePayload {
        message: "I would like to apply".into(),
    };
    assert!(ok.validate().is_ok());

    let empty = SubmitResponsePayload {
        message: String::new(),
    };
    assert!(empty.validate().is_err());
}

#[test]
fn invitation_payload_requires_applicant_and_message() {
    let ok = SubmitInvitationPayload {
        applicant_id: Uuid::new_v4(),
        message: "We would like to interview you".into(),
    };
    assert!(ok.validate().is_ok());

    let empty = SubmitInvitationPayload {
        applicant_id: Uuid::new_v4(),
        message: String::new(),
    };
    assert!(empty.validate().is_err());

    // applicant_id is mandatory on the wire.
    let missing: Result<SubmitInvitationPayload, _> =
        serde_json::from_value(json!({"message": "hello"}));
    assert!(missing.is_err());
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChatPayload {
    pub applicant_id: Uuid,
    pub company_owner_id: Uuid,
    pub vacancy_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostMessagePayload {
    // Whitespace-only text is rejected in the service after trimming.
    #[validate(length(min = 1))]
    pub text: String,
}

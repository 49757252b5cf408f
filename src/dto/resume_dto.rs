use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResumePayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub expected_salary: Option<Decimal>,
    pub specialization_id: Uuid,
    #[validate(length(min = 1))]
    pub experience_level: String,
    #[validate(length(min = 1))]
    pub location: String,
}

/// Applicant's own résumé joined with its specialization name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OwnedResume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub expected_salary: Option<Decimal>,
    pub specialization_id: Uuid,
    pub specialization_name: String,
    pub experience_level: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

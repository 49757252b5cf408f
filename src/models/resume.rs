use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An applicant's résumé. At most one per user, enforced by a unique
/// constraint on `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub expected_salary: Option<Decimal>,
    pub specialization_id: Uuid,
    pub experience_level: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

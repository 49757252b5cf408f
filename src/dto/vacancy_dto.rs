use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Both create and the full-replace PATCH carry every field, matching the
/// write contract of the HTTP surface.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VacancyPayload {
    pub company_id: Uuid,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub salary_from: Decimal,
    pub salary_to: Decimal,
    pub specialization_id: Uuid,
    #[validate(length(min = 1))]
    pub experience_level: String,
    #[validate(length(min = 1))]
    pub location: String,
}

/// Owner's own vacancy joined with its specialization name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OwnedVacancy {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub salary_from: Decimal,
    pub salary_to: Decimal,
    pub specialization_id: Uuid,
    pub specialization_name: String,
    pub experience_level: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_is_rejected() {
        let payload = VacancyPayload {
            company_id: Uuid::new_v4(),
            title: "".into(),
            description: "desc".into(),
            salary_from: Decimal::new(100_000, 0),
            salary_to: Decimal::new(150_000, 0),
            specialization_id: Uuid::new_v4(),
            experience_level: "middle".into(),
            location: "Berlin".into(),
        };
        assert!(payload.validate().is_err());
    }
}

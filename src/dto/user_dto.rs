use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::Role;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: Role,
    // Required when role is company_owner; checked in the service.
    pub company_name: Option<String>,
    pub company_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub company_id: Option<Uuid>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub company_id: Option<Uuid>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
    pub access_token: String,
    pub refresh_token: String,
}

/// User row joined with the company the user owns, if any.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub company_id: Option<Uuid>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> RegisterPayload {
        RegisterPayload {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password: "secret-password".into(),
            role: Role::Applicant,
            company_name: None,
            company_description: None,
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut p = payload();
        p.email = "not-an-email".into();
        assert!(p.validate().is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        let mut p = payload();
        p.password = "short".into();
        assert!(p.validate().is_err());
    }
}

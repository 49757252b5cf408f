//! Denormalized read-side shapes produced by the feed/query layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vacancy feed entry with specialization and employer display names.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VacancyFeedItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub salary_from: Decimal,
    pub salary_to: Decimal,
    pub specialization_name: String,
    pub experience_level: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub company_id: Uuid,
    pub company_name: String,
}

/// Résumé feed entry with specialization and applicant display names.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeFeedItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub expected_salary: Option<Decimal>,
    pub specialization_name: String,
    pub experience_level: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub applicant_id: Uuid,
    pub applicant_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VacancyDetail {
    pub id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
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

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub applicant_name: String,
    pub title: String,
    pub description: String,
    pub expected_salary: Option<Decimal>,
    pub specialization_name: String,
    pub experience_level: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// One response in the per-vacancy list an employer reviews.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VacancyResponseEntry {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub user_id: Uuid,
    pub user_name: String,
}

/// "My responses" view for an applicant: each response joined with the
/// vacancy and the employer behind it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicantResponseView {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub vacancy_id: Uuid,
    pub vacancy_title: String,
    pub employer_name: String,
}

/// "Received responses" view for an employer: responses to any of the
/// owner's vacancies, joined with the applicant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OwnerResponseView {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub applicant_id: Uuid,
    pub applicant_name: String,
    pub vacancy_id: Uuid,
    pub vacancy_title: String,
}

/// Invitations an applicant has received.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicantInvitationView {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub vacancy_id: Uuid,
    pub vacancy_title: String,
    pub employer_id: Uuid,
    pub employer_name: String,
}

/// Invitations an employer has sent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OwnerInvitationView {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub vacancy_id: Uuid,
    pub vacancy_title: String,
    pub applicant_id: Uuid,
    pub applicant_name: String,
}

//! Read-side queries: denormalized feeds and per-user negotiation views.
//! Everything here is a snapshot read; feeds are advisory, so the pool's
//! default isolation is enough.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::feed_dto::{
    ApplicantInvitationView, ApplicantResponseView, OwnerInvitationView, OwnerResponseView,
    ResumeDetail, ResumeFeedItem, VacancyDetail, VacancyFeedItem, VacancyResponseEntry,
};
use crate::error::{Error, Result};
use crate::models::specialization::Specialization;

/// Key for the single résumé lookup: by row id, or by the owning user.
/// The HTTP route tries both in sequence.
#[derive(Debug, Clone, Copy)]
pub enum ResumeKey {
    ById(Uuid),
    ByOwner(Uuid),
}

#[derive(Clone)]
pub struct FeedService {
    pool: PgPool,
}

impl FeedService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn specializations(&self) -> Result<Vec<Specialization>> {
        let items = sqlx::query_as::<_, Specialization>(
            "SELECT id, name FROM specializations ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    // Unpaginated by design of the current surface; a scalability gap once
    // the vacancy table grows.
    pub async fn vacancies_feed(&self) -> Result<Vec<VacancyFeedItem>> {
        let items = sqlx::query_as::<_, VacancyFeedItem>(
            r#"
            SELECT
                v.id,
                v.title,
                v.description,
                v.salary_from,
                v.salary_to,
                s.name AS specialization_name,
                v.experience_level,
                v.location,
                v.created_at,
                c.id AS company_id,
                c.name AS company_name
            FROM vacancies v
            JOIN specializations s ON v.specialization_id = s.id
            JOIN companies c ON v.company_id = c.id
            ORDER BY v.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn resumes_feed(&self) -> Result<Vec<ResumeFeedItem>> {
        let items = sqlx::query_as::<_, ResumeFeedItem>(
            r#"
            SELECT
                r.id,
                r.title,
                r.description,
                r.expected_salary,
                s.name AS specialization_name,
                r.experience_level,
                r.location,
                r.created_at,
                u.id AS applicant_id,
                u.name AS applicant_name
            FROM resumes r
            JOIN specializations s ON r.specialization_id = s.id
            JOIN users u ON r.user_id = u.id
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn vacancy_by_id(&self, id: Uuid) -> Result<VacancyDetail> {
        let vacancy = sqlx::query_as::<_, VacancyDetail>(
            r#"
            SELECT
                v.id,
                v.company_id,
                c.name AS company_name,
                v.title,
                v.description,
                v.salary_from,
                v.salary_to,
                v.specialization_id,
                s.name AS specialization_name,
                v.experience_level,
                v.location,
                v.created_at
            FROM vacancies v
            JOIN companies c ON c.id = v.company_id
            JOIN specializations s ON s.id = v.specialization_id
            WHERE v.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("vacancy not found".to_string()))?;
        Ok(vacancy)
    }

    /// Single résumé lookup over a tagged key. Returns None on a miss so
    /// the route can try the other key before reporting not-found.
    pub async fn resume_lookup(&self, key: ResumeKey) -> Result<Option<ResumeDetail>> {
        let (clause, id) = match key {
            ResumeKey::ById(id) => ("r.id = $1", id),
            ResumeKey::ByOwner(id) => ("r.user_id = $1", id),
        };
        let query = format!(
            r#"
            SELECT
                r.id,
                r.user_id,
                u.name AS applicant_name,
                r.title,
                r.description,
                r.expected_salary,
                s.name AS specialization_name,
                r.experience_level,
                r.location,
                r.created_at
            FROM resumes r
            JOIN users u ON u.id = r.user_id
            JOIN specializations s ON s.id = r.specialization_id
            WHERE {}
            "#,
            clause
        );

        let resume = sqlx::query_as::<_, ResumeDetail>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(resume)
    }

    /// Responses to one vacancy, newest first, for the vacancy's owner.
    pub async fn vacancy_responses(&self, vacancy_id: Uuid) -> Result<Vec<VacancyResponseEntry>> {
        let items = sqlx::query_as::<_, VacancyResponseEntry>(
            r#"
            SELECT
                vr.id,
                vr.message,
                vr.created_at,
                vr.status,
                u.id AS user_id,
                u.name AS user_name
            FROM vacancy_responses vr
            JOIN users u ON vr.user_id = u.id
            WHERE vr.vacancy_id = $1
            ORDER BY vr.created_at DESC
            "#,
        )
        .bind(vacancy_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Responses an applicant has made, joined with vacancy and employer.
    pub async fn applicant_responses(&self, user_id: Uuid) -> Result<Vec<ApplicantResponseView>> {
        let items = sqlx::query_as::<_, ApplicantResponseView>(
            r#"
            SELECT
                vr.id,
                vr.message,
                vr.created_at,
                vr.status,
                v.id AS vacancy_id,
                v.title AS vacancy_title,
                u_co.name AS employer_name
            FROM vacancy_responses vr
            JOIN vacancies v ON vr.vacancy_id = v.id
            JOIN companies c ON v.company_id = c.id
            JOIN users u_co ON c.owner_id = u_co.id
            WHERE vr.user_id = $1
            ORDER BY vr.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Responses to any vacancy owned by this employer.
    pub async fn owner_responses(&self, owner_id: Uuid) -> Result<Vec<OwnerResponseView>> {
        let items = sqlx::query_as::<_, OwnerResponseView>(
            r#"
            SELECT
                vr.id,
                vr.message,
                vr.created_at,
                vr.status,
                u.id AS applicant_id,
                u.name AS applicant_name,
                v.id AS vacancy_id,
                v.title AS vacancy_title
            FROM vacancy_responses vr
            JOIN vacancies v ON vr.vacancy_id = v.id
            JOIN companies c ON v.company_id = c.id
            JOIN users u ON vr.user_id = u.id
            WHERE c.owner_id = $1
            ORDER BY vr.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Invitations an applicant has received.
    pub async fn applicant_invitations(
        &self,
        applicant_id: Uuid,
    ) -> Result<Vec<ApplicantInvitationView>> {
        let items = sqlx::query_as::<_, ApplicantInvitationView>(
            r#"
            SELECT
                vi.id,
                vi.message,
                vi.created_at,
                vi.status,
                v.id AS vacancy_id,
                v.title AS vacancy_title,
                u_co.id AS employer_id,
                u_co.name AS employer_name
            FROM vacancy_invitations vi
            JOIN vacancies v ON vi.vacancy_id = v.id
            JOIN users u_co ON vi.company_owner_id = u_co.id
            WHERE vi.applicant_id = $1
            ORDER BY vi.created_at DESC
            "#,
        )
        .bind(applicant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Invitations an employer has sent.
    pub async fn owner_invitations(&self, owner_id: Uuid) -> Result<Vec<OwnerInvitationView>> {
        let items = sqlx::query_as::<_, OwnerInvitationView>(
            r#"
            SELECT
                vi.id,
                vi.message,
                vi.created_at,
                vi.status,
                v.id AS vacancy_id,
                v.title AS vacancy_title,
                u_app.id AS applicant_id,
                u_app.name AS applicant_name
            FROM vacancy_invitations vi
            JOIN vacancies v ON vi.vacancy_id = v.id
            JOIN users u_app ON vi.applicant_id = u_app.id
            WHERE vi.company_owner_id = $1
            ORDER BY vi.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}

//! Response/invitation negotiation: idempotent upsert-create with
//! reactivation, and a checked status lifecycle.
//!
//! Responses (applicant -> vacancy) and invitations (owner -> applicant)
//! share the same shape: a row keyed by its natural key, created as
//! `pending`, reopened to `pending` by any resubmission, and moved to
//! `accepted`/`canceled` by the stakeholder on the other side. The
//! insert-or-reactivate step is a single `INSERT .. ON CONFLICT DO UPDATE`
//! so two concurrent submissions on the same key can neither duplicate the
//! row nor lose an update.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::negotiation::{NegotiationStatus, VacancyInvitation, VacancyResponse};
use crate::services::notification_service::NotificationService;

/// Outcome of an upsert, with an explicit flag for which branch ran.
#[derive(Debug, Clone)]
pub struct Upsert<T> {
    pub row: T,
    pub created: bool,
}

#[derive(Debug, FromRow)]
struct ResponseUpsertRow {
    id: Uuid,
    vacancy_id: Uuid,
    user_id: Uuid,
    message: String,
    created_at: DateTime<Utc>,
    status: String,
    created: bool,
}

#[derive(Debug, FromRow)]
struct InvitationUpsertRow {
    id: Uuid,
    company_owner_id: Uuid,
    applicant_id: Uuid,
    vacancy_id: Uuid,
    message: String,
    created_at: DateTime<Utc>,
    status: String,
    created: bool,
}

#[derive(Clone)]
pub struct NegotiationService {
    pool: PgPool,
    notifications: NotificationService,
}

impl NegotiationService {
    pub fn new(pool: PgPool, notifications: NotificationService) -> Self {
        Self { pool, notifications }
    }

    /// Submit (or resubmit) an applicant's response to a vacancy.
    ///
    /// Preconditions: the vacancy exists and the applicant has a résumé.
    /// A resubmission on the same (user_id, vacancy_id) key reactivates the
    /// existing row: status back to pending, message and created_at
    /// overwritten, whatever the prior status was.
    pub async fn submit_response(
        &self,
        vacancy_id: Uuid,
        applicant_id: Uuid,
        message: &str,
    ) -> Result<Upsert<VacancyResponse>> {
        let owner_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT c.owner_id
            FROM vacancies v
            JOIN companies c ON v.company_id = c.id
            WHERE v.id = $1
            "#,
        )
        .bind(vacancy_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::BadRequest("vacancy does not exist".to_string()))?;

        let has_resume = sqlx::query_scalar::<_, i32>("SELECT 1 FROM resumes WHERE user_id = $1")
            .bind(applicant_id)
            .fetch_optional(&self.pool)
            .await?;
        if has_resume.is_none() {
            return Err(Error::BadRequest(
                "create a resume before responding to vacancies".to_string(),
            ));
        }

        // xmax = 0 distinguishes a fresh insert from a conflict-update
        // without inferring it from data the client sent.
        let row = sqlx::query_as::<_, ResponseUpsertRow>(
            r#"
            INSERT INTO vacancy_responses (vacancy_id, user_id, message)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, vacancy_id)
            DO UPDATE SET
                status = 'pending',
                message = EXCLUDED.message,
                created_at = NOW()
            RETURNING id, vacancy_id, user_id, message, created_at, status,
                      (xmax = 0) AS created
            "#,
        )
        .bind(vacancy_id)
        .bind(applicant_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        self.notifications.notify(
            owner_id,
            "New vacancy response",
            "An applicant responded to your vacancy",
        );

        Ok(Upsert {
            created: row.created,
            row: VacancyResponse {
                id: row.id,
                vacancy_id: row.vacancy_id,
                user_id: row.user_id,
                message: row.message,
                created_at: row.created_at,
                status: row.status,
            },
        })
    }

    /// Submit (or resubmit) an employer's invitation to an applicant,
    /// keyed by (company_owner_id, applicant_id, vacancy_id).
    pub async fn submit_invitation(
        &self,
        owner_id: Uuid,
        vacancy_id: Uuid,
        applicant_id: Uuid,
        message: &str,
    ) -> Result<Upsert<VacancyInvitation>> {
        let vacancy_exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM vacancies WHERE id = $1")
            .bind(vacancy_id)
            .fetch_optional(&self.pool)
            .await?;
        if vacancy_exists.is_none() {
            return Err(Error::BadRequest("vacancy does not exist".to_string()));
        }

        let applicant_exists = sqlx::query_scalar::<_, i32>(
            "SELECT 1 FROM users WHERE id = $1 AND role = 'applicant'",
        )
        .bind(applicant_id)
        .fetch_optional(&self.pool)
        .await?;
        if applicant_exists.is_none() {
            return Err(Error::BadRequest("applicant does not exist".to_string()));
        }

        let row = sqlx::query_as::<_, InvitationUpsertRow>(
            r#"
            INSERT INTO vacancy_invitations (company_owner_id, applicant_id, vacancy_id, message)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (company_owner_id, applicant_id, vacancy_id)
            DO UPDATE SET
                status = 'pending',
                message = EXCLUDED.message,
                created_at = NOW()
            RETURNING id, company_owner_id, applicant_id, vacancy_id, message, created_at, status,
                      (xmax = 0) AS created
            "#,
        )
        .bind(owner_id)
        .bind(applicant_id)
        .bind(vacancy_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        self.notifications.notify(
            applicant_id,
            "New vacancy invitation",
            "An employer invited you to a vacancy",
        );

        Ok(Upsert {
            created: row.created,
            row: VacancyInvitation {
                id: row.id,
                company_owner_id: row.company_owner_id,
                applicant_id: row.applicant_id,
                vacancy_id: row.vacancy_id,
                message: row.message,
                created_at: row.created_at,
                status: row.status,
            },
        })
    }

    pub async fn response_by_id(&self, id: Uuid) -> Result<VacancyResponse> {
        let response = sqlx::query_as::<_, VacancyResponse>(
            "SELECT id, vacancy_id, user_id, message, created_at, status FROM vacancy_responses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("response not found".to_string()))?;
        Ok(response)
    }

    pub async fn invitation_by_id(&self, id: Uuid) -> Result<VacancyInvitation> {
        let invitation = sqlx::query_as::<_, VacancyInvitation>(
            "SELECT id, company_owner_id, applicant_id, vacancy_id, message, created_at, status FROM vacancy_invitations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("invitation not found".to_string()))?;
        Ok(invitation)
    }

    /// Move a response out of pending. The update is conditional on the
    /// status the caller saw, so a concurrent transition or resubmission
    /// surfaces as a conflict instead of silently overwriting.
    pub async fn set_response_status(
        &self,
        current: &VacancyResponse,
        target: NegotiationStatus,
    ) -> Result<VacancyResponse> {
        let from = parse_stored_status(&current.status)?;
        if !from.can_transition_to(target) {
            return Err(Error::Conflict(format!(
                "illegal status transition {} -> {}",
                from, target
            )));
        }

        let updated = sqlx::query_as::<_, VacancyResponse>(
            r#"
            UPDATE vacancy_responses
            SET status = $1
            WHERE id = $2 AND status = $3
            RETURNING id, vacancy_id, user_id, message, created_at, status
            "#,
        )
        .bind(target.as_str())
        .bind(current.id)
        .bind(from.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::Conflict("response status changed concurrently".to_string()))?;

        self.notifications.notify(
            updated.user_id,
            "Response status updated",
            &format!("Your response is now {}", updated.status),
        );

        Ok(updated)
    }

    pub async fn set_invitation_status(
        &self,
        current: &VacancyInvitation,
        target: NegotiationStatus,
    ) -> Result<VacancyInvitation> {
        let from = parse_stored_status(&current.status)?;
        if !from.can_transition_to(target) {
            return Err(Error::Conflict(format!(
                "illegal status transition {} -> {}",
                from, target
            )));
        }

        let updated = sqlx::query_as::<_, VacancyInvitation>(
            r#"
            UPDATE vacancy_invitations
            SET status = $1
            WHERE id = $2 AND status = $3
            RETURNING id, company_owner_id, applicant_id, vacancy_id, message, created_at, status
            "#,
        )
        .bind(target.as_str())
        .bind(current.id)
        .bind(from.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::Conflict("invitation status changed concurrently".to_string()))?;

        self.notifications.notify(
            updated.company_owner_id,
            "Invitation status updated",
            &format!("Your invitation is now {}", updated.status),
        );

        Ok(updated)
    }
}

fn parse_stored_status(raw: &str) -> Result<NegotiationStatus> {
    raw.parse()
        .map_err(|_| Error::Internal(format!("stored status {:?} is not recognized", raw)))
}

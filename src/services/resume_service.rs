use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::resume_dto::{OwnedResume, ResumePayload};
use crate::error::{is_unique_violation, Error, Result};
use crate::models::resume::Resume;
use crate::models::vacancy::ExperienceLevel;

#[derive(Clone)]
pub struct ResumeService {
    pool: PgPool,
}

impl ResumeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn check_payload(&self, payload: &ResumePayload) -> Result<()> {
        payload
            .experience_level
            .parse::<ExperienceLevel>()
            .map_err(|_| {
                Error::BadRequest(
                    "experience_level must be one of junior, middle, senior".to_string(),
                )
            })?;
        let spec = sqlx::query_scalar::<_, i32>("SELECT 1 FROM specializations WHERE id = $1")
            .bind(payload.specialization_id)
            .fetch_optional(&self.pool)
            .await?;
        if spec.is_none() {
            return Err(Error::BadRequest(
                "specialization does not exist".to_string(),
            ));
        }
        Ok(())
    }

    /// One résumé per applicant; the unique constraint on user_id backs it.
    pub async fn create(&self, user_id: Uuid, payload: ResumePayload) -> Result<Resume> {
        self.check_payload(&payload).await?;

        let resume = sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes (
                user_id, title, description, expected_salary,
                specialization_id, experience_level, location
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.expected_salary)
        .bind(payload.specialization_id)
        .bind(&payload.experience_level)
        .bind(&payload.location)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::Conflict("user already has a resume".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(resume)
    }

    pub async fn get_by_user(&self, user_id: Uuid) -> Result<OwnedResume> {
        let resume = sqlx::query_as::<_, OwnedResume>(
            r#"
            SELECT
                r.id,
                r.user_id,
                r.title,
                r.description,
                r.expected_salary,
                r.specialization_id,
                s.name AS specialization_name,
                r.experience_level,
                r.location,
                r.created_at
            FROM resumes r
            JOIN specializations s ON r.specialization_id = s.id
            WHERE r.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("resume not found".to_string()))?;

        Ok(resume)
    }

    pub async fn update(&self, id: Uuid, payload: ResumePayload) -> Result<Resume> {
        self.check_payload(&payload).await?;

        let resume = sqlx::query_as::<_, Resume>(
            r#"
            UPDATE resumes
            SET title = $2,
                description = $3,
                expected_salary = $4,
                specialization_id = $5,
                experience_level = $6,
                location = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.expected_salary)
        .bind(payload.specialization_id)
        .bind(&payload.experience_level)
        .bind(&payload.location)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("resume not found".to_string()))?;

        Ok(resume)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("resume not found".to_string()));
        }
        Ok(())
    }
}

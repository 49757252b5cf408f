use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vacancy_dto::{OwnedVacancy, VacancyPayload};
use crate::error::{Error, Result};
use crate::models::vacancy::{ExperienceLevel, Vacancy};

#[derive(Clone)]
pub struct VacancyService {
    pool: PgPool,
}

impl VacancyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn check_payload(&self, payload: &VacancyPayload) -> Result<()> {
        payload
            .experience_level
            .parse::<ExperienceLevel>()
            .map_err(|_| {
                Error::BadRequest(
                    "experience_level must be one of junior, middle, senior".to_string(),
                )
            })?;
        if payload.salary_from > payload.salary_to {
            return Err(Error::BadRequest(
                "salary_from must not exceed salary_to".to_string(),
            ));
        }
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

    pub async fn create(&self, payload: VacancyPayload) -> Result<Vacancy> {
        self.check_payload(&payload).await?;

        let vacancy = sqlx::query_as::<_, Vacancy>(
            r#"
            INSERT INTO vacancies (
                company_id, title, description, salary_from, salary_to,
                specialization_id, experience_level, location
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(payload.company_id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.salary_from)
        .bind(payload.salary_to)
        .bind(payload.specialization_id)
        .bind(&payload.experience_level)
        .bind(&payload.location)
        .fetch_one(&self.pool)
        .await?;

        Ok(vacancy)
    }

    /// Full replace; the write contract carries every field.
    pub async fn update(&self, id: Uuid, payload: VacancyPayload) -> Result<Vacancy> {
        self.check_payload(&payload).await?;

        let vacancy = sqlx::query_as::<_, Vacancy>(
            r#"
            UPDATE vacancies
            SET company_id = $2,
                title = $3,
                description = $4,
                salary_from = $5,
                salary_to = $6,
                specialization_id = $7,
                experience_level = $8,
                location = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.company_id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.salary_from)
        .bind(payload.salary_to)
        .bind(payload.specialization_id)
        .bind(&payload.experience_level)
        .bind(&payload.location)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("vacancy not found".to_string()))?;

        Ok(vacancy)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("vacancy not found".to_string()));
        }
        Ok(())
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<OwnedVacancy>> {
        let items = sqlx::query_as::<_, OwnedVacancy>(
            r#"
            SELECT
                v.id,
                v.company_id,
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
            JOIN companies c ON v.company_id = c.id
            JOIN specializations s ON v.specialization_id = s.id
            WHERE c.owner_id = $1
            ORDER BY v.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

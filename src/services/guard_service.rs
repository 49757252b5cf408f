//! Centralized authorization decisions: role plus ownership, one predicate
//! per resource kind. Decisions are pure reads over current storage state.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::user::Role;

/// The authenticated identity a request acts as.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn from_claims(claims: &Claims) -> Result<Self> {
        Ok(Self {
            id: claims.user_id()?,
            role: claims.role()?,
        })
    }
}

/// A resource reference an actor wants to mutate or read.
#[derive(Debug, Clone, Copy)]
pub enum Resource {
    Company(Uuid),
    Vacancy(Uuid),
    Resume(Uuid),
    Chat(Uuid),
}

#[derive(Clone)]
pub struct GuardService {
    pool: PgPool,
}

impl GuardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Deny unless the actor owns (or is a member of) the resource.
    ///
    /// Vacancy, résumé and chat misses are reported as not-found so a
    /// non-owner cannot distinguish "exists but not yours" from absence.
    /// Company misses stay forbidden.
    pub async fn ensure_owner(&self, actor: &Actor, resource: Resource) -> Result<()> {
        match resource {
            Resource::Company(id) => {
                let owns = sqlx::query_scalar::<_, i32>(
                    "SELECT 1 FROM companies WHERE id = $1 AND owner_id = $2",
                )
                .bind(id)
                .bind(actor.id)
                .fetch_optional(&self.pool)
                .await?;
                if owns.is_none() {
                    return Err(Error::Forbidden(
                        "user does not own this company".to_string(),
                    ));
                }
            }
            Resource::Vacancy(id) => {
                let owns = sqlx::query_scalar::<_, i32>(
                    r#"
                    SELECT 1
                    FROM vacancies v
                    JOIN companies c ON v.company_id = c.id
                    WHERE v.id = $1 AND c.owner_id = $2
                    "#,
                )
                .bind(id)
                .bind(actor.id)
                .fetch_optional(&self.pool)
                .await?;
                if owns.is_none() {
                    return Err(Error::NotFound(
                        "vacancy not found or not owned by user".to_string(),
                    ));
                }
            }
            Resource::Resume(id) => {
                let owns = sqlx::query_scalar::<_, i32>(
                    "SELECT 1 FROM resumes WHERE id = $1 AND user_id = $2",
                )
                .bind(id)
                .bind(actor.id)
                .fetch_optional(&self.pool)
                .await?;
                if owns.is_none() {
                    return Err(Error::NotFound(
                        "resume not found or not owned by user".to_string(),
                    ));
                }
            }
            Resource::Chat(id) => {
                if !self.is_chat_member(id, actor.id).await? {
                    return Err(Error::NotFound("chat not found".to_string()));
                }
            }
        }
        Ok(())
    }

    /// Membership check for chats; call sites decide between not-found
    /// (reads) and forbidden (writes).
    pub async fn is_chat_member(&self, chat_id: Uuid, user_id: Uuid) -> Result<bool> {
        let member = sqlx::query_scalar::<_, i32>(
            "SELECT 1 FROM chats WHERE id = $1 AND (applicant_id = $2 OR company_owner_id = $2)",
        )
        .bind(chat_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(member.is_some())
    }
}

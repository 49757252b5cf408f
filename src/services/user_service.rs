use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user_dto::{LoginPayload, LoginResponse, RegisterPayload, RegisteredUser, UserProfile};
use crate::error::{is_unique_violation, Error, Result};
use crate::models::company::Company;
use crate::models::user::{Role, User};
use crate::services::identity_service::IdentityService;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
    identity: IdentityService,
}

impl UserService {
    pub fn new(pool: PgPool, identity: IdentityService) -> Self {
        Self { pool, identity }
    }

    /// Register a user: create the identity remotely, then mirror it locally
    /// (user row plus company row for owners) in one transaction. If the
    /// local side fails after the remote create succeeded, the remote user
    /// is deleted again so the two stores do not diverge.
    pub async fn register(&self, payload: RegisterPayload) -> Result<RegisteredUser> {
        if payload.role == Role::CompanyOwner {
            let missing = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
            if missing(&payload.company_name) || missing(&payload.company_description) {
                return Err(Error::BadRequest(
                    "company_name and company_description are required for company_owner"
                        .to_string(),
                ));
            }
        }

        let taken = sqlx::query_scalar::<_, i32>("SELECT 1 FROM users WHERE email = $1")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?;
        if taken.is_some() {
            return Err(Error::Conflict("email is already taken".to_string()));
        }

        let user_id = self
            .identity
            .create_user(&payload.name, &payload.email, &payload.password, payload.role)
            .await?;

        match self.insert_local(user_id, &payload).await {
            Ok(user) => Ok(user),
            Err(err) => {
                if let Err(cleanup) = self.identity.delete_user(user_id).await {
                    tracing::error!(
                        error = ?cleanup,
                        user_id = %user_id,
                        "failed to remove identity-provider user after local registration failure"
                    );
                }
                Err(err)
            }
        }
    }

    async fn insert_local(&self, user_id: Uuid, payload: &RegisterPayload) -> Result<RegisteredUser> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, role, created_at
            "#,
        )
        .bind(user_id)
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(payload.role.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::Conflict("email is already taken".to_string())
            } else {
                e.into()
            }
        })?;

        let company = if payload.role == Role::CompanyOwner {
            let company = sqlx::query_as::<_, Company>(
                r#"
                INSERT INTO companies (name, description, owner_id)
                VALUES ($1, $2, $3)
                RETURNING id, name, description, owner_id, created_at
                "#,
            )
            .bind(payload.company_name.as_deref())
            .bind(payload.company_description.as_deref())
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;
            Some(company)
        } else {
            None
        };

        tx.commit().await?;

        Ok(RegisteredUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            company_id: company.as_ref().map(|c| c.id),
            company_name: company.as_ref().map(|c| c.name.clone()),
            company_description: company.map(|c| c.description),
        })
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<LoginResponse> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, created_at FROM users WHERE email = $1",
        )
        .bind(&payload.email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::Unauthorized("user not found".to_string()))?;

        if user.role != payload.role.as_str() {
            return Err(Error::Forbidden(format!(
                "expected role {}, account has role {}",
                payload.role, user.role
            )));
        }

        let tokens = self.identity.login(&payload.email, &payload.password).await?;

        let company = if payload.role == Role::CompanyOwner {
            let company = sqlx::query_as::<_, Company>(
                "SELECT id, name, description, owner_id, created_at FROM companies WHERE owner_id = $1",
            )
            .bind(user.id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                Error::BadRequest("company_owner account has no company".to_string())
            })?;
            Some(company)
        } else {
            None
        };

        Ok(LoginResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            company_id: company.as_ref().map(|c| c.id),
            company_name: company.as_ref().map(|c| c.name.clone()),
            company_description: company.map(|c| c.description),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<UserProfile> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT
                u.id,
                u.name,
                u.email,
                u.role,
                u.created_at,
                c.id AS company_id,
                c.name AS company_name,
                c.description AS company_description
            FROM users u
            LEFT JOIN companies c ON c.owner_id = u.id
            WHERE u.id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("user not found".to_string()))?;

        Ok(profile)
    }
}

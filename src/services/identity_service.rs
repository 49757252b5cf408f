//! Client for the external identity provider (a Keycloak-style realm).
//!
//! The provider owns credentials and token issuance; the local users table
//! only mirrors id/name/email/role. All calls go through a reqwest client
//! with a bounded timeout, so a stalled provider surfaces as an upstream
//! error instead of a hung request.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::user::Role;

#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenError {
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RoleRepresentation {
    id: String,
    name: String,
}

#[derive(Clone)]
pub struct IdentityService {
    http: Client,
    base_url: String,
    realm: String,
    client_id: String,
    admin_username: String,
    admin_password: String,
}

impl IdentityService {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.identity_base_url.clone(),
            realm: config.identity_realm.clone(),
            client_id: config.identity_client_id.clone(),
            admin_username: config.identity_admin_username.clone(),
            admin_password: config.identity_admin_password.clone(),
        }
    }

    async fn admin_token(&self) -> Result<String> {
        let resp = self
            .http
            .post(format!(
                "{}/realms/master/protocol/openid-connect/token",
                self.base_url
            ))
            .form(&[
                ("grant_type", "password"),
                ("client_id", "admin-cli"),
                ("username", self.admin_username.as_str()),
                ("password", self.admin_password.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let tokens: TokenPair = resp.json().await?;
        Ok(tokens.access_token)
    }

    /// Create a user with credentials and map the realm role. Returns the
    /// provider-assigned id, which becomes the local primary key.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Uuid> {
        let token = self.admin_token().await?;

        let resp = self
            .http
            .post(format!(
                "{}/admin/realms/{}/users",
                self.base_url, self.realm
            ))
            .bearer_auth(&token)
            .json(&json!({
                "username": email,
                "email": email,
                "enabled": true,
                "emailVerified": true,
                "firstName": name,
                "credentials": [{ "type": "password", "value": password, "temporary": false }],
            }))
            .send()
            .await?;

        if resp.status() == StatusCode::CONFLICT {
            return Err(Error::Conflict(
                "email is already registered with the identity provider".to_string(),
            ));
        }
        let resp = resp.error_for_status()?;

        let location = resp
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                Error::Internal("identity provider did not return the created user".to_string())
            })?;
        let user_id = location
            .rsplit('/')
            .next()
            .and_then(|id| Uuid::parse_str(id).ok())
            .ok_or_else(|| {
                Error::Internal("identity provider returned a malformed user id".to_string())
            })?;

        let role_rep: RoleRepresentation = self
            .http
            .get(format!(
                "{}/admin/realms/{}/roles/{}",
                self.base_url,
                self.realm,
                role.as_str()
            ))
            .bearer_auth(&token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        self.http
            .post(format!(
                "{}/admin/realms/{}/users/{}/role-mappings/realm",
                self.base_url, self.realm, user_id
            ))
            .bearer_auth(&token)
            .json(&json!([{ "id": role_rep.id, "name": role_rep.name }]))
            .send()
            .await?
            .error_for_status()?;

        Ok(user_id)
    }

    /// Compensating action for a failed registration: remove the remote
    /// user so the two stores do not diverge.
    pub async fn delete_user(&self, user_id: Uuid) -> Result<()> {
        let token = self.admin_token().await?;
        self.http
            .delete(format!(
                "{}/admin/realms/{}/users/{}",
                self.base_url, self.realm, user_id
            ))
            .bearer_auth(&token)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Password-grant login against the realm token endpoint.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        let resp = self
            .http
            .post(format!(
                "{}/realms/{}/protocol/openid-connect/token",
                self.base_url, self.realm
            ))
            .form(&[
                ("grant_type", "password"),
                ("client_id", self.client_id.as_str()),
                ("username", email),
                ("password", password),
            ])
            .send()
            .await?;

        if resp.status() == StatusCode::UNAUTHORIZED || resp.status() == StatusCode::BAD_REQUEST {
            let detail: TokenError = resp.json().await.unwrap_or(TokenError {
                error_description: None,
            });
            return Err(Error::Unauthorized(
                detail
                    .error_description
                    .unwrap_or_else(|| "authentication failed".to_string()),
            ));
        }

        let tokens: TokenPair = resp.error_for_status()?.json().await?;
        Ok(tokens)
    }
}

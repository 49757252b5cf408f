use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::user::Role;

/// Claims carried by the bearer token the identity provider issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| Error::Unauthorized("invalid subject claim".to_string()))
    }

    pub fn role(&self) -> Result<Role> {
        self.role
            .as_deref()
            .and_then(|r| r.parse().ok())
            .ok_or_else(|| Error::Forbidden("no recognized role claim".to_string()))
    }
}

pub fn decode_claims(token: &str, secret: &[u8]) -> std::result::Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation).map(|data| data.claims)
}

fn bearer_token(req: &Request) -> std::result::Result<&str, Response> {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"missing_authorization"})),
        )
            .into_response());
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"bad_authorization"})),
        )
            .into_response());
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"unsupported_scheme"})),
        )
            .into_response());
    };
    Ok(token)
}

async fn authorize(mut req: Request, next: Next, required: Option<Role>) -> Response {
    let token = match bearer_token(&req) {
        Ok(token) => token,
        Err(resp) => return resp,
    };

    let config = crate::config::get_config();
    let claims = match decode_claims(token, config.jwt_secret.as_bytes()) {
        Ok(claims) => claims,
        Err(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error":"invalid_token"})),
            )
                .into_response()
        }
    };

    if let Some(required) = required {
        let role = claims.role.as_deref().unwrap_or_default();
        if role != required.as_str() {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({"error": format!("forbidden: role {} required", required)})),
            )
                .into_response();
        }
    }

    req.extensions_mut().insert(claims);
    next.run(req).await
}

pub async fn require_auth(req: Request, next: Next) -> Response {
    authorize(req, next, None).await
}

pub async fn require_applicant(req: Request, next: Next) -> Response {
    authorize(req, next, Some(Role::Applicant)).await
}

pub async fn require_company_owner(req: Request, next: Next) -> Response {
    authorize(req, next, Some(Role::CompanyOwner)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &[u8] = b"test_secret_key";

    fn token(claims: &Claims, secret: &[u8]) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret)).unwrap()
    }

    fn claims(exp_offset: i64) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            exp: (chrono::Utc::now().timestamp() + exp_offset) as usize,
            role: Some("applicant".to_string()),
        }
    }

    #[test]
    fn valid_token_round_trips() {
        let claims = claims(3600);
        let decoded = decode_claims(&token(&claims, SECRET), SECRET).unwrap();
        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.role.as_deref(), Some("applicant"));
        assert!(decoded.user_id().is_ok());
        assert_eq!(decoded.role().unwrap(), Role::Applicant);
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = claims(-3600);
        assert!(decode_claims(&token(&claims, SECRET), SECRET).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = claims(3600);
        assert!(decode_claims(&token(&claims, b"other_secret"), SECRET).is_err());
    }

    #[test]
    fn non_uuid_subject_is_an_auth_error() {
        let claims = Claims {
            sub: "not-a-uuid".into(),
            exp: 0,
            role: None,
        };
        assert!(claims.user_id().is_err());
        assert!(claims.role().is_err());
    }
}

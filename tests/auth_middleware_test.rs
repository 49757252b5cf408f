use std::env;

use axum::{
    body::{to_bytes, Body},
    extract::Extension,
    http::{Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use jobboard_backend::middleware::auth::{require_applicant, require_auth, Claims};
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "test_secret_key";

fn init_test_config() {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "postgres://localhost/unused");
    env::set_var("JWT_SECRET", SECRET);
    env::set_var("IDENTITY_BASE_URL", "http://localhost:8080");
    env::set_var("IDENTITY_REALM", "jobboard");
    env::set_var("IDENTITY_CLIENT_ID", "jobboard-backend");
    env::set_var("IDENTITY_ADMIN_USERNAME", "admin");
    env::set_var("IDENTITY_ADMIN_PASSWORD", "admin");
    let _ = jobboard_backend::config::init_config();
}

fn issue_token(sub: &str, role: Option<&str>) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        role: role.map(str::to_string),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

async fn whoami(Extension(claims): Extension<Claims>) -> String {
    claims.sub
}

fn applicant_router() -> Router {
    Router::new()
        .route("/me", get(whoami))
        .route_layer(middleware::from_fn(require_applicant))
}

#[tokio::test]
async fn missing_authorization_header_is_rejected() {
    init_test_config();
    let response = applicant_router()
        .oneshot(Request::builder().uri("/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: JsonValue = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "missing_authorization");
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() {
    init_test_config();
    let response = applicant_router()
        .oneshot(
            Request::builder()
                .uri("/me")
                .header("Authorization", "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: JsonValue = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "unsupported_scheme");
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    init_test_config();
    let response = applicant_router()
        .oneshot(
            Request::builder()
                .uri("/me")
                .header("Authorization", "Bearer not.a.jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: JsonValue = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "invalid_token");
}

#[tokio::test]
async fn wrong_role_is_forbidden() {
    init_test_config();
    let token = issue_token(&Uuid::new_v4().to_string(), Some("company_owner"));
    let response = applicant_router()
        .oneshot(
            Request::builder()
                .uri("/me")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn matching_role_passes_claims_through() {
    init_test_config();
    let sub = Uuid::new_v4().to_string();
    let token = issue_token(&sub, Some("applicant"));
    let response = applicant_router()
        .oneshot(
            Request::builder()
                .uri("/me")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(String::from_utf8(body.to_vec()).unwrap(), sub);
}

#[tokio::test]
async fn require_auth_accepts_any_role() {
    init_test_config();
    let router = Router::new()
        .route("/me", get(whoami))
        .route_layer(middleware::from_fn(require_auth));

    for role in [Some("applicant"), Some("company_owner"), None] {
        let token = issue_token(&Uuid::new_v4().to_string(), role);
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

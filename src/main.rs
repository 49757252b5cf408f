use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use jobboard_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::auth::{require_applicant, require_auth, require_company_owner},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let public_api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/user/register", post(routes::user::register))
        .route("/user/login", post(routes::user::login))
        .route(
            "/specializations",
            get(routes::specialization::list_specializations),
        );

    let applicant_api = Router::new()
        .route("/vacancies/all", get(routes::vacancy::vacancies_feed))
        .route("/resumes", post(routes::resume::create_resume))
        .route("/resumes/my", get(routes::resume::my_resume))
        .route(
            "/resumes/:resume_id",
            patch(routes::resume::update_resume).delete(routes::resume::delete_resume),
        )
        .route(
            "/vacancies/:vacancy_id/responses",
            post(routes::negotiation::submit_response),
        )
        .route("/responses/vacancies", get(routes::negotiation::my_responses))
        .route(
            "/responses/vacancies-invited",
            get(routes::negotiation::my_invitations),
        )
        .route(
            "/vacancies/:vacancy_id/invitations/:invitation_id",
            patch(routes::negotiation::update_invitation_status),
        )
        .route_layer(middleware::from_fn(require_applicant));

    let owner_api = Router::new()
        .route("/vacancies", post(routes::vacancy::create_vacancy))
        .route("/vacancies/my", get(routes::vacancy::my_vacancies))
        .route(
            "/vacancies/:vacancy_id",
            patch(routes::vacancy::update_vacancy).delete(routes::vacancy::delete_vacancy),
        )
        .route("/resumes/all", get(routes::resume::resumes_feed))
        .route(
            "/vacancies/:vacancy_id/responses",
            get(routes::negotiation::list_vacancy_responses),
        )
        .route(
            "/vacancies/:vacancy_id/responses/:response_id",
            patch(routes::negotiation::update_response_status),
        )
        .route(
            "/vacancies/:vacancy_id/invitations",
            post(routes::negotiation::submit_invitation),
        )
        .route(
            "/responses/vacancies-owner",
            get(routes::negotiation::owner_responses),
        )
        .route(
            "/responses/vacancies-owner-invited",
            get(routes::negotiation::sent_invitations),
        )
        .route_layer(middleware::from_fn(require_company_owner));

    let authed_api = Router::new()
        .route("/user/profile", get(routes::user::my_profile))
        .route("/user/profile/:id", get(routes::user::profile_by_id))
        .route("/vacancy/:id", get(routes::vacancy::get_vacancy))
        .route("/resume/:id", get(routes::resume::get_resume))
        .route(
            "/chats",
            get(routes::chat::list_chats).post(routes::chat::create_chat),
        )
        .route(
            "/chats/:chat_id/messages",
            get(routes::chat::list_messages).post(routes::chat::post_message),
        )
        .route_layer(middleware::from_fn(require_auth));

    let app = public_api
        .merge(applicant_api)
        .merge(owner_api)
        .merge(authed_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{
    chat_service::ChatService, feed_service::FeedService, guard_service::GuardService,
    identity_service::IdentityService, negotiation_service::NegotiationService,
    notification_service::NotificationService, resume_service::ResumeService,
    user_service::UserService, vacancy_service::VacancyService,
};
use reqwest::Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub vacancy_service: VacancyService,
    pub resume_service: ResumeService,
    pub negotiation_service: NegotiationService,
    pub feed_service: FeedService,
    pub chat_service: ChatService,
    pub guard_service: GuardService,
    pub notification_service: NotificationService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        let identity_service = IdentityService::new(http_client.clone(), config);
        let notification_service =
            NotificationService::new(http_client, config.push_webhook_url.clone());
        let user_service = UserService::new(pool.clone(), identity_service);
        let vacancy_service = VacancyService::new(pool.clone());
        let resume_service = ResumeService::new(pool.clone());
        let negotiation_service =
            NegotiationService::new(pool.clone(), notification_service.clone());
        let feed_service = FeedService::new(pool.clone());
        let chat_service = ChatService::new(pool.clone(), notification_service.clone());
        let guard_service = GuardService::new(pool.clone());

        Self {
            pool,
            user_service,
            vacancy_service,
            resume_service,
            negotiation_service,
            feed_service,
            chat_service,
            guard_service,
            notification_service,
        }
    }
}

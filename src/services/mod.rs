pub mod chat_service;
pub mod feed_service;
pub mod guard_service;
pub mod identity_service;
pub mod negotiation_service;
pub mod notification_service;
pub mod resume_service;
pub mod user_service;
pub mod vacancy_service;

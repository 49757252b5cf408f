pub mod chat_dto;
pub mod feed_dto;
pub mod negotiation_dto;
pub mod resume_dto;
pub mod user_dto;
pub mod vacancy_dto;

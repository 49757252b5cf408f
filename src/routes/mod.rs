pub mod chat;
pub mod health;
pub mod negotiation;
pub mod resume;
pub mod specialization;
pub mod user;
pub mod vacancy;

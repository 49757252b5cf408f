pub mod chat;
pub mod company;
pub mod negotiation;
pub mod resume;
pub mod specialization;
pub mod user;
pub mod vacancy;

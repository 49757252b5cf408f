use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Static reference data seeded by the migrations.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Specialization {
    pub id: Uuid,
    pub name: String,
}

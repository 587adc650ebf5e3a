use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Room {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: Uuid,
    pub room_id: Uuid,
    pub question: String,
    pub answer: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Question {
    pub fn new(room_id: Uuid, question: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_id,
            question,
            answer: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

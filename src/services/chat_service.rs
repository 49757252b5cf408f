use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::chat_dto::CreateChatPayload;
use crate::error::{Error, Result};
use crate::models::chat::{Chat, Message};
use crate::services::negotiation_service::Upsert;
use crate::services::notification_service::NotificationService;

/// Empty and whitespace-only texts are rejected before touching storage.
fn validate_message_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::BadRequest("message must not be empty".to_string()));
    }
    Ok(())
}

fn ensure_caller_is_participant(payload: &CreateChatPayload, caller_id: Uuid) -> Result<()> {
    if caller_id != payload.applicant_id && caller_id != payload.company_owner_id {
        return Err(Error::Forbidden(
            "cannot create a chat on behalf of another user".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ChatService {
    pool: PgPool,
    notifications: NotificationService,
}

impl ChatService {
    pub fn new(pool: PgPool, notifications: NotificationService) -> Self {
        Self { pool, notifications }
    }

    /// Idempotent creation keyed by (applicant, owner, vacancy): safe to
    /// call on every "start chat" click. The unique index resolves the race
    /// between two concurrent creates; both callers get the same row.
    pub async fn create_or_get(
        &self,
        payload: &CreateChatPayload,
        caller_id: Uuid,
    ) -> Result<Upsert<Chat>> {
        ensure_caller_is_participant(payload, caller_id)?;

        let vacancy_exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM vacancies WHERE id = $1")
            .bind(payload.vacancy_id)
            .fetch_optional(&self.pool)
            .await?;
        if vacancy_exists.is_none() {
            return Err(Error::BadRequest("vacancy does not exist".to_string()));
        }

        let applicant_exists = sqlx::query_scalar::<_, i32>(
            "SELECT 1 FROM users WHERE id = $1 AND role = 'applicant'",
        )
        .bind(payload.applicant_id)
        .fetch_optional(&self.pool)
        .await?;
        if applicant_exists.is_none() {
            return Err(Error::BadRequest("applicant does not exist".to_string()));
        }

        let owner_exists = sqlx::query_scalar::<_, i32>(
            "SELECT 1 FROM users WHERE id = $1 AND role = 'company_owner'",
        )
        .bind(payload.company_owner_id)
        .fetch_optional(&self.pool)
        .await?;
        if owner_exists.is_none() {
            return Err(Error::BadRequest("company owner does not exist".to_string()));
        }

        let inserted = sqlx::query_as::<_, Chat>(
            r#"
            INSERT INTO chats (applicant_id, company_owner_id, vacancy_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (applicant_id, company_owner_id, vacancy_id) DO NOTHING
            RETURNING id, applicant_id, company_owner_id, vacancy_id, created_at
            "#,
        )
        .bind(payload.applicant_id)
        .bind(payload.company_owner_id)
        .bind(payload.vacancy_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(chat) = inserted {
            return Ok(Upsert { row: chat, created: true });
        }

        // Conflict: the row already exists, fetch it.
        let chat = sqlx::query_as::<_, Chat>(
            r#"
            SELECT id, applicant_id, company_owner_id, vacancy_id, created_at
            FROM chats
            WHERE applicant_id = $1 AND company_owner_id = $2 AND vacancy_id = $3
            "#,
        )
        .bind(payload.applicant_id)
        .bind(payload.company_owner_id)
        .bind(payload.vacancy_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Upsert { row: chat, created: false })
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Chat>> {
        let chats = sqlx::query_as::<_, Chat>(
            r#"
            SELECT id, applicant_id, company_owner_id, vacancy_id, created_at
            FROM chats
            WHERE applicant_id = $1 OR company_owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(chats)
    }

    /// Messages in ascending chronological order; id breaks timestamp ties
    /// so the order is stable. Membership is checked by the caller.
    pub async fn messages(&self, chat_id: Uuid) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, chat_id, sender_id, text, created_at
            FROM messages
            WHERE chat_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    pub async fn post_message(
        &self,
        chat_id: Uuid,
        sender_id: Uuid,
        text: &str,
    ) -> Result<Message> {
        validate_message_text(text)?;

        let chat = sqlx::query_as::<_, Chat>(
            "SELECT id, applicant_id, company_owner_id, vacancy_id, created_at FROM chats WHERE id = $1",
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("chat not found".to_string()))?;

        if sender_id != chat.applicant_id && sender_id != chat.company_owner_id {
            return Err(Error::Forbidden(
                "you are not a member of this chat".to_string(),
            ));
        }

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (chat_id, sender_id, text)
            VALUES ($1, $2, $3)
            RETURNING id, chat_id, sender_id, text, created_at
            "#,
        )
        .bind(chat_id)
        .bind(sender_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        let recipient = if sender_id == chat.applicant_id {
            chat.company_owner_id
        } else {
            chat.applicant_id
        };
        self.notifications
            .notify(recipient, "New message", "You have a new chat message");

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_text_is_rejected() {
        assert!(matches!(
            validate_message_text(""),
            Err(Error::BadRequest(_))
        ));
    }

    #[test]
    fn whitespace_only_message_text_is_rejected() {
        assert!(matches!(
            validate_message_text("   "),
            Err(Error::BadRequest(_))
        ));
        assert!(matches!(
            validate_message_text("\n\t "),
            Err(Error::BadRequest(_))
        ));
    }

    #[test]
    fn non_blank_message_text_is_accepted() {
        assert!(validate_message_text("hello").is_ok());
        assert!(validate_message_text("  padded  ").is_ok());
    }

    #[test]
    fn chat_creation_requires_caller_to_be_a_participant() {
        let payload = CreateChatPayload {
            applicant_id: Uuid::new_v4(),
            company_owner_id: Uuid::new_v4(),
            vacancy_id: Uuid::new_v4(),
        };

        assert!(ensure_caller_is_participant(&payload, payload.applicant_id).is_ok());
        assert!(ensure_caller_is_participant(&payload, payload.company_owner_id).is_ok());
        assert!(matches!(
            ensure_caller_is_participant(&payload, Uuid::new_v4()),
            Err(Error::Forbidden(_))
        ));
    }
}

//! Chat message repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ChatMessageEntity, ChatMessageTypeDb, ChatMessageWithRefsEntity};
use crate::metrics::QueryTimer;

const WITH_REFS_SELECT: &str = r#"
    SELECT
        c.id,
        c.business_id, b.name AS business_name,
        c.sender_id, s.full_name AS sender_full_name, s.email AS sender_email,
        c.receiver_id, rcv.full_name AS receiver_full_name, rcv.email AS receiver_email,
        c.team_id, t.name AS team_name,
        c.content, c.attachment, c.message_type, c.sent_at
    FROM chat_messages c
    JOIN businesses b ON c.business_id = b.id
    JOIN users s ON c.sender_id = s.id
    LEFT JOIN users rcv ON c.receiver_id = rcv.id
    LEFT JOIN teams t ON c.team_id = t.id
"#;

/// Repository for chat message operations.
#[derive(Clone)]
pub struct ChatMessageRepository {
    pool: PgPool,
}

impl ChatMessageRepository {
    /// Creates a new ChatMessageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new message.
    pub async fn create(
        &self,
        business_id: Uuid,
        sender_id: Uuid,
        receiver_id: Option<Uuid>,
        team_id: Option<Uuid>,
        content: Option<&str>,
        attachment: Option<&str>,
        message_type: ChatMessageTypeDb,
    ) -> Result<ChatMessageEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_chat_message");
        let result = sqlx::query_as::<_, ChatMessageEntity>(
            r#"
            INSERT INTO chat_messages (business_id, sender_id, receiver_id, team_id, content, attachment, message_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, business_id, sender_id, receiver_id, team_id, content, attachment, message_type, sent_at
            "#,
        )
        .bind(business_id)
        .bind(sender_id)
        .bind(receiver_id)
        .bind(team_id)
        .bind(content)
        .bind(attachment)
        .bind(message_type)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a message by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatMessageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_chat_message_by_id");
        let result = sqlx::query_as::<_, ChatMessageEntity>(
            r#"
            SELECT id, business_id, sender_id, receiver_id, team_id, content, attachment, message_type, sent_at
            FROM chat_messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a message by ID with all references expanded.
    pub async fn find_with_refs(
        &self,
        id: Uuid,
    ) -> Result<Option<ChatMessageWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_chat_message_with_refs");
        let result = sqlx::query_as::<_, ChatMessageWithRefsEntity>(&format!(
            "{WITH_REFS_SELECT} WHERE c.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Group messages of a team within a business, newest first.
    pub async fn list_group(
        &self,
        business_id: Uuid,
        team_id: Uuid,
    ) -> Result<Vec<ChatMessageWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_group_chat_messages");
        let result = sqlx::query_as::<_, ChatMessageWithRefsEntity>(&format!(
            r#"{WITH_REFS_SELECT}
            WHERE c.business_id = $1 AND c.team_id = $2 AND c.message_type = 'group'
            ORDER BY c.sent_at DESC"#
        ))
        .bind(business_id)
        .bind(team_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The two-way direct conversation between two users, newest first.
    pub async fn list_direct(
        &self,
        business_id: Uuid,
        user_id: Uuid,
        other_id: Uuid,
    ) -> Result<Vec<ChatMessageWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_direct_chat_messages");
        let result = sqlx::query_as::<_, ChatMessageWithRefsEntity>(&format!(
            r#"{WITH_REFS_SELECT}
            WHERE c.business_id = $1
              AND c.message_type = 'one_to_one'
              AND ((c.sender_id = $2 AND c.receiver_id = $3)
                OR (c.sender_id = $3 AND c.receiver_id = $2))
            ORDER BY c.sent_at DESC"#
        ))
        .bind(business_id)
        .bind(user_id)
        .bind(other_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Default feed for a user: their direct messages plus group messages
    /// of every team they belong to, newest first.
    pub async fn list_for_user(
        &self,
        business_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<ChatMessageWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_user_chat_messages");
        let result = sqlx::query_as::<_, ChatMessageWithRefsEntity>(&format!(
            r#"{WITH_REFS_SELECT}
            WHERE c.business_id = $1
              AND (
                (c.message_type = 'one_to_one' AND (c.sender_id = $2 OR c.receiver_id = $2))
                OR (c.message_type = 'group' AND c.team_id IN (
                    SELECT team_id FROM team_memberships WHERE user_id = $2
                ))
              )
            ORDER BY c.sent_at DESC"#
        ))
        .bind(business_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All messages of a business, newest first.
    pub async fn list_for_business(
        &self,
        business_id: Uuid,
    ) -> Result<Vec<ChatMessageWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_business_chat_messages");
        let result = sqlx::query_as::<_, ChatMessageWithRefsEntity>(&format!(
            "{WITH_REFS_SELECT} WHERE c.business_id = $1 ORDER BY c.sent_at DESC"
        ))
        .bind(business_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a message.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_chat_message");
        let result = sqlx::query("DELETE FROM chat_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected());
        timer.record();
        result
    }
}

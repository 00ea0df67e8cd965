//! Chat message entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::chat_message::{ChatMessage, ChatMessageResponse, ChatMessageType};
use domain::models::refs::{BusinessRef, TeamRef, UserRef};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum mapping for the chat_message_type type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "chat_message_type", rename_all = "snake_case")]
pub enum ChatMessageTypeDb {
    OneToOne,
    Group,
}

impl From<ChatMessageTypeDb> for ChatMessageType {
    fn from(db_type: ChatMessageTypeDb) -> Self {
        match db_type {
            ChatMessageTypeDb::OneToOne => ChatMessageType::OneToOne,
            ChatMessageTypeDb::Group => ChatMessageType::Group,
        }
    }
}

impl From<ChatMessageType> for ChatMessageTypeDb {
    fn from(ty: ChatMessageType) -> Self {
        match ty {
            ChatMessageType::OneToOne => ChatMessageTypeDb::OneToOne,
            ChatMessageType::Group => ChatMessageTypeDb::Group,
        }
    }
}

/// Database row mapping for the chat_messages table.
#[derive(Debug, Clone, FromRow)]
pub struct ChatMessageEntity {
    pub id: Uuid,
    pub business_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub content: Option<String>,
    pub attachment: Option<String>,
    pub message_type: ChatMessageTypeDb,
    pub sent_at: DateTime<Utc>,
}

impl From<ChatMessageEntity> for ChatMessage {
    fn from(entity: ChatMessageEntity) -> Self {
        Self {
            id: entity.id,
            business_id: entity.business_id,
            sender_id: entity.sender_id,
            receiver_id: entity.receiver_id,
            team_id: entity.team_id,
            content: entity.content,
            attachment: entity.attachment,
            message_type: entity.message_type.into(),
            sent_at: entity.sent_at,
        }
    }
}

/// Chat message row joined with all referenced display fields.
#[derive(Debug, Clone, FromRow)]
pub struct ChatMessageWithRefsEntity {
    pub id: Uuid,
    pub business_id: Uuid,
    pub business_name: String,
    pub sender_id: Uuid,
    pub sender_full_name: String,
    pub sender_email: String,
    pub receiver_id: Option<Uuid>,
    pub receiver_full_name: Option<String>,
    pub receiver_email: Option<String>,
    pub team_id: Option<Uuid>,
    pub team_name: Option<String>,
    pub content: Option<String>,
    pub attachment: Option<String>,
    pub message_type: ChatMessageTypeDb,
    pub sent_at: DateTime<Utc>,
}

impl From<ChatMessageWithRefsEntity> for ChatMessageResponse {
    fn from(entity: ChatMessageWithRefsEntity) -> Self {
        let receiver = match (
            entity.receiver_id,
            entity.receiver_full_name,
            entity.receiver_email,
        ) {
            (Some(id), Some(full_name), Some(email)) => Some(UserRef {
                id,
                full_name,
                email,
            }),
            _ => None,
        };
        let team = match (entity.team_id, entity.team_name) {
            (Some(id), Some(name)) => Some(TeamRef { id, name }),
            _ => None,
        };
        Self {
            id: entity.id,
            business: BusinessRef {
                id: entity.business_id,
                name: entity.business_name,
            },
            sender: UserRef {
                id: entity.sender_id,
                full_name: entity.sender_full_name,
                email: entity.sender_email,
            },
            receiver,
            team,
            content: entity.content,
            attachment: entity.attachment,
            message_type: entity.message_type.into(),
            sent_at: entity.sent_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_type_db_conversion() {
        assert_eq!(
            ChatMessageType::from(ChatMessageTypeDb::OneToOne),
            ChatMessageType::OneToOne
        );
        assert_eq!(
            ChatMessageTypeDb::from(ChatMessageType::Group),
            ChatMessageTypeDb::Group
        );
    }
}

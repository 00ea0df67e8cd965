//! Chat message domain models.
//!
//! Messages are scoped to a business and are either one-to-one (receiver
//! set, no team) or group (team set, no receiver). Exactly one of the two
//! targets is present, matching the message type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::refs::{BusinessRef, TeamRef, UserRef};

/// Kind of chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatMessageType {
    #[serde(rename = "one-to-one")]
    OneToOne,
    #[serde(rename = "group")]
    Group,
}

impl ChatMessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMessageType::OneToOne => "one-to-one",
            ChatMessageType::Group => "group",
        }
    }
}

impl FromStr for ChatMessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one-to-one" => Ok(ChatMessageType::OneToOne),
            "group" => Ok(ChatMessageType::Group),
            _ => Err(format!("Invalid message type: {}", s)),
        }
    }
}

impl fmt::Display for ChatMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A chat message row.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: Uuid,
    pub business_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub content: Option<String>,
    pub attachment: Option<String>,
    pub message_type: ChatMessageType,
    pub sent_at: DateTime<Utc>,
}

/// Fields of a send-message request, collected from multipart form data.
#[derive(Debug, Clone, Default)]
pub struct SendMessageFields {
    pub business_id: Option<String>,
    pub receiver_id: Option<String>,
    pub team_id: Option<String>,
    pub content: Option<String>,
    pub message_type: Option<String>,
}

/// Query parameters for listing chat messages.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListChatMessagesQuery {
    pub business_id: Option<String>,
    pub team_id: Option<String>,
    pub receiver_id: Option<String>,
}

/// Chat message representation with references expanded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageResponse {
    pub id: Uuid,
    pub business: BusinessRef,
    pub sender: UserRef,
    pub receiver: Option<UserRef>,
    pub team: Option<TeamRef>,
    pub content: Option<String>,
    pub attachment: Option<String>,
    #[serde(rename = "type")]
    pub message_type: ChatMessageType,
    pub sent_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_round_trip() {
        assert_eq!(
            ChatMessageType::from_str("one-to-one").unwrap(),
            ChatMessageType::OneToOne
        );
        assert_eq!(
            ChatMessageType::from_str("group").unwrap(),
            ChatMessageType::Group
        );
    }

    #[test]
    fn test_message_type_rejects_unknown() {
        assert!(ChatMessageType::from_str("broadcast").is_err());
        assert!(ChatMessageType::from_str("One-To-One").is_err());
    }

    #[test]
    fn test_message_type_serialization_uses_hyphenated_name() {
        assert_eq!(
            serde_json::to_string(&ChatMessageType::OneToOne).unwrap(),
            "\"one-to-one\""
        );
        assert_eq!(
            serde_json::to_string(&ChatMessageType::Group).unwrap(),
            "\"group\""
        );
    }

    #[test]
    fn test_message_type_deserialization() {
        let ty: ChatMessageType = serde_json::from_str("\"one-to-one\"").unwrap();
        assert_eq!(ty, ChatMessageType::OneToOne);
    }
}

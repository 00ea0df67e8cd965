//! Chat message routes.
//!
//! Sending is multipart with an optional attachment. The attachment is
//! accepted first, then the request is validated; every failure path after
//! the file was stored removes it again so no orphaned files remain
//! (accept-upload, validate, persist-or-cleanup).

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::entities::ChatMessageTypeDb;
use persistence::repositories::{
    BusinessMembershipRepository, BusinessRepository, ChatMessageRepository,
    TeamMembershipRepository, TeamRepository, UserRepository,
};
use serde_json::{json, Value};
use std::str::FromStr;
use tracing::info;

use domain::models::chat_message::{
    ChatMessageResponse, ChatMessageType, ListChatMessagesQuery, SendMessageFields,
};

use crate::app::AppState;
use crate::error::{parse_id, ApiError};
use crate::extractors::AuthUser;

/// Reads the multipart stream, storing the attachment as soon as it
/// appears. On error the path of an already-stored attachment is handed
/// back so the caller can remove it.
async fn collect_fields(
    state: &AppState,
    multipart: &mut Multipart,
) -> Result<(SendMessageFields, Option<String>), (Option<String>, ApiError)> {
    let mut fields = SendMessageFields::default();
    let mut attachment: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err((attachment, ApiError::Validation(e.to_string()))),
        };

        let name = field.name().unwrap_or_default().to_string();
        if name == "attachment" {
            let filename = field.file_name().unwrap_or("attachment.bin").to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = match field.bytes().await {
                Ok(bytes) => bytes,
                Err(e) => return Err((attachment, ApiError::Validation(e.to_string()))),
            };
            match state
                .uploads
                .save("attachment", &filename, &content_type, &bytes)
                .await
            {
                Ok(path) => attachment = Some(path),
                Err(e) => return Err((attachment, ApiError::Validation(e.to_string()))),
            }
        } else {
            let value = match field.text().await {
                Ok(value) => value,
                Err(e) => return Err((attachment, ApiError::Validation(e.to_string()))),
            };
            match name.as_str() {
                "businessId" => fields.business_id = Some(value),
                "receiverId" => fields.receiver_id = Some(value),
                "teamId" => fields.team_id = Some(value),
                "content" => fields.content = Some(value),
                "type" => fields.message_type = Some(value),
                _ => {}
            }
        }
    }

    Ok((fields, attachment))
}

/// Send a new chat message.
///
/// POST /api/chat-messages (multipart)
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ChatMessageResponse>), ApiError> {
    let (fields, attachment) = match collect_fields(&state, &mut multipart).await {
        Ok(collected) => collected,
        Err((stored, err)) => {
            if let Some(path) = stored {
                state.uploads.remove(&path).await;
            }
            return Err(err);
        }
    };

    match send_message_inner(&state, &auth, &fields, attachment.as_deref()).await {
        Ok(response) => Ok((StatusCode::CREATED, Json(response))),
        Err(err) => {
            if let Some(path) = &attachment {
                state.uploads.remove(path).await;
            }
            Err(err)
        }
    }
}

/// Validation and persistence of a send-message request; the caller
/// handles attachment cleanup on error.
async fn send_message_inner(
    state: &AppState,
    auth: &AuthUser,
    fields: &SendMessageFields,
    attachment: Option<&str>,
) -> Result<ChatMessageResponse, ApiError> {
    let business_raw = fields.business_id.as_deref().ok_or_else(|| {
        ApiError::Validation("Business ID and type are required".to_string())
    })?;
    let type_raw = fields.message_type.as_deref().ok_or_else(|| {
        ApiError::Validation("Business ID and type are required".to_string())
    })?;

    let message_type = ChatMessageType::from_str(type_raw)
        .map_err(|_| ApiError::Validation("Type must be one-to-one or group".to_string()))?;

    if fields.content.as_deref().map(str::trim).unwrap_or("").is_empty() && attachment.is_none() {
        return Err(ApiError::Validation(
            "Content or attachment is required".to_string(),
        ));
    }

    let business_id = parse_id(business_raw, "business ID")?;
    let sender_id = auth.user_id;

    let businesses = BusinessRepository::new(state.pool.clone());
    if businesses.find_by_id(business_id).await?.is_none() {
        return Err(ApiError::NotFound("Business not found".to_string()));
    }

    let business_memberships = BusinessMembershipRepository::new(state.pool.clone());
    if business_memberships
        .find_by_business_and_user(business_id, sender_id, None)
        .await?
        .is_none()
    {
        return Err(ApiError::Forbidden(
            "Sender is not a member of the business".to_string(),
        ));
    }

    let (receiver_id, team_id) = match message_type {
        ChatMessageType::OneToOne => {
            let receiver_raw = fields.receiver_id.as_deref().ok_or_else(|| {
                ApiError::Validation("Receiver ID is required for one-to-one chat".to_string())
            })?;
            if fields.team_id.is_some() {
                return Err(ApiError::Validation(
                    "Team ID should be null for one-to-one chat".to_string(),
                ));
            }
            let receiver_id = parse_id(receiver_raw, "receiver ID")?;

            let users = UserRepository::new(state.pool.clone());
            if users.find_by_id(receiver_id).await?.is_none() {
                return Err(ApiError::NotFound("Receiver not found".to_string()));
            }

            if business_memberships
                .find_by_business_and_user(business_id, receiver_id, None)
                .await?
                .is_none()
            {
                return Err(ApiError::Forbidden(
                    "Receiver is not a member of the business".to_string(),
                ));
            }

            (Some(receiver_id), None)
        }
        ChatMessageType::Group => {
            let team_raw = fields.team_id.as_deref().ok_or_else(|| {
                ApiError::Validation("Team ID is required for group chat".to_string())
            })?;
            if fields.receiver_id.is_some() {
                return Err(ApiError::Validation(
                    "Receiver ID should be null for group chat".to_string(),
                ));
            }
            let team_id = parse_id(team_raw, "team ID")?;

            let teams = TeamRepository::new(state.pool.clone());
            let team = teams
                .find_by_id(team_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

            if team.business_id != business_id {
                return Err(ApiError::Validation(
                    "Team does not belong to the specified business".to_string(),
                ));
            }

            let team_memberships = TeamMembershipRepository::new(state.pool.clone());
            if team_memberships
                .find_by_team_and_user(team_id, sender_id, None)
                .await?
                .is_none()
            {
                return Err(ApiError::Forbidden(
                    "Sender is not a member of the team".to_string(),
                ));
            }

            (None, Some(team_id))
        }
    };

    let repo = ChatMessageRepository::new(state.pool.clone());
    let message = repo
        .create(
            business_id,
            sender_id,
            receiver_id,
            team_id,
            fields.content.as_deref().filter(|c| !c.trim().is_empty()),
            attachment,
            ChatMessageTypeDb::from(message_type),
        )
        .await?;

    info!(
        message_id = %message.id,
        business_id = %business_id,
        sender_id = %sender_id,
        message_type = %message_type,
        has_attachment = attachment.is_some(),
        "Chat message sent"
    );

    let populated = repo
        .find_with_refs(message.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch created message".to_string()))?;

    Ok(populated.into())
}

/// Get chat messages.
///
/// GET /api/chat-messages?businessId=...[&teamId=...][&receiverId=...]
///
/// Without a filter, returns the caller's direct messages plus group
/// messages of every team the caller belongs to.
pub async fn get_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListChatMessagesQuery>,
) -> Result<Json<Vec<ChatMessageResponse>>, ApiError> {
    let business_raw = query
        .business_id
        .as_deref()
        .ok_or_else(|| ApiError::Validation("Business ID is required".to_string()))?;
    let business_id = parse_id(business_raw, "business ID")?;
    let user_id = auth.user_id;

    let business_memberships = BusinessMembershipRepository::new(state.pool.clone());
    if business_memberships
        .find_by_business_and_user(business_id, user_id, None)
        .await?
        .is_none()
    {
        return Err(ApiError::Forbidden(
            "You are not a member of this business".to_string(),
        ));
    }

    let repo = ChatMessageRepository::new(state.pool.clone());

    let messages = if let Some(team_raw) = query.team_id.as_deref() {
        let team_id = parse_id(team_raw, "team ID")?;

        let team_memberships = TeamMembershipRepository::new(state.pool.clone());
        if team_memberships
            .find_by_team_and_user(team_id, user_id, None)
            .await?
            .is_none()
        {
            return Err(ApiError::Forbidden(
                "You are not a member of this team".to_string(),
            ));
        }

        repo.list_group(business_id, team_id).await?
    } else if let Some(receiver_raw) = query.receiver_id.as_deref() {
        let receiver_id = parse_id(receiver_raw, "receiver ID")?;
        repo.list_direct(business_id, user_id, receiver_id).await?
    } else {
        repo.list_for_user(business_id, user_id).await?
    };

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

/// Get all messages within a business.
///
/// GET /api/chat-messages/business/:businessId
pub async fn get_business_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(business_id): Path<String>,
) -> Result<Json<Vec<ChatMessageResponse>>, ApiError> {
    let business_id = parse_id(&business_id, "business ID")?;

    let businesses = BusinessRepository::new(state.pool.clone());
    if businesses.find_by_id(business_id).await?.is_none() {
        return Err(ApiError::NotFound("Business not found".to_string()));
    }

    let business_memberships = BusinessMembershipRepository::new(state.pool.clone());
    if business_memberships
        .find_by_business_and_user(business_id, auth.user_id, None)
        .await?
        .is_none()
    {
        return Err(ApiError::Forbidden(
            "You are not a member of this business".to_string(),
        ));
    }

    let repo = ChatMessageRepository::new(state.pool.clone());
    let messages = repo.list_for_business(business_id).await?;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

/// Delete a chat message.
///
/// DELETE /api/chat-messages/:id
///
/// Only the original sender may delete; the attachment file is removed
/// best effort before the row.
pub async fn delete_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "message ID")?;
    let repo = ChatMessageRepository::new(state.pool.clone());

    let message = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Message not found".to_string()))?;

    if message.sender_id != auth.user_id {
        return Err(ApiError::Forbidden(
            "You can only delete your own messages".to_string(),
        ));
    }

    if let Some(attachment) = &message.attachment {
        state.uploads.remove(attachment).await;
    }

    repo.delete(id).await?;

    info!(message_id = %id, user_id = %auth.user_id, "Chat message deleted");

    Ok(Json(json!({ "message": "Message deleted successfully" })))
}

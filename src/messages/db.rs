/**
 * Message Model and Database Operations
 *
 * This module defines the message entity and its database operations.
 * Messages are immutable once created: there are inserts and reads, no
 * updates.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A direct message between two users
///
/// At least one of `text` and `image_url` is present; this is enforced at
/// creation time by the send handler. The struct serializes in camelCase,
/// which is also the shape pushed over the WebSocket as the `newMessage`
/// event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message ID (UUID)
    pub id: Uuid,
    /// Sending user
    pub sender_id: Uuid,
    /// Receiving user
    pub receiver_id: Uuid,
    /// Text body, if any
    pub text: Option<String>,
    /// Public path of an attached image, if any
    pub image_url: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Persist a new message
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `sender_id` - Sending user
/// * `receiver_id` - Receiving user
/// * `text` - Optional text body
/// * `image_url` - Optional stored-image path
///
/// # Returns
/// The created message
pub async fn create_message(
    pool: &PgPool,
    sender_id: Uuid,
    receiver_id: Uuid,
    text: Option<String>,
    image_url: Option<String>,
) -> Result<Message, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let message = sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (id, sender_id, receiver_id, text, image_url, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, sender_id, receiver_id, text, image_url, created_at
        "#,
    )
    .bind(id)
    .bind(sender_id)
    .bind(receiver_id)
    .bind(&text)
    .bind(&image_url)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(message)
}

/// Full message history between two users, in both directions
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `a` - One user
/// * `b` - The other user
///
/// # Returns
/// Messages ordered ascending by creation time
pub async fn find_messages_between(
    pool: &PgPool,
    a: Uuid,
    b: Uuid,
) -> Result<Vec<Message>, sqlx::Error> {
    let messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, sender_id, receiver_id, text, image_url, created_at
        FROM messages
        WHERE (sender_id = $1 AND receiver_id = $2)
           OR (sender_id = $2 AND receiver_id = $1)
        ORDER BY created_at ASC
        "#,
    )
    .bind(a)
    .bind(b)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serializes_camel_case() {
        let message = Message {
            id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            receiver_id: Uuid::new_v4(),
            text: Some("hi".to_string()),
            image_url: Some("/uploads/x.png".to_string()),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("senderId").is_some());
        assert!(json.get("receiverId").is_some());
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("createdAt").is_some());
    }
}

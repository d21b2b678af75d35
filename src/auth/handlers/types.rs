/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by the
 * authentication handlers.
 */

use crate::auth::users::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sign up request
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// User's email address
    pub email: String,
    /// User's display name
    pub full_name: String,
    /// User's password (will be hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// User's email address
    pub email: String,
    /// User's password (verified against the stored hash)
    pub password: String,
}

/// Profile update request
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New profile picture as a base64 data URL
    pub profile_pic: String,
}

/// User response (without sensitive data)
///
/// Contains user information that is safe to return to clients.
/// Does not include the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User's unique ID (UUID)
    pub id: Uuid,
    /// User's email address
    pub email: String,
    /// User's display name
    pub full_name: String,
    /// Public path of the profile picture, if set
    pub profile_pic: Option<String>,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            profile_pic: user.profile_pic,
            created_at: user.created_at,
        }
    }
}

/// Plain status message response (logout)
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_excludes_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            full_name: "Test User".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            profile_pic: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = UserResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let request: SignupRequest = serde_json::from_str(
            r#"{"email":"a@b.c","fullName":"A B","password":"hunter42"}"#,
        )
        .unwrap();
        assert_eq!(request.full_name, "A B");

        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.c".to_string(),
            full_name: "A B".to_string(),
            password_hash: String::new(),
            profile_pic: Some("/uploads/x.png".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("fullName").is_some());
        assert!(json.get("profilePic").is_some());
    }
}

//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User domain entity.
///
/// `places` holds the ids of every place this user created. It is kept
/// consistent with `Place::creator` by the transactional create/delete
/// paths in the place service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Normalized (lowercased, trimmed), unique across all users.
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Avatar URL in the image store.
    pub image: String,
    /// Image store deletion handle.
    #[serde(skip_serializing)]
    pub image_handle: String,
    pub places: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with an empty place list.
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        image: String,
        image_handle: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email: normalize_email(&email),
            password_hash,
            image,
            image_handle,
            places: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Check whether this user owns the given place id.
    pub fn owns_place(&self, place_id: Uuid) -> bool {
        self.places.contains(&place_id)
    }
}

/// Normalize an email address for lookup and uniqueness checks.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// User representation safe to return to clients (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub image: String,
    pub places: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            image: user.image,
            places: user.places,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized_on_creation() {
        let user = User::new(
            "maxi".into(),
            "  Max@Example.COM ".into(),
            "hash".into(),
            "https://img.test/a.png".into(),
            "handle".into(),
        );
        assert_eq!(user.email, "max@example.com");
        assert!(user.places.is_empty());
    }

    #[test]
    fn password_hash_never_serializes() {
        let user = User::new(
            "maxi".into(),
            "max@example.com".into(),
            "super-secret-hash".into(),
            "https://img.test/a.png".into(),
            "handle".into(),
        );
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("super-secret-hash"));
        assert!(!json.to_lowercase().contains("password"));
    }
}

//! Place domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::{capitalize_first, title_case};

/// Geographic coordinates resolved once from the place address.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Place domain entity.
///
/// `creator` and `location` are immutable after creation; only `title`
/// and `description` change through updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub location: GeoPoint,
    /// Photo URL in the image store.
    pub image: String,
    /// Image store deletion handle.
    #[serde(skip_serializing)]
    pub image_handle: String,
    pub creator: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Place {
    /// Create a new place, applying the creation-time formatting policy:
    /// title capitalized per word, description capitalized at the first
    /// character, address trimmed.
    pub fn new(
        title: &str,
        description: &str,
        address: &str,
        location: GeoPoint,
        image: String,
        image_handle: String,
        creator: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title_case(title),
            description: capitalize_first(description),
            address: address.trim().to_string(),
            location,
            image,
            image_handle,
            creator,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the mutable-field changes allowed by updates.
    ///
    /// Values are stored verbatim; the formatting policy runs at
    /// creation only.
    pub fn update_content(&mut self, title: &str, description: &str) {
        self.title = title.to_string();
        self.description = description.to_string();
        self.updated_at = Utc::now();
    }
}

/// A place joined with its creator's username for the global listing.
///
/// Only the username crosses this boundary; the full user record (and
/// with it the password hash) never does.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceWithCreator {
    #[serde(flatten)]
    pub place: Place,
    pub creator_username: String,
}

/// Fields accepted by the create-place operation.
#[derive(Debug, Clone)]
pub struct CreatePlace {
    pub title: String,
    pub description: String,
    pub address: String,
    pub image: crate::infra::UploadedImage,
}

/// Fields accepted by the update-place operation.
#[derive(Debug, Clone)]
pub struct UpdatePlace {
    pub title: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_applies_formatting_policy() {
        let place = Place::new(
            "the eiffel tower",
            "a tall iron lattice tower",
            "  Paris, France ",
            GeoPoint {
                lat: 48.8584,
                lng: 2.2945,
            },
            "https://img.test/tower.png".into(),
            "handle".into(),
            Uuid::new_v4(),
        );
        assert_eq!(place.title, "The Eiffel Tower");
        assert_eq!(place.description, "A tall iron lattice tower");
        assert_eq!(place.address, "Paris, France");
    }

    #[test]
    fn update_keeps_location_and_creator() {
        let creator = Uuid::new_v4();
        let location = GeoPoint { lat: 1.0, lng: 2.0 };
        let mut place = Place::new(
            "old title",
            "old description",
            "somewhere",
            location,
            "url".into(),
            "handle".into(),
            creator,
        );

        place.update_content("new title", "fresh description");

        assert_eq!(place.location, location);
        assert_eq!(place.creator, creator);
    }

    #[test]
    fn update_stores_text_verbatim() {
        let mut place = Place::new(
            "old title",
            "old description",
            "somewhere",
            GeoPoint { lat: 1.0, lng: 2.0 },
            "url".into(),
            "handle".into(),
            Uuid::new_v4(),
        );

        place.update_content("brand new name", "still worth the detour");

        // No creation-time formatting on the update path
        assert_eq!(place.title, "brand new name");
        assert_eq!(place.description, "still worth the detour");
    }

    #[test]
    fn image_handle_never_serializes() {
        let place = Place::new(
            "t",
            "desc here",
            "addr",
            GeoPoint { lat: 0.0, lng: 0.0 },
            "url".into(),
            "secret-handle".into(),
            Uuid::new_v4(),
        );
        let json = serde_json::to_string(&place).unwrap();
        assert!(!json.contains("secret-handle"));
    }
}

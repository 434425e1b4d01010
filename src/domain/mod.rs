//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod password;
pub mod place;
pub mod user;

pub use password::Password;
pub use place::{CreatePlace, GeoPoint, Place, PlaceWithCreator, UpdatePlace};
pub use user::{normalize_email, User, UserResponse};

//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Unit of Work for transaction management
//! - Geocoder and image store clients

pub mod db;
pub mod geocoder;
pub mod image_store;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use geocoder::{Geocoder, PositionStack};
pub use image_store::{Cloudinary, ImageStore, StoredImage, UploadedImage};
pub use repositories::{PlaceRepository, PlaceStore, UserRepository, UserStore};
pub use unit_of_work::{Persistence, TxClosure, TxContext, TxFuture, UnitOfWork};

#[cfg(test)]
pub use geocoder::MockGeocoder;
#[cfg(test)]
pub use image_store::MockImageStore;
#[cfg(test)]
pub use repositories::{MockPlaceRepository, MockUserRepository};

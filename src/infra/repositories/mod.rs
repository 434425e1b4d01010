//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod place_repository;
mod user_repository;

pub use place_repository::{PlaceRepository, PlaceStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for unit tests
#[cfg(test)]
pub use place_repository::MockPlaceRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

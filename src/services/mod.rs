//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and use the Unit of Work for repository access
//! and transaction management.

mod auth_service;
pub mod container;
mod place_service;
mod user_service;

pub use container::Services;

pub use auth_service::{AuthResponse, AuthService, Authenticator, Claims, SignupInput};
pub use place_service::{AllPlacesPage, PlaceManager, PlaceService, UserPlacesPage};
pub use user_service::{UserManager, UserService};

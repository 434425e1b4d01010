//! Service container - builds and wires the application services.

use std::sync::Arc;

use super::{AuthService, Authenticator, PlaceManager, PlaceService, UserManager, UserService};
use crate::config::Config;
use crate::infra::{Cloudinary, Persistence, PositionStack};

/// Concrete service container holding every application service.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    place_service: Arc<dyn PlaceService>,
}

impl Services {
    /// Create a new service container with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        place_service: Arc<dyn PlaceService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            place_service,
        }
    }

    /// Build the full service graph from a database connection and
    /// configuration: unit of work, external clients, then services.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let geocoder = Arc::new(PositionStack::new(&config));
        let images = Arc::new(Cloudinary::new(&config));

        let auth_service = Arc::new(Authenticator::new(uow.clone(), images.clone(), config));
        let user_service = Arc::new(UserManager::new(uow.clone()));
        let place_service = Arc::new(PlaceManager::new(uow, geocoder, images));

        Self {
            auth_service,
            user_service,
            place_service,
        }
    }

    /// Get authentication service
    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    /// Get user service
    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    /// Get place service
    pub fn places(&self) -> Arc<dyn PlaceService> {
        self.place_service.clone()
    }
}

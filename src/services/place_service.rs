//! Place service - the consistency core.
//!
//! Orchestrates place creation, update and deletion behind the
//! validation, authorization and transaction gates that keep the
//! User-Place cross-references consistent.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::IMAGE_FOLDER_PLACES;
use crate::domain::{CreatePlace, Place, PlaceWithCreator, UpdatePlace};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{Geocoder, ImageStore, UnitOfWork};
use crate::types::PageRequest;

/// A page of a single user's places with the total count.
#[derive(Debug)]
pub struct UserPlacesPage {
    pub places: Vec<Place>,
    pub count: u64,
}

/// A page over all places with the total count.
#[derive(Debug)]
pub struct AllPlacesPage {
    pub places: Vec<PlaceWithCreator>,
    pub count: u64,
}

/// Place service trait for dependency injection.
#[async_trait]
pub trait PlaceService: Send + Sync {
    /// Get a place by id
    async fn get_place(&self, id: Uuid) -> AppResult<Place>;

    /// Page over all places, newest first, with creator usernames
    async fn list_places(&self, page: PageRequest) -> AppResult<AllPlacesPage>;

    /// Page of one user's places, newest first
    async fn list_places_by_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> AppResult<UserPlacesPage>;

    /// Create a place owned by the caller
    async fn create_place(&self, caller: Uuid, input: CreatePlace) -> AppResult<Place>;

    /// Update a place's title and description (creator only)
    async fn update_place(&self, caller: Uuid, id: Uuid, input: UpdatePlace) -> AppResult<Place>;

    /// Delete a place and detach it from its creator (creator only)
    async fn delete_place(&self, caller: Uuid, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of PlaceService using Unit of Work.
pub struct PlaceManager<U: UnitOfWork> {
    uow: Arc<U>,
    geocoder: Arc<dyn Geocoder>,
    images: Arc<dyn ImageStore>,
}

impl<U: UnitOfWork> PlaceManager<U> {
    /// Create new place service instance
    pub fn new(uow: Arc<U>, geocoder: Arc<dyn Geocoder>, images: Arc<dyn ImageStore>) -> Self {
        Self {
            uow,
            geocoder,
            images,
        }
    }

    /// Load a place and check the caller owns it.
    async fn load_owned(&self, caller: Uuid, id: Uuid) -> AppResult<Place> {
        let place = self
            .uow
            .places()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if place.creator != caller {
            return Err(AppError::Unauthorized);
        }

        Ok(place)
    }
}

#[async_trait]
impl<U: UnitOfWork> PlaceService for PlaceManager<U> {
    async fn get_place(&self, id: Uuid) -> AppResult<Place> {
        self.uow.places().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_places(&self, page: PageRequest) -> AppResult<AllPlacesPage> {
        let (places, count) = self.uow.places().list_all(page).await?;
        Ok(AllPlacesPage { places, count })
    }

    async fn list_places_by_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> AppResult<UserPlacesPage> {
        // The listing is keyed by user, so a missing user is a 404
        // rather than an empty page
        self.uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let (places, count) = self.uow.places().list_by_creator(user_id, page).await?;
        Ok(UserPlacesPage { places, count })
    }

    async fn create_place(&self, caller: Uuid, input: CreatePlace) -> AppResult<Place> {
        // Both external lookups happen before any store write, so a
        // failure here aborts with nothing to undo
        let location = self.geocoder.resolve(input.address.trim()).await?;
        let stored = self
            .images
            .upload(&input.image, IMAGE_FOLDER_PLACES)
            .await?;

        // Should always hold for a valid token; checked anyway
        let creator = self
            .uow
            .users()
            .find_by_id(caller)
            .await?
            .ok_or(AppError::NotFound)?;

        let place = Place::new(
            &input.title,
            &input.description,
            &input.address,
            location,
            stored.url,
            stored.handle,
            creator.id,
        );

        let record = place.clone();
        self.uow
            .transaction(Box::new(move |tx| {
                Box::pin(async move {
                    tx.insert_place(&record).await?;
                    tx.attach_place(record.creator, record.id).await
                })
            }))
            .await?;

        tracing::info!(place_id = %place.id, creator = %place.creator, "place created");

        Ok(place)
    }

    async fn update_place(&self, caller: Uuid, id: Uuid, input: UpdatePlace) -> AppResult<Place> {
        let mut place = self.load_owned(caller, id).await?;

        // Single-row write; location, creator and image never change here
        place.update_content(&input.title, &input.description);
        self.uow.places().update_content(place).await
    }

    async fn delete_place(&self, caller: Uuid, id: Uuid) -> AppResult<()> {
        let place = self.load_owned(caller, id).await?;

        // Best-effort remote cleanup; a failure here must not block the
        // delete, it only leaks the hosted image
        if let Err(e) = self.images.delete(&place.image_handle).await {
            tracing::warn!(place_id = %id, error = %e, "image store delete failed, continuing");
        }

        let place_id = place.id;
        let creator = place.creator;
        self.uow
            .transaction(Box::new(move |tx| {
                Box::pin(async move {
                    tx.remove_place(place_id).await?;
                    tx.detach_place(creator, place_id).await
                })
            }))
            .await?;

        tracing::info!(place_id = %id, creator = %creator, "place deleted");

        Ok(())
    }
}

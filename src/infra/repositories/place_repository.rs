//! Place repository - place store access for read paths and
//! single-row updates. Cross-entity writes go through the unit of work.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::place::{self, Entity as PlaceEntity};
use super::entities::user::{self, Entity as UserEntity};
use crate::domain::{Place, PlaceWithCreator};
use crate::errors::{AppError, AppResult};
use crate::types::PageRequest;

/// Place store abstraction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Find place by id
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Place>>;

    /// Persist title/description changes (single-row write)
    async fn update_content(&self, place: Place) -> AppResult<Place>;

    /// Page of a user's places, newest first, with the total count
    async fn list_by_creator(
        &self,
        creator: Uuid,
        page: PageRequest,
    ) -> AppResult<(Vec<Place>, u64)>;

    /// Page over all places joined with creator usernames, newest first
    async fn list_all(&self, page: PageRequest) -> AppResult<(Vec<PlaceWithCreator>, u64)>;
}

/// SeaORM-backed place store.
pub struct PlaceStore {
    db: DatabaseConnection,
}

impl PlaceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlaceRepository for PlaceStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Place>> {
        let result = PlaceEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Place::from))
    }

    async fn update_content(&self, updated: Place) -> AppResult<Place> {
        let existing = PlaceEntity::find_by_id(updated.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: place::ActiveModel = existing.into();
        active.title = Set(updated.title.clone());
        active.description = Set(updated.description.clone());
        active.updated_at = Set(updated.updated_at);

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Place::from(model))
    }

    async fn list_by_creator(
        &self,
        creator: Uuid,
        page: PageRequest,
    ) -> AppResult<(Vec<Place>, u64)> {
        let total = PlaceEntity::find()
            .filter(place::Column::Creator.eq(creator))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        let models = PlaceEntity::find()
            .filter(place::Column::Creator.eq(creator))
            .order_by_desc(place::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok((models.into_iter().map(Place::from).collect(), total))
    }

    async fn list_all(&self, page: PageRequest) -> AppResult<(Vec<PlaceWithCreator>, u64)> {
        let total = PlaceEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        let models = PlaceEntity::find()
            .order_by_desc(place::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        // Resolve usernames for the page in one query. Only the username
        // crosses this boundary; password hashes stay in the store.
        let creator_ids: Vec<Uuid> = models.iter().map(|m| m.creator).collect();
        let usernames: HashMap<Uuid, String> = UserEntity::find()
            .filter(user::Column::Id.is_in(creator_ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let places = models
            .into_iter()
            .map(|m| {
                let creator_username = usernames.get(&m.creator).cloned().unwrap_or_default();
                PlaceWithCreator {
                    place: Place::from(m),
                    creator_username,
                }
            })
            .collect();

        Ok((places, total))
    }
}

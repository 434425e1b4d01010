//! SeaORM entity for the `users` table.

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// JSON-persisted list of owned place ids.
///
/// Kept as a single column so appending/removing a reference is a
/// one-row write inside the cross-entity transaction.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult,
)]
pub struct PlaceRefs(pub Vec<Uuid>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub image: String,
    pub image_handle: String,
    #[sea_orm(column_type = "Json")]
    pub places: PlaceRefs,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            image: model.image,
            image_handle: model.image_handle,
            places: model.places.0,
            created_at: model.created_at,
        }
    }
}

impl From<&crate::domain::User> for ActiveModel {
    fn from(user: &crate::domain::User) -> Self {
        use sea_orm::Set;

        Self {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            image: Set(user.image.clone()),
            image_handle: Set(user.image_handle.clone()),
            places: Set(PlaceRefs(user.places.clone())),
            created_at: Set(user.created_at),
        }
    }
}

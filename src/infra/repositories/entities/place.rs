//! SeaORM entity for the `places` table.

use sea_orm::entity::prelude::*;

use crate::domain::GeoPoint;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "places")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub image: String,
    pub image_handle: String,
    #[sea_orm(indexed)]
    pub creator: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Place {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            address: model.address,
            location: GeoPoint {
                lat: model.lat,
                lng: model.lng,
            },
            image: model.image,
            image_handle: model.image_handle,
            creator: model.creator,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&crate::domain::Place> for ActiveModel {
    fn from(place: &crate::domain::Place) -> Self {
        use sea_orm::Set;

        Self {
            id: Set(place.id),
            title: Set(place.title.clone()),
            description: Set(place.description.clone()),
            address: Set(place.address.clone()),
            lat: Set(place.location.lat),
            lng: Set(place.location.lng),
            image: Set(place.image.clone()),
            image_handle: Set(place.image_handle.clone()),
            creator: Set(place.creator),
            created_at: Set(place.created_at),
            updated_at: Set(place.updated_at),
        }
    }
}

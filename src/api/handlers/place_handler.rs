//! Place handlers.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{
    format_validation_errors, PathParam, QueryParam, UploadForm, ValidatedJson,
};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreatePlace, Place, PlaceWithCreator, UpdatePlace};
use crate::errors::{AppError, AppResult};
use crate::types::{MessageResponse, PageRequest};

/// Create-place form fields (multipart, image part handled separately)
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlaceForm {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 5, message = "description must be at least 5 characters"))]
    pub description: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
}

/// Update-place request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePlaceRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 5, message = "description must be at least 5 characters"))]
    pub description: String,
}

/// Single-place response
#[derive(Debug, Serialize)]
struct PlaceEnvelope {
    place: Place,
}

/// Page of one user's places
#[derive(Debug, Serialize)]
struct UserPlacesEnvelope {
    count: u64,
    page: u64,
    size: u64,
    userid: Uuid,
    places: Vec<Place>,
}

/// Page over all places with creator usernames
#[derive(Debug, Serialize)]
struct AllPlacesEnvelope {
    count: u64,
    page: u64,
    size: u64,
    places: Vec<PlaceWithCreator>,
}

/// Public read routes
pub fn place_read_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_places))
        .route("/user/:uid", get(get_places_by_user))
        .route("/:id", get(get_place))
}

/// Mutation routes; the caller's auth middleware is layered on top
pub fn place_write_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_place))
        .route("/:id", patch(update_place).delete(delete_place))
}

/// Get a single place by id
async fn get_place(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> AppResult<Json<PlaceEnvelope>> {
    let place = state.place_service.get_place(id).await?;
    Ok(Json(PlaceEnvelope { place }))
}

/// Page over all places, newest first
async fn get_places(
    State(state): State<AppState>,
    QueryParam(page): QueryParam<PageRequest>,
) -> AppResult<Json<AllPlacesEnvelope>> {
    let listing = state.place_service.list_places(page).await?;

    Ok(Json(AllPlacesEnvelope {
        count: listing.count,
        page: page.page,
        size: page.limit(),
        places: listing.places,
    }))
}

/// Page of one user's places, newest first
async fn get_places_by_user(
    State(state): State<AppState>,
    PathParam(uid): PathParam<Uuid>,
    QueryParam(page): QueryParam<PageRequest>,
) -> AppResult<Json<UserPlacesEnvelope>> {
    let listing = state.place_service.list_places_by_user(uid, page).await?;

    Ok(Json(UserPlacesEnvelope {
        count: listing.count,
        page: page.page,
        size: page.limit(),
        userid: uid,
        places: listing.places,
    }))
}

/// Create a place from a multipart form with a photo
async fn create_place(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<PlaceEnvelope>)> {
    let mut form = UploadForm::from_multipart(multipart).await?;
    let image = form.take_image()?;

    let payload = CreatePlaceForm {
        title: form.text("title")?,
        description: form.text("description")?,
        address: form.text("address")?,
    };
    payload
        .validate()
        .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

    let place = state
        .place_service
        .create_place(
            current_user.id,
            CreatePlace {
                title: payload.title,
                description: payload.description,
                address: payload.address,
                image,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PlaceEnvelope { place })))
}

/// Update a place's title and description (creator only)
async fn update_place(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdatePlaceRequest>,
) -> AppResult<Json<PlaceEnvelope>> {
    let place = state
        .place_service
        .update_place(
            current_user.id,
            id,
            UpdatePlace {
                title: payload.title,
                description: payload.description,
            },
        )
        .await?;

    Ok(Json(PlaceEnvelope { place }))
}

/// Delete a place (creator only)
async fn delete_place(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<MessageResponse>> {
    state.place_service.delete_place(current_user.id, id).await?;

    Ok(Json(MessageResponse::new("deleted successfully")))
}

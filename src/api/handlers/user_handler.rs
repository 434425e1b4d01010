//! User and authentication handlers.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::extractors::{format_validation_errors, UploadForm, ValidatedJson};
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::{AppError, AppResult};
use crate::services::{AuthResponse, SignupInput};

/// Signup form fields (multipart, image part handled separately)
#[derive(Debug, Deserialize, Validate)]
pub struct SignupForm {
    /// Display name
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    /// Email address
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    /// Password (minimum 7 characters)
    #[validate(length(min = 7, message = "password must be at least 7 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    pub password: String,
}

/// User list response
#[derive(Debug, Serialize)]
struct UsersEnvelope {
    users: Vec<UserResponse>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// List all users (passwords excluded by construction)
async fn get_users(State(state): State<AppState>) -> AppResult<Json<UsersEnvelope>> {
    let users = state.user_service.list_users().await?;

    Ok(Json(UsersEnvelope {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// Register a new user from a multipart form with an avatar image
async fn signup(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let mut form = UploadForm::from_multipart(multipart).await?;
    let image = form.take_image()?;

    let payload = SignupForm {
        username: form.text("username")?,
        email: form.text("email")?,
        password: form.text("password")?,
    };
    payload
        .validate()
        .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

    let auth = state
        .auth_service
        .signup(SignupInput {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            image,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(auth)))
}

/// Login and get a bearer token
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let auth = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(auth))
}

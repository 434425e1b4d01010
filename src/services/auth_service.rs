//! Authentication service - signup, login and token verification.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{Config, IMAGE_FOLDER_USERS};
use crate::domain::{normalize_email, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{ImageStore, UnitOfWork, UploadedImage};

/// JWT claims payload: caller identity plus expiry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Signup input assembled from the multipart form.
#[derive(Debug)]
pub struct SignupInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub image: UploadedImage,
}

/// Returned after successful signup or login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and return a bearer token
    async fn signup(&self, input: SignupInput) -> AppResult<AuthResponse>;

    /// Login and return a bearer token
    async fn login(&self, email: String, password: String) -> AppResult<AuthResponse>;

    /// Verify a JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate a JWT token for a user (shared helper)
fn generate_token(user: &User, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(token)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    images: Arc<dyn ImageStore>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance
    pub fn new(uow: Arc<U>, images: Arc<dyn ImageStore>, config: Config) -> Self {
        Self {
            uow,
            images,
            config,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn signup(&self, input: SignupInput) -> AppResult<AuthResponse> {
        let email = normalize_email(&input.email);

        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(email));
        }

        // Hash before any remote call so a weak password never costs
        // an image upload
        let password_hash = Password::new(&input.password)?.into_string();

        // The upload happens before the persistence write; a store
        // failure after this point leaves an orphaned remote image,
        // which the delete path does not compensate for.
        let stored = self.images.upload(&input.image, IMAGE_FOLDER_USERS).await?;

        let user = self
            .uow
            .users()
            .create(User::new(
                input.username,
                email,
                password_hash,
                stored.url,
                stored.handle,
            ))
            .await?;

        let token = generate_token(&user, &self.config)?;

        Ok(AuthResponse {
            user_id: user.id,
            email: user.email,
            token,
        })
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthResponse> {
        let email = normalize_email(&email);
        let user_result = self.uow.users().find_by_email(&email).await?;

        // SECURITY: Perform password verification even if the user does
        // not exist to keep lookup timing uniform across both cases.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        // Absence and mismatch are indistinguishable to the caller
        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let user = user_result.as_ref().expect("user_exists checked above");
        let token = generate_token(user, &self.config)?;

        Ok(AuthResponse {
            user_id: user.id,
            email: user.email.clone(),
            token,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

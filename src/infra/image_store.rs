//! Image store client - hosted storage for uploaded photos.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// An image received from a multipart upload, already validated for
/// MIME type and size at the HTTP boundary.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Result of a successful upload: a stable URL plus the store-specific
/// handle needed to delete the image later.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub url: String,
    pub handle: String,
}

/// Hosted image storage abstraction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload an image into the given folder.
    async fn upload(&self, image: &UploadedImage, folder: &str) -> AppResult<StoredImage>;

    /// Delete a previously uploaded image. Callers on the place-delete
    /// path treat failures as best-effort.
    async fn delete(&self, handle: &str) -> AppResult<()>;
}

/// Cloudinary-backed image store.
///
/// Uploads use an unsigned preset; deletion goes through the admin API
/// with basic auth.
pub struct Cloudinary {
    http: reqwest::Client,
    base_url: String,
    cloud_name: String,
    upload_preset: String,
    api_key: String,
    api_secret: String,
}

impl Cloudinary {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.image_store_base_url.clone(),
            cloud_name: config.cloudinary_cloud_name.clone(),
            upload_preset: config.cloudinary_upload_preset.clone(),
            api_key: config.cloudinary_api_key.clone(),
            api_secret: config.cloudinary_api_secret().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[async_trait]
impl ImageStore for Cloudinary {
    async fn upload(&self, image: &UploadedImage, folder: &str) -> AppResult<StoredImage> {
        let url = format!("{}/{}/image/upload", self.base_url, self.cloud_name);

        let part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.filename.clone())
            .mime_str(&image.content_type)
            .map_err(|e| AppError::upstream(format!("invalid image content type: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .text("folder", folder.to_string())
            .part("file", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("image upload failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "image store returned status {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("image store returned invalid body: {}", e)))?;

        Ok(StoredImage {
            url: body.secure_url,
            handle: body.public_id,
        })
    }

    async fn delete(&self, handle: &str) -> AppResult<()> {
        let url = format!(
            "{}/{}/resources/image/upload",
            self.base_url, self.cloud_name
        );

        let response = self
            .http
            .delete(&url)
            .query(&[("public_ids[]", handle)])
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("image delete failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "image store returned status {} on delete",
                response.status()
            )));
        }

        Ok(())
    }
}

//! Multipart form parsing for the endpoints that accept an image.

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::config::{is_allowed_image_type, MAX_IMAGE_BYTES};
use crate::errors::{AppError, AppResult};
use crate::infra::UploadedImage;

/// Parsed multipart form: text fields plus the uploaded image.
pub struct UploadForm {
    fields: HashMap<String, String>,
    image: Option<UploadedImage>,
}

impl UploadForm {
    /// Drain a multipart request into text fields and the image part.
    ///
    /// The image MIME type and size are checked here, before anything
    /// else touches the bytes.
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut fields = HashMap::new();
        let mut image = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("invalid multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == "image" {
                let content_type = field.content_type().unwrap_or_default().to_string();
                if !is_allowed_image_type(&content_type) {
                    return Err(AppError::validation(
                        "image must be a png, jpg or jpeg file",
                    ));
                }

                let filename = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("could not read image: {}", e)))?;

                if bytes.len() > MAX_IMAGE_BYTES {
                    return Err(AppError::validation(format!(
                        "image exceeds the {} byte limit",
                        MAX_IMAGE_BYTES
                    )));
                }

                image = Some(UploadedImage {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            } else {
                let value = field.text().await.map_err(|e| {
                    AppError::validation(format!("could not read field {}: {}", name, e))
                })?;
                fields.insert(name, value);
            }
        }

        Ok(Self { fields, image })
    }

    /// Get a required text field.
    pub fn text(&self, name: &str) -> AppResult<String> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::validation(format!("{} is required", name)))
    }

    /// Take the required image part.
    pub fn take_image(&mut self) -> AppResult<UploadedImage> {
        self.image
            .take()
            .ok_or_else(|| AppError::validation("image is required"))
    }
}

//! Multipart form intake.
//!
//! Both upload endpoints take `multipart/form-data`: text fields plus an
//! optional `image` file part. Any declared MIME type is accepted here;
//! size is bounded only by the router's body-limit layer.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::error::{ApiError, ApiResult};

/// Name of the file part both upload endpoints use.
const IMAGE_FIELD: &str = "image";

/// Fallback MIME type when the part declares none.
const DEFAULT_MIME: &str = "application/octet-stream";

/// One uploaded image part.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Bytes,
    pub mime_type: String,
    /// Advisory only; used for its extension.
    pub file_name: Option<String>,
}

/// Everything a form submission carried.
#[derive(Debug, Default)]
pub struct FormPayload {
    pub fields: HashMap<String, String>,
    pub image: Option<ImageUpload>,
}

impl FormPayload {
    /// A non-empty text field, if present.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// The image part, if present with actual content.
    pub fn image_with_content(self) -> Option<ImageUpload> {
        self.image.filter(|img| !img.data.is_empty())
    }
}

/// Drain the multipart stream into text fields and the image part.
pub async fn collect(mut multipart: Multipart) -> ApiResult<FormPayload> {
    let mut payload = FormPayload::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == IMAGE_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let mime_type = field
                .content_type()
                .unwrap_or(DEFAULT_MIME)
                .to_string();
            let data = field.bytes().await.map_err(bad_multipart)?;
            payload.image = Some(ImageUpload {
                data,
                mime_type,
                file_name,
            });
        } else {
            let value = field.text().await.map_err(bad_multipart)?;
            payload.fields.insert(name, value);
        }
    }

    Ok(payload)
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::InvalidRequest(format!("malformed multipart body: {err}"))
}

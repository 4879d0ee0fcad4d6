//! Image Upload Client
//!
//! Multipart POST to the object-storage endpoint, returning the hosted URL
//! the form stores as `icon_url`. Files are prechecked client-side
//! (JPEG/PNG, at most 2 MiB) so obviously-bad uploads never hit the wire.

use thiserror::Error;

use super::error::ApiError;
use super::types::UploadResponse;
use crate::models::{check_icon_upload, ValidationError};

/// Upload failures: either the client-side precheck or the transfer itself
#[derive(Error, Debug)]
pub enum UploadError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Client for the fixed upload endpoint
#[derive(Debug, Clone)]
pub struct ImageUploadClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ImageUploadClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ApiError> {
        let endpoint = endpoint.into();
        let client = reqwest::Client::builder()
            .timeout(super::category_store::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::from_send(&endpoint, e))?;
        Ok(Self { client, endpoint })
    }

    /// Upload an image and return its hosted URL.
    ///
    /// The precheck runs before any network call; a rejected file costs
    /// nothing and surfaces as a field-level validation error.
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        check_icon_upload(content_type, bytes.len())?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| ApiError::from_send(&self.endpoint, e))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        tracing::debug!("Uploading {} to {}", file_name, self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::from_send(&self.endpoint, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(&self.endpoint, status.as_u16()).into());
        }
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ApiError::decode(&self.endpoint, e))?;
        Ok(body.data.url)
    }
}

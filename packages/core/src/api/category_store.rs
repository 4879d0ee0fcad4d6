//! Category Store Client
//!
//! `CategoryStore` abstracts the taxonomy REST endpoints so the service
//! layer can run against an in-memory double in tests. `HttpCategoryStore`
//! is the production implementation over reqwest with a bounded request
//! timeout - a dead store surfaces as `ApiError::Timeout`, never a hang.

use std::time::Duration;

use async_trait::async_trait;

use super::error::ApiError;
use super::types::{
    CategoryRecord, CreateCategoryRequest, ListResponse, MutationResponse, UpdateCategoryRequest,
};
use crate::models::CategoryId;

/// Bounded timeout applied to every store request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Abstraction over the Category Store REST endpoints
///
/// One method per endpoint; business rejections (`success: false`) come back
/// as `Ok(MutationResponse)` - only transport/decoding problems are errors.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// `GET /categories?keyword=...` - list records, optionally filtered
    async fn list(&self, keyword: Option<&str>) -> Result<Vec<CategoryRecord>, ApiError>;

    /// `POST /categories` - create a node
    async fn create(&self, request: &CreateCategoryRequest) -> Result<MutationResponse, ApiError>;

    /// `PUT /categories/{id}` - update a node's content fields
    async fn update(
        &self,
        id: CategoryId,
        request: &UpdateCategoryRequest,
    ) -> Result<MutationResponse, ApiError>;

    /// `DELETE /categories/{id}` - delete a node
    async fn delete(&self, id: CategoryId) -> Result<MutationResponse, ApiError>;
}

/// Production Category Store client over HTTP
#[derive(Debug, Clone)]
pub struct HttpCategoryStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCategoryStore {
    /// Create a client for a store rooted at `base_url`
    /// (e.g. `http://127.0.0.1:3000/api`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::from_send(&base_url, e))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn categories_url(&self) -> String {
        format!("{}/categories", self.base_url)
    }

    fn category_url(&self, id: CategoryId) -> String {
        format!("{}/categories/{}", self.base_url, id)
    }

    async fn decode_mutation(
        url: &str,
        response: reqwest::Response,
    ) -> Result<MutationResponse, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(url, status.as_u16()));
        }
        response
            .json::<MutationResponse>()
            .await
            .map_err(|e| ApiError::decode(url, e))
    }
}

#[async_trait]
impl CategoryStore for HttpCategoryStore {
    async fn list(&self, keyword: Option<&str>) -> Result<Vec<CategoryRecord>, ApiError> {
        let url = self.categories_url();
        let mut request = self.client.get(&url);
        if let Some(keyword) = keyword {
            request = request.query(&[("keyword", keyword)]);
        }
        tracing::debug!("Listing categories from {} (keyword: {:?})", url, keyword);
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_send(&url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(&url, status.as_u16()));
        }
        let body: ListResponse = response.json().await.map_err(|e| ApiError::decode(&url, e))?;
        Ok(body.data.map(|d| d.list).unwrap_or_default())
    }

    async fn create(&self, request: &CreateCategoryRequest) -> Result<MutationResponse, ApiError> {
        let url = self.categories_url();
        tracing::debug!(
            "Creating category '{}' (parent: {:?}, level: {})",
            request.category_name,
            request.parent_id,
            request.level
        );
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::from_send(&url, e))?;
        Self::decode_mutation(&url, response).await
    }

    async fn update(
        &self,
        id: CategoryId,
        request: &UpdateCategoryRequest,
    ) -> Result<MutationResponse, ApiError> {
        let url = self.category_url(id);
        tracing::debug!("Updating category {}", id);
        let response = self
            .client
            .put(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::from_send(&url, e))?;
        Self::decode_mutation(&url, response).await
    }

    async fn delete(&self, id: CategoryId) -> Result<MutationResponse, ApiError> {
        let url = self.category_url(id);
        tracing::debug!("Deleting category {}", id);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::from_send(&url, e))?;
        Self::decode_mutation(&url, response).await
    }
}

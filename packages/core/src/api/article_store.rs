//! Article Store Client
//!
//! Thin typed client for the article endpoints. The article module has no
//! structural invariants; this exists so the console's list/edit/publish
//! glue works against explicit schemas instead of loose JSON.

use async_trait::async_trait;

use super::error::ApiError;
use super::types::{ArticleDetailResponse, ArticlePage, ArticleParams, ArticleQuery, MutationResponse};
use crate::models::Article;

/// Abstraction over the Article Store REST endpoints
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// `GET /articles` - one page of rows plus the total count
    async fn list(&self, query: &ArticleQuery) -> Result<ArticlePage, ApiError>;

    /// `GET /articles/{id}` - full article, body included, for edit prefill
    async fn get(&self, id: i64) -> Result<Article, ApiError>;

    /// `POST /articles` - publish a new article
    async fn create(&self, params: &ArticleParams) -> Result<MutationResponse, ApiError>;

    /// `PUT /articles/{id}` - update an existing article
    async fn update(&self, id: i64, params: &ArticleParams) -> Result<MutationResponse, ApiError>;

    /// `DELETE /articles/{id}`
    async fn delete(&self, id: i64) -> Result<MutationResponse, ApiError>;
}

/// Production Article Store client over HTTP
#[derive(Debug, Clone)]
pub struct HttpArticleStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpArticleStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(super::category_store::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::from_send(&base_url, e))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn articles_url(&self) -> String {
        format!("{}/articles", self.base_url)
    }

    fn article_url(&self, id: i64) -> String {
        format!("{}/articles/{}", self.base_url, id)
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
impl ArticleStore for HttpArticleStore {
    async fn list(&self, query: &ArticleQuery) -> Result<ArticlePage, ApiError> {
        let url = self.articles_url();
        tracing::debug!("Listing articles from {} (query: {:?})", url, query);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::from_send(&url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(&url, status.as_u16()));
        }
        response.json().await.map_err(|e| ApiError::decode(&url, e))
    }

    async fn get(&self, id: i64) -> Result<Article, ApiError> {
        let url = self.article_url(id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::from_send(&url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(&url, status.as_u16()));
        }
        let body: ArticleDetailResponse =
            response.json().await.map_err(|e| ApiError::decode(&url, e))?;
        Ok(body.data)
    }

    async fn create(&self, params: &ArticleParams) -> Result<MutationResponse, ApiError> {
        let url = self.articles_url();
        tracing::debug!("Publishing article '{}'", params.title);
        let response = self
            .client
            .post(&url)
            .json(params)
            .send()
            .await
            .map_err(|e| ApiError::from_send(&url, e))?;
        Self::decode_mutation(&url, response).await
    }

    async fn update(&self, id: i64, params: &ArticleParams) -> Result<MutationResponse, ApiError> {
        let url = self.article_url(id);
        tracing::debug!("Updating article {}", id);
        let response = self
            .client
            .put(&url)
            .json(params)
            .send()
            .await
            .map_err(|e| ApiError::from_send(&url, e))?;
        Self::decode_mutation(&url, response).await
    }

    async fn delete(&self, id: i64) -> Result<MutationResponse, ApiError> {
        let url = self.article_url(id);
        tracing::debug!("Deleting article {}", id);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::from_send(&url, e))?;
        Self::decode_mutation(&url, response).await
    }
}

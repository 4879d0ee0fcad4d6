//! Article Service
//!
//! Thin glue over the Article Store mirroring the console's list and
//! publish/edit pages: fetch a page, prefill an edit form, publish or
//! update, delete with refresh driven by the caller. No structural
//! invariants live here.

use std::sync::Arc;

use thiserror::Error;

use crate::api::{ApiError, ArticlePage, ArticleParams, ArticleQuery, ArticleStore};
use crate::models::Article;

/// Article operation errors
#[derive(Error, Debug)]
pub enum ArticleServiceError {
    /// Client-side required-field check failed
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Transport or server failure
    #[error("Article store request failed: {0}")]
    Fetch(#[from] ApiError),

    /// Store accepted the request but rejected the operation
    #[error("{message}")]
    Rejected { message: String },
}

fn check_params(params: &ArticleParams) -> Result<(), ArticleServiceError> {
    if params.title.trim().is_empty() {
        return Err(ArticleServiceError::MissingField("title".to_string()));
    }
    if params.content.trim().is_empty() {
        return Err(ArticleServiceError::MissingField("content".to_string()));
    }
    Ok(())
}

/// Business layer for the article module
pub struct ArticleService {
    store: Arc<dyn ArticleStore>,
}

impl ArticleService {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }

    /// One page of articles for the table.
    pub async fn list(&self, query: &ArticleQuery) -> Result<ArticlePage, ArticleServiceError> {
        Ok(self.store.list(query).await?)
    }

    /// Full article, body included, for edit-form prefill.
    pub async fn load_for_edit(&self, id: i64) -> Result<Article, ArticleServiceError> {
        Ok(self.store.get(id).await?)
    }

    /// Publish a new article.
    pub async fn publish(&self, params: &ArticleParams) -> Result<(), ArticleServiceError> {
        check_params(params)?;
        let response = self.store.create(params).await?;
        if !response.success {
            return Err(ArticleServiceError::Rejected {
                message: response
                    .message
                    .unwrap_or_else(|| "Publish rejected by the store".to_string()),
            });
        }
        Ok(())
    }

    /// Update an existing article.
    pub async fn update(&self, id: i64, params: &ArticleParams) -> Result<(), ArticleServiceError> {
        check_params(params)?;
        let response = self.store.update(id, params).await?;
        if !response.success {
            return Err(ArticleServiceError::Rejected {
                message: response
                    .message
                    .unwrap_or_else(|| "Update rejected by the store".to_string()),
            });
        }
        Ok(())
    }

    /// Delete one article.
    pub async fn delete(&self, id: i64) -> Result<(), ArticleServiceError> {
        let response = self.store.delete(id).await?;
        if !response.success {
            return Err(ArticleServiceError::Rejected {
                message: response
                    .message
                    .unwrap_or_else(|| "Delete rejected by the store".to_string()),
            });
        }
        Ok(())
    }

    /// Delete a selection of articles, stopping at the first failure so the
    /// operator sees which row refused rather than a silent partial bulk.
    pub async fn delete_batch(&self, ids: &[i64]) -> Result<(), ArticleServiceError> {
        for &id in ids {
            self.delete(id).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "article_service_test.rs"]
mod article_service_test;

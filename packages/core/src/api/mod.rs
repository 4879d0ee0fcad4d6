//! REST Boundary Layer
//!
//! Typed client for the three external collaborators:
//!
//! - Category Store: list/create/update/delete for taxonomy nodes
//! - Article Store: paginated list plus CRUD for articles
//! - Image upload endpoint: multipart POST returning a hosted URL
//!
//! Every endpoint has an explicit request/response schema in [`types`];
//! payloads are validated at this boundary, never duck-typed. Store access
//! goes through the [`CategoryStore`]/[`ArticleStore`] traits so services
//! can be exercised against in-memory doubles.

mod article_store;
mod category_store;
mod error;
pub mod types;
mod upload;

pub use article_store::{ArticleStore, HttpArticleStore};
pub use category_store::{CategoryStore, HttpCategoryStore, REQUEST_TIMEOUT};
pub use error::ApiError;
pub use types::{
    flatten_records, ArticleDetailResponse, ArticlePage, ArticleParams, ArticleQuery,
    CategoryRecord, CreateCategoryRequest, ListData, ListResponse, MutationResponse,
    UpdateCategoryRequest, UploadData, UploadResponse,
};
pub use upload::{ImageUploadClient, UploadError};

//! Business Services
//!
//! This module contains the core business logic services:
//!
//! - `CategoryService` - tree loading, request building, and mutations with
//!   hierarchy invariants enforced
//! - `FormController` - the modal state machine driving create/edit flows
//! - `ArticleService` - thin list/CRUD glue for the article module
//!
//! Services coordinate between the REST boundary and the UI layer,
//! implementing the taxonomy rules and keeping modal state consistent with
//! the tree snapshot.

pub mod article_service;
pub mod category_service;
pub mod error;
pub mod form_controller;
#[cfg(test)]
pub(crate) mod test_support;

pub use article_service::{ArticleService, ArticleServiceError};
pub use category_service::CategoryService;
pub use error::CategoryServiceError;
pub use form_controller::{FormController, SubmitDisposition, SubmitTicket};

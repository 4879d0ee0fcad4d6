//! Service Layer Error Types
//!
//! The three failure classes the console distinguishes:
//!
//! - validation: client-side field checks, never reach the store
//! - fetch: transport/server failure, shown as a transient notice
//! - rejection: `success: false` from the store, shown verbatim with the
//!   modal left open so entered fields are not lost
//!
//! Nothing here is fatal; every variant maps to a recoverable UI state.

use thiserror::Error;

use crate::api::ApiError;
use crate::models::{CategoryId, TreeError, ValidationError};

/// Category service operation errors
#[derive(Error, Debug)]
pub enum CategoryServiceError {
    /// Target category missing from the current snapshot
    #[error("Category not found: {id}")]
    CategoryNotFound { id: CategoryId },

    /// Create-child target parent missing from the current snapshot
    #[error("Parent category not found: {parent_id}")]
    ParentNotFound { parent_id: CategoryId },

    /// Delete blocked: the node still owns a subtree
    #[error("Category {id} still has {child_count} subcategories; delete them first")]
    CategoryHasChildren { id: CategoryId, child_count: usize },

    /// Client-side field validation failed
    #[error("Field validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Transport or server failure talking to the store
    #[error("Category store request failed: {0}")]
    Fetch(#[from] ApiError),

    /// Store accepted the request but rejected the operation
    /// (message is surfaced verbatim to the operator)
    #[error("{message}")]
    Rejected { message: String },

    /// The store returned a structurally broken node list
    #[error("Category tree is inconsistent: {0}")]
    Tree(#[from] TreeError),

    /// No modal session to submit from
    #[error("No form session is open")]
    NoOpenSession,

    /// A request builder was handed a session mode it cannot serve
    #[error("Form mode does not match the requested operation")]
    ModeMismatch,

    /// A second mutation was attempted while one is in flight
    #[error("A submission is already in flight")]
    SubmitInFlight,
}

impl CategoryServiceError {
    /// Create a category-not-found error
    pub fn category_not_found(id: CategoryId) -> Self {
        Self::CategoryNotFound { id }
    }

    /// Create a parent-not-found error
    pub fn parent_not_found(parent_id: CategoryId) -> Self {
        Self::ParentNotFound { parent_id }
    }

    /// Create a rejection carrying the store's message verbatim
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// True when the modal should stay open with fields intact
    pub fn keeps_form_open(&self) -> bool {
        !matches!(self, Self::NoOpenSession)
    }
}

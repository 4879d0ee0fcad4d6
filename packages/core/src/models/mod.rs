//! Data Models
//!
//! This module contains the core data structures used throughout Curator:
//!
//! - `CategoryNode` - One taxonomy entry with content fields and a position
//!   in the category forest
//! - `FormSession` / `FormState` - The ephemeral modal state machine data
//! - `Article` - Content entries managed by the adjacent article module
//!
//! Tree construction lives in [`tree`]: the flat parent-pointer list returned
//! by the store is materialized into an immutable forest snapshot with levels
//! derived from ancestry.

mod article;
mod category;
mod form;
pub mod tree;

pub use article::Article;
pub use category::{
    check_icon_upload, CategoryFields, CategoryId, CategoryNode, Status, ValidationError,
    ALLOWED_ICON_TYPES, MAX_ICON_BYTES,
};
pub use form::{FormMode, FormSession, FormState};
pub use tree::{build_forest, find_node, flatten_forest, TreeError};

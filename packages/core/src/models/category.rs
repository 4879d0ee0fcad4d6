//! Category Data Structures
//!
//! Defines `CategoryNode` and its supporting types. A category is one entry
//! in an N-level taxonomy: root nodes have no parent and sit at level 1,
//! every child sits at `parent.level + 1`.
//!
//! # Invariants
//!
//! - `parent_id` is set once at creation and never changed by an edit
//! - `level` is strictly derived from ancestry (see [`crate::models::tree`]);
//!   it is never accepted from user input
//! - `children` is the materialized inverse of `parent_id`, populated only
//!   by the tree-building step, never persisted

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum upload size for category icons (2 MiB)
pub const MAX_ICON_BYTES: usize = 2 * 1024 * 1024;

/// Content types accepted for category icons
pub const ALLOWED_ICON_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Validation errors for client-side field checks.
///
/// These never reach the store: a failed validation keeps the form open with
/// field-level feedback and no network call.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unsupported icon type: {0} (JPEG/PNG only)")]
    UnsupportedIconType(String),

    #[error("Icon too large: {size} bytes (limit {limit})")]
    IconTooLarge { size: usize, limit: usize },
}

/// Server-assigned category identifier. Opaque and immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for CategoryId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// Category visibility status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Active => f.write_str("active"),
            Status::Inactive => f.write_str("inactive"),
        }
    }
}

/// The user-editable content fields of a category.
///
/// Used by both the create and the update path. Update requests are built
/// from exactly these fields, so `parent_id`/`level` can never ride along on
/// an edit - the invariant is enforced by the type, not by validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFields {
    pub name: String,
    pub description: String,
    pub icon_url: String,
    pub sort_order: i64,
    pub status: Status,
}

impl Default for CategoryFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            icon_url: String::new(),
            sort_order: 0,
            status: Status::Active,
        }
    }
}

impl CategoryFields {
    /// Client-side required-field checks, mirroring the admin form rules.
    ///
    /// Returns the first failing field; callers surface it without touching
    /// the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description".to_string()));
        }
        if self.icon_url.trim().is_empty() {
            return Err(ValidationError::MissingField("icon_url".to_string()));
        }
        Ok(())
    }
}

/// One node of the category forest.
///
/// # Fields
///
/// - `id`: server-assigned, immutable
/// - `parent_id`: `None` for roots; set once at creation, never mutated by
///   an edit (edits change content fields only, not tree position)
/// - `level`: 1-based depth, derived from ancestry during tree construction
/// - `children`: ordered by `sort_order` (then id for stability), populated
///   by [`crate::models::tree::build_forest`]
/// - `updated_at`: server-set, read-only in the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub parent_id: Option<CategoryId>,
    pub level: u32,
    pub name: String,
    pub description: String,
    pub icon_url: String,
    pub sort_order: i64,
    pub status: Status,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Snapshot of the content fields, used to prefill an edit form.
    pub fn fields(&self) -> CategoryFields {
        CategoryFields {
            name: self.name.clone(),
            description: self.description.clone(),
            icon_url: self.icon_url.clone(),
            sort_order: self.sort_order,
            status: self.status,
        }
    }
}

/// Precheck an icon upload before any network call.
///
/// Mirrors the admin form's upload gate: JPEG/PNG only, at most 2 MiB.
pub fn check_icon_upload(content_type: &str, size: usize) -> Result<(), ValidationError> {
    if !ALLOWED_ICON_TYPES.contains(&content_type) {
        return Err(ValidationError::UnsupportedIconType(content_type.to_string()));
    }
    if size > MAX_ICON_BYTES {
        return Err(ValidationError::IconTooLarge {
            size,
            limit: MAX_ICON_BYTES,
        });
    }
    Ok(())
}

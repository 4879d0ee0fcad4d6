//! Article Data Structures
//!
//! Articles are the content entries the console manages alongside the
//! category taxonomy. The article module is thin glue over the REST client
//! (list, prefill-for-edit, publish, update, delete); only the data shapes
//! live here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One article as shown in the list and edit views.
///
/// `status` and `visibility` are free-form server vocabularies (e.g.
/// "draft"/"published", "public"/"members"); the console displays them
/// verbatim rather than constraining them client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub summary: String,
    /// Rich-text body; omitted by the list endpoint, present on single get
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub cover_image_url: String,
    pub status: String,
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub is_featured: i32,
    #[serde(default)]
    pub point_threshold: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

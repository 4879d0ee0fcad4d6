//! Wire Schemas
//!
//! Explicit request/response types per endpoint. The store speaks
//! snake_case for categories and camelCase for articles; both are pinned
//! here with serde attributes so drift fails loudly at the boundary.
//!
//! The category wire format uses `parent_id = 0` as the "no parent"
//! sentinel for root nodes. In memory that is always `Option<CategoryId>`;
//! [`parent_sentinel`] translates at the edge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Article, CategoryFields, CategoryId, CategoryNode, Status};

/// Serde adapter for the root sentinel: wire `0` <-> memory `None`.
pub(crate) mod parent_sentinel {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::models::CategoryId;

    pub fn serialize<S>(value: &Option<CategoryId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(value.map_or(0, |id| id.0))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<CategoryId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<i64>::deserialize(deserializer)?;
        Ok(match raw {
            None | Some(0) => None,
            Some(id) => Some(CategoryId(id)),
        })
    }
}

/// One category row as the list endpoint returns it.
///
/// The store may return rows flat (parent pointers only) or pre-nested
/// under `children`; [`CategoryRecord::flatten_into`] normalizes either
/// shape before tree construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub category_id: CategoryId,
    #[serde(default, with = "parent_sentinel")]
    pub parent_id: Option<CategoryId>,
    #[serde(default)]
    pub level: u32,
    pub category_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_url: String,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub status: Status,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryRecord>,
}

impl CategoryRecord {
    /// Emit this record and all nested descendants as flat nodes.
    ///
    /// Nested children without an explicit `parent_id` inherit the id of
    /// the record that carried them.
    pub fn flatten_into(self, out: &mut Vec<CategoryNode>) {
        let parent_for_children = self.category_id;
        let children = self.children;
        out.push(CategoryNode {
            id: self.category_id,
            parent_id: self.parent_id,
            level: self.level,
            name: self.category_name,
            description: self.description,
            icon_url: self.icon_url,
            sort_order: self.sort_order,
            status: self.status,
            updated_at: self.updated_at,
            children: Vec::new(),
        });
        for mut child in children {
            if child.parent_id.is_none() {
                child.parent_id = Some(parent_for_children);
            }
            child.flatten_into(out);
        }
    }
}

/// Flatten a whole response list into nodes ready for forest building.
pub fn flatten_records(records: Vec<CategoryRecord>) -> Vec<CategoryNode> {
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        record.flatten_into(&mut out);
    }
    out
}

/// `GET /categories` response envelope: `{ data: { list: [...] } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub data: Option<ListData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListData {
    #[serde(default)]
    pub list: Vec<CategoryRecord>,
}

/// `POST /categories` body. `parent_id`/`level` are present because the
/// store persists them at creation; they are computed by the service, never
/// taken from user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(with = "parent_sentinel")]
    pub parent_id: Option<CategoryId>,
    pub level: u32,
    pub category_name: String,
    pub description: String,
    pub icon_url: String,
    pub sort_order: i64,
    pub status: Status,
}

/// `PUT /categories/{id}` body: content fields only. The absence of
/// `parent_id`/`level` here is what makes invariant "edit never moves a
/// node" structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    pub category_name: String,
    pub description: String,
    pub icon_url: String,
    pub sort_order: i64,
    pub status: Status,
}

impl From<&CategoryFields> for UpdateCategoryRequest {
    fn from(fields: &CategoryFields) -> Self {
        Self {
            category_name: fields.name.clone(),
            description: fields.description.clone(),
            icon_url: fields.icon_url.clone(),
            sort_order: fields.sort_order,
            status: fields.status,
        }
    }
}

/// Mutation envelope: `{ success, message? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MutationResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Query parameters for `GET /articles`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// `GET /articles` response: a page of rows plus the total row count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticlePage {
    #[serde(default)]
    pub data: Vec<Article>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_true")]
    pub success: bool,
}

/// `GET /articles/{id}` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDetailResponse {
    pub data: Article,
}

/// `POST /articles` / `PUT /articles/{id}` body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleParams {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub cover_image_url: String,
    pub content: String,
    #[serde(default)]
    pub summary: String,
    pub author_id: i64,
    pub status: String,
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub is_featured: i32,
    #[serde(default)]
    pub resource_url: String,
    #[serde(default)]
    pub download_point_threshold: i64,
}

/// Upload endpoint envelope: `{ data: { url } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub data: UploadData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadData {
    pub url: String,
}

fn default_true() -> bool {
    true
}

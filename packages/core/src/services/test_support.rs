//! In-memory store doubles for service tests.
//!
//! Mimic the real stores' observable behavior: flat record list with
//! parent pointers, duplicate-name rejection on create, keyword filter on
//! list. Call counters let tests assert that an operation never reached
//! the store.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::api::{
    ApiError, ArticlePage, ArticleParams, ArticleQuery, ArticleStore, CategoryRecord,
    CategoryStore, CreateCategoryRequest, MutationResponse, UpdateCategoryRequest,
};
use crate::models::{Article, CategoryId, Status};

pub(crate) fn record(
    id: i64,
    parent: Option<i64>,
    level: u32,
    name: &str,
) -> CategoryRecord {
    CategoryRecord {
        category_id: CategoryId(id),
        parent_id: parent.map(CategoryId),
        level,
        category_name: name.to_string(),
        description: format!("{name} description"),
        icon_url: format!("https://cdn.example.com/{name}.png"),
        sort_order: id,
        status: Status::Active,
        updated_at: Utc::now(),
        children: Vec::new(),
    }
}

#[derive(Default)]
pub(crate) struct InMemoryCategoryStore {
    pub rows: Mutex<Vec<CategoryRecord>>,
    next_id: AtomicI64,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    /// Forces the next mutation to come back `success: false` with this message
    pub reject_next: Mutex<Option<String>>,
}

impl InMemoryCategoryStore {
    pub fn with_rows(rows: Vec<CategoryRecord>) -> Self {
        let max_id = rows.iter().map(|r| r.category_id.0).max().unwrap_or(0);
        let store = Self::default();
        *store.rows.lock().unwrap() = rows;
        store.next_id.store(max_id + 1, Ordering::SeqCst);
        store
    }

    pub fn reject_next_with(&self, message: &str) {
        *self.reject_next.lock().unwrap() = Some(message.to_string());
    }

    pub fn mutation_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
            + self.update_calls.load(Ordering::SeqCst)
            + self.delete_calls.load(Ordering::SeqCst)
    }

    fn take_rejection(&self) -> Option<MutationResponse> {
        self.reject_next
            .lock()
            .unwrap()
            .take()
            .map(MutationResponse::rejected)
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn list(&self, keyword: Option<&str>) -> Result<Vec<CategoryRecord>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| keyword.map_or(true, |kw| r.category_name.contains(kw)))
            .cloned()
            .collect())
    }

    async fn create(&self, request: &CreateCategoryRequest) -> Result<MutationResponse, ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(rejection) = self.take_rejection() {
            return Ok(rejection);
        }
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.category_name == request.category_name) {
            return Ok(MutationResponse::rejected("name duplicated"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        rows.push(CategoryRecord {
            category_id: CategoryId(id),
            parent_id: request.parent_id,
            level: request.level,
            category_name: request.category_name.clone(),
            description: request.description.clone(),
            icon_url: request.icon_url.clone(),
            sort_order: request.sort_order,
            status: request.status,
            updated_at: Utc::now(),
            children: Vec::new(),
        });
        Ok(MutationResponse::ok())
    }

    async fn update(
        &self,
        id: CategoryId,
        request: &UpdateCategoryRequest,
    ) -> Result<MutationResponse, ApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(rejection) = self.take_rejection() {
            return Ok(rejection);
        }
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.category_id == id) {
            Some(row) => {
                // Content fields only; parent_id/level stay untouched
                row.category_name = request.category_name.clone();
                row.description = request.description.clone();
                row.icon_url = request.icon_url.clone();
                row.sort_order = request.sort_order;
                row.status = request.status;
                row.updated_at = Utc::now();
                Ok(MutationResponse::ok())
            }
            None => Ok(MutationResponse::rejected("category not found")),
        }
    }

    async fn delete(&self, id: CategoryId) -> Result<MutationResponse, ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(rejection) = self.take_rejection() {
            return Ok(rejection);
        }
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.category_id != id);
        if rows.len() == before {
            return Ok(MutationResponse::rejected("category not found"));
        }
        Ok(MutationResponse::ok())
    }
}

pub(crate) fn article(id: i64, title: &str) -> Article {
    Article {
        id,
        title: title.to_string(),
        subtitle: String::new(),
        summary: format!("{title} summary"),
        content: format!("{title} body"),
        cover_image_url: String::new(),
        status: "published".to_string(),
        visibility: "public".to_string(),
        is_featured: 0,
        point_threshold: 0,
        created_at: Some(Utc::now()),
        updated_at: Some(Utc::now()),
    }
}

#[derive(Default)]
pub(crate) struct InMemoryArticleStore {
    pub rows: Mutex<Vec<Article>>,
    next_id: AtomicI64,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    /// Forces the next mutation to come back `success: false` with this message
    pub reject_next: Mutex<Option<String>>,
}

impl InMemoryArticleStore {
    pub fn with_rows(rows: Vec<Article>) -> Self {
        let max_id = rows.iter().map(|a| a.id).max().unwrap_or(0);
        let store = Self::default();
        *store.rows.lock().unwrap() = rows;
        store.next_id.store(max_id + 1, Ordering::SeqCst);
        store
    }

    pub fn reject_next_with(&self, message: &str) {
        *self.reject_next.lock().unwrap() = Some(message.to_string());
    }

    pub fn mutation_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
            + self.update_calls.load(Ordering::SeqCst)
            + self.delete_calls.load(Ordering::SeqCst)
    }

    fn take_rejection(&self) -> Option<MutationResponse> {
        self.reject_next
            .lock()
            .unwrap()
            .take()
            .map(MutationResponse::rejected)
    }
}

#[async_trait]
impl ArticleStore for InMemoryArticleStore {
    async fn list(&self, query: &ArticleQuery) -> Result<ArticlePage, ApiError> {
        let rows = self.rows.lock().unwrap();
        let matching: Vec<Article> = rows
            .iter()
            .filter(|a| {
                query
                    .keyword
                    .as_deref()
                    .map_or(true, |kw| a.title.contains(kw))
            })
            .cloned()
            .collect();
        Ok(ArticlePage {
            total: matching.len() as u64,
            data: matching,
            success: true,
        })
    }

    async fn get(&self, id: i64) -> Result<Article, ApiError> {
        let rows = self.rows.lock().unwrap();
        rows.iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| ApiError::status("inmemory:/articles", 404))
    }

    async fn create(&self, params: &ArticleParams) -> Result<MutationResponse, ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(rejection) = self.take_rejection() {
            return Ok(rejection);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut row = article(id, &params.title);
        row.content = params.content.clone();
        row.status = params.status.clone();
        self.rows.lock().unwrap().push(row);
        Ok(MutationResponse::ok())
    }

    async fn update(&self, id: i64, params: &ArticleParams) -> Result<MutationResponse, ApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(rejection) = self.take_rejection() {
            return Ok(rejection);
        }
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|a| a.id == id) {
            Some(row) => {
                row.title = params.title.clone();
                row.content = params.content.clone();
                row.status = params.status.clone();
                row.updated_at = Some(Utc::now());
                Ok(MutationResponse::ok())
            }
            None => Ok(MutationResponse::rejected("article not found")),
        }
    }

    async fn delete(&self, id: i64) -> Result<MutationResponse, ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(rejection) = self.take_rejection() {
            return Ok(rejection);
        }
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.id != id);
        if rows.len() == before {
            return Ok(MutationResponse::rejected("article not found"));
        }
        Ok(MutationResponse::ok())
    }
}

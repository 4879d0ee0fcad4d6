//! Category Service - Tree Client
//!
//! Owns the rendered category forest and every interaction with the
//! Category Store:
//!
//! - `load_tree` fetches the node list and rebuilds the snapshot wholesale
//! - request builders produce payloads that preserve the hierarchy
//!   invariants (levels derived, updates carry content fields only)
//! - mutations re-fetch on success instead of patching locally, so there is
//!   never merge logic and a stale snapshot is simply replaced
//!
//! # Delete policy
//!
//! Deleting a node that still has children is blocked client-side
//! (`CategoryHasChildren`) before any store call. Blocking was chosen over
//! cascade for data-loss safety: the operator empties a subtree explicitly,
//! one visible step at a time.

use std::sync::Arc;

use crate::api::{
    flatten_records, CategoryStore, CreateCategoryRequest, MutationResponse,
    UpdateCategoryRequest,
};
use crate::models::{
    build_forest, find_node, flatten_forest, CategoryFields, CategoryId, CategoryNode, FormMode,
};
use crate::services::error::CategoryServiceError;

/// Business layer for the category taxonomy.
///
/// The snapshot is owned exclusively by this service and replaced as a whole
/// after every successful load; callers only ever borrow it.
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
    snapshot: Vec<CategoryNode>,
    /// Bumped on every successful load; lets callers detect that the tree
    /// they rendered has been replaced.
    generation: u64,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self {
            store,
            snapshot: Vec::new(),
            generation: 0,
        }
    }

    /// The current immutable forest snapshot.
    pub fn tree(&self) -> &[CategoryNode] {
        &self.snapshot
    }

    /// Snapshot generation, bumped on every successful reload.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Depth-first rows for table display.
    pub fn rows(&self) -> Vec<&CategoryNode> {
        flatten_forest(&self.snapshot)
    }

    /// Find a node anywhere in the current snapshot.
    pub fn find(&self, id: CategoryId) -> Option<&CategoryNode> {
        find_node(&self.snapshot, id)
    }

    /// Fetch the node list and rebuild the forest snapshot.
    ///
    /// On failure the previous snapshot is kept untouched - the presenter
    /// shows an error notice, and the next user mutation re-fetches anyway.
    pub async fn load_tree(
        &mut self,
        keyword: Option<&str>,
    ) -> Result<&[CategoryNode], CategoryServiceError> {
        let records = self.store.list(keyword).await?;
        let forest = build_forest(flatten_records(records))?;
        tracing::debug!(
            "Loaded category tree: {} roots, generation {}",
            forest.len(),
            self.generation + 1
        );
        self.snapshot = forest;
        self.generation += 1;
        Ok(&self.snapshot)
    }

    /// Build a create payload for the given form mode.
    ///
    /// For `CreateChild` the level is read from the parent node in the
    /// *current* snapshot, not from the level captured when the modal
    /// opened - if the tree moved underneath an open modal, the fresh value
    /// wins. For `CreateRoot` the payload is pinned to parent none, level 1.
    pub fn build_create_request(
        &self,
        mode: &FormMode,
        fields: &CategoryFields,
    ) -> Result<CreateCategoryRequest, CategoryServiceError> {
        fields.validate()?;
        let (parent_id, level) = match mode {
            FormMode::CreateRoot => (None, 1),
            FormMode::CreateChild { parent_id, .. } => {
                let parent = self
                    .find(*parent_id)
                    .ok_or(CategoryServiceError::parent_not_found(*parent_id))?;
                (Some(parent.id), parent.level + 1)
            }
            FormMode::Edit { .. } => return Err(CategoryServiceError::ModeMismatch),
        };
        Ok(CreateCategoryRequest {
            parent_id,
            level,
            category_name: fields.name.clone(),
            description: fields.description.clone(),
            icon_url: fields.icon_url.clone(),
            sort_order: fields.sort_order,
            status: fields.status,
        })
    }

    /// Build an update payload carrying content fields only.
    ///
    /// `parent_id`/`level` are absent from the request type itself, so an
    /// edit can never move a node regardless of how stale the form session
    /// that produced it is.
    pub fn build_update_request(
        &self,
        id: CategoryId,
        fields: &CategoryFields,
    ) -> Result<UpdateCategoryRequest, CategoryServiceError> {
        fields.validate()?;
        if self.find(id).is_none() {
            return Err(CategoryServiceError::category_not_found(id));
        }
        Ok(UpdateCategoryRequest::from(fields))
    }

    /// Submit a create request, then refresh the whole tree on success.
    pub async fn submit_create(
        &mut self,
        request: &CreateCategoryRequest,
    ) -> Result<(), CategoryServiceError> {
        let response = self.store.create(request).await?;
        self.apply_mutation_outcome(response).await
    }

    /// Submit an update request, then refresh the whole tree on success.
    pub async fn submit_update(
        &mut self,
        id: CategoryId,
        request: &UpdateCategoryRequest,
    ) -> Result<(), CategoryServiceError> {
        let response = self.store.update(id, request).await?;
        self.apply_mutation_outcome(response).await
    }

    /// Delete a category, blocking when it still owns children.
    ///
    /// The policy check runs against the current snapshot before any store
    /// call; a blocked delete is indistinguishable from a business
    /// rejection as far as the UI is concerned.
    pub async fn delete_category(&mut self, id: CategoryId) -> Result<(), CategoryServiceError> {
        let node = self
            .find(id)
            .ok_or(CategoryServiceError::category_not_found(id))?;
        if node.has_children() {
            return Err(CategoryServiceError::CategoryHasChildren {
                id,
                child_count: node.children.len(),
            });
        }
        let response = self.store.delete(id).await?;
        self.apply_mutation_outcome(response).await
    }

    /// Shared tail of every mutation: rejection check, then full reload.
    async fn apply_mutation_outcome(
        &mut self,
        response: MutationResponse,
    ) -> Result<(), CategoryServiceError> {
        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| "Operation rejected by the store".to_string());
            tracing::warn!("Category store rejected mutation: {}", message);
            return Err(CategoryServiceError::rejected(message));
        }
        self.load_tree(None).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "category_service_test.rs"]
mod category_service_test;

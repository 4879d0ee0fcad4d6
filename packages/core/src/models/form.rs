//! Modal Form Session State
//!
//! The create/edit modal is governed by an explicit tagged-union state
//! object instead of scattered mutable flags. Every `Open` transition fully
//! replaces the session, so context left over from a previous session (a
//! child's parent id, an inherited level, an icon preview) can never leak
//! into the next one.

use serde::{Deserialize, Serialize};

use super::category::{CategoryFields, CategoryId, CategoryNode};

/// What the modal is currently doing.
///
/// The variant payloads are the *only* place target context lives: closing
/// the session destroys the parent/level override along with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormMode {
    /// Adding a top-level category (parent none, level 1)
    CreateRoot,
    /// Adding a child under an existing node
    CreateChild {
        parent_id: CategoryId,
        /// Level the child will sit at, captured when the modal opened.
        /// Display-only: the create request re-reads the parent's level from
        /// the current snapshot at build time (see `CategoryService`).
        level: u32,
    },
    /// Editing an existing node's content fields
    Edit { category_id: CategoryId },
}

/// Ephemeral state of one open modal.
///
/// Created when a modal-opening action fires, destroyed on cancel or
/// confirmed submit. The `generation` stamp identifies the session so a
/// store response that arrives after the session ended can be discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSession {
    pub mode: FormMode,
    pub fields: CategoryFields,
    pub generation: u64,
}

impl FormSession {
    pub fn create_root(generation: u64) -> Self {
        Self {
            mode: FormMode::CreateRoot,
            fields: CategoryFields::default(),
            generation,
        }
    }

    pub fn create_child(parent: &CategoryNode, generation: u64) -> Self {
        Self {
            mode: FormMode::CreateChild {
                parent_id: parent.id,
                level: parent.level + 1,
            },
            fields: CategoryFields::default(),
            generation,
        }
    }

    /// Edit session prefilled from the node's content fields, icon included
    /// so the image preview shows the existing icon.
    pub fn edit(node: &CategoryNode, generation: u64) -> Self {
        Self {
            mode: FormMode::Edit {
                category_id: node.id,
            },
            fields: node.fields(),
            generation,
        }
    }
}

/// The modal state machine: closed, or open with exactly one session.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormState {
    #[default]
    Closed,
    Open(FormSession),
}

impl FormState {
    pub fn is_open(&self) -> bool {
        matches!(self, FormState::Open(_))
    }

    pub fn session(&self) -> Option<&FormSession> {
        match self {
            FormState::Open(session) => Some(session),
            FormState::Closed => None,
        }
    }
}

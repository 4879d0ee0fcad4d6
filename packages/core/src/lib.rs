//! Curator Core Business Logic Layer
//!
//! This crate provides the data management, hierarchy handling, and service
//! orchestration for the Curator admin console (articles + category taxonomy).
//!
//! # Architecture
//!
//! - **Immutable tree snapshots**: the category forest is rebuilt wholesale
//!   from the store after every mutation, never patched in place
//! - **Derived levels**: a node's `level` is computed from ancestry during
//!   tree construction and is never independently editable
//! - **Typed REST boundary**: every store endpoint has an explicit
//!   request/response schema, validated at the edge
//! - **Explicit modal state machine**: the create/edit form is a tagged-union
//!   session object, fully replaced on every open
//!
//! # Modules
//!
//! - [`models`] - Data structures (CategoryNode, FormSession, Article, etc.)
//! - [`api`] - REST client layer (store traits, wire schemas, upload client)
//! - [`services`] - Business services (CategoryService, FormController, etc.)

pub mod api;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use api::*;
pub use models::*;
pub use services::*;

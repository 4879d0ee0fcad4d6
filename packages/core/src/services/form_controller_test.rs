//! FormController Tests
//!
//! Covers the modal state machine end to end against the in-memory store:
//! open/cancel transitions, the submit protocol, the stale-context
//! regression, and discarding of late responses.

use std::sync::Arc;

use crate::models::{CategoryId, FormMode, FormState, Status};
use crate::services::error::CategoryServiceError;
use crate::services::test_support::{record, InMemoryCategoryStore};
use crate::services::{CategoryService, FormController, SubmitDisposition};

/// Store seeded with a single root: Languages(1)
fn store() -> Arc<InMemoryCategoryStore> {
    Arc::new(InMemoryCategoryStore::with_rows(vec![record(
        1,
        None,
        1,
        "Languages",
    )]))
}

async fn service_with(store: Arc<InMemoryCategoryStore>) -> CategoryService {
    let mut service = CategoryService::new(store);
    service.load_tree(None).await.unwrap();
    service
}

fn fill(controller: &mut FormController, name: &str) {
    let fields = controller.fields_mut().expect("form open");
    fields.name = name.to_string();
    fields.description = format!("{name} description");
    fields.icon_url = format!("https://cdn.example.com/{name}.png");
}

#[tokio::test]
async fn test_open_create_root_resets_to_defaults() {
    let mut controller = FormController::new();
    controller.open_create_root();

    let session = controller.session().unwrap();
    assert_eq!(session.mode, FormMode::CreateRoot);
    assert!(session.fields.name.is_empty());
    assert_eq!(session.fields.status, Status::Active);
}

#[tokio::test]
async fn test_open_edit_prefills_fields_including_icon() {
    let service = service_with(store()).await;
    let node = service.find(CategoryId(1)).unwrap();

    let mut controller = FormController::new();
    controller.open_edit(node);

    let session = controller.session().unwrap();
    assert_eq!(
        session.mode,
        FormMode::Edit {
            category_id: CategoryId(1)
        }
    );
    assert_eq!(session.fields.name, "Languages");
    // Icon comes along so the preview shows the existing image
    assert_eq!(session.fields.icon_url, node.icon_url);
}

#[tokio::test]
async fn test_cancel_never_calls_store_and_never_mutates_tree() {
    let store = store();
    let service = service_with(store.clone()).await;
    let before_generation = service.generation();

    let mut controller = FormController::new();
    controller.open_create_root();
    fill(&mut controller, "Doomed");
    controller.cancel();

    assert_eq!(*controller.state(), FormState::Closed);
    assert_eq!(store.mutation_calls(), 0);
    assert_eq!(service.generation(), before_generation);
    // Draft state is gone: reopening starts clean
    controller.open_create_root();
    assert!(controller.session().unwrap().fields.name.is_empty());
}

#[tokio::test]
async fn test_submit_create_child_closes_modal_and_refreshes() {
    let store = store();
    let mut service = service_with(store.clone()).await;
    let mut controller = FormController::new();

    let parent = service.find(CategoryId(1)).unwrap().clone();
    controller.open_create_child(&parent);
    fill(&mut controller, "Rust");

    let disposition = controller.submit(&mut service).await.unwrap();
    assert_eq!(disposition, SubmitDisposition::Applied);
    assert!(!controller.is_open());

    let created = service
        .rows()
        .into_iter()
        .find(|n| n.name == "Rust")
        .expect("child visible after refresh");
    assert_eq!(created.parent_id, Some(CategoryId(1)));
    assert_eq!(created.level, 2);
}

#[tokio::test]
async fn test_add_root_after_child_session_gets_clean_context() {
    // Regression for the stale-context defect: add child B under A, then
    // open "add root" - the new node must land at level 1 with no parent.
    let store = store();
    let mut service = service_with(store.clone()).await;
    let mut controller = FormController::new();

    let root = service.find(CategoryId(1)).unwrap().clone();
    controller.open_create_child(&root);
    fill(&mut controller, "Rust");
    controller.submit(&mut service).await.unwrap();

    controller.open_create_root();
    fill(&mut controller, "Tools");
    controller.submit(&mut service).await.unwrap();

    let created = service
        .tree()
        .iter()
        .find(|n| n.name == "Tools")
        .expect("new root present");
    assert_eq!(created.parent_id, None);
    assert_eq!(created.level, 1);
}

#[tokio::test]
async fn test_rejection_keeps_modal_open_with_fields_intact() {
    let store = store();
    let mut service = service_with(store.clone()).await;
    let mut controller = FormController::new();

    controller.open_create_root();
    // Same name as the seeded root: the store rejects with its own message
    fill(&mut controller, "Languages");

    let err = controller.submit(&mut service).await.unwrap_err();
    assert!(err.keeps_form_open());
    match err {
        CategoryServiceError::Rejected { message } => assert_eq!(message, "name duplicated"),
        other => panic!("expected Rejected, got {other:?}"),
    }
    // Modal stays open so the operator's input survives the failure
    assert!(controller.is_open());
    assert_eq!(controller.session().unwrap().fields.name, "Languages");
    assert!(!controller.is_submitting());
}

#[tokio::test]
async fn test_validation_failure_is_not_a_transition() {
    let store = store();
    let mut service = service_with(store.clone()).await;
    let mut controller = FormController::new();

    controller.open_create_root();
    // Name left empty
    let err = controller.submit(&mut service).await.unwrap_err();
    assert!(matches!(err, CategoryServiceError::ValidationFailed(_)));
    assert!(err.keeps_form_open());
    assert!(controller.is_open());
    assert!(!controller.is_submitting());
    assert_eq!(store.mutation_calls(), 0);
}

#[tokio::test]
async fn test_late_response_after_cancel_is_discarded() {
    let store = store();
    let mut service = service_with(store.clone()).await;
    let mut controller = FormController::new();

    controller.open_create_root();
    fill(&mut controller, "Tools");
    let ticket = controller.begin_submit().unwrap();

    // Modal closes while the request is in flight
    controller.cancel();

    FormController::perform(&ticket, &mut service).await.unwrap();
    let disposition = controller.complete_submit(ticket.generation, true);
    assert_eq!(disposition, SubmitDisposition::Discarded);
    assert_eq!(*controller.state(), FormState::Closed);
}

#[tokio::test]
async fn test_outcome_for_superseded_session_is_discarded() {
    let mut controller = FormController::new();

    controller.open_create_root();
    let stale_generation = controller.session().unwrap().generation;

    // A different session replaced the one that issued the request
    controller.open_create_root();
    let disposition = controller.complete_submit(stale_generation, true);
    assert_eq!(disposition, SubmitDisposition::Discarded);
    // The open session is unaffected
    assert!(controller.is_open());
}

#[tokio::test]
async fn test_second_begin_submit_is_blocked_while_in_flight() {
    let mut controller = FormController::new();
    controller.open_create_root();
    fill(&mut controller, "Tools");

    let _ticket = controller.begin_submit().unwrap();
    let err = controller.begin_submit().unwrap_err();
    assert!(matches!(err, CategoryServiceError::SubmitInFlight));
}

#[tokio::test]
async fn test_uploaded_icon_applies_only_to_issuing_session() {
    let mut controller = FormController::new();
    controller.open_create_root();
    let generation = controller.session().unwrap().generation;

    assert!(controller.apply_uploaded_icon(generation, "https://cdn.example.com/a.png".into()));
    assert_eq!(
        controller.session().unwrap().fields.icon_url,
        "https://cdn.example.com/a.png"
    );

    // Session replaced before a second upload resolves: URL is dropped
    controller.open_create_root();
    assert!(!controller.apply_uploaded_icon(generation, "https://cdn.example.com/b.png".into()));
    assert!(controller.session().unwrap().fields.icon_url.is_empty());
}

#[tokio::test]
async fn test_submit_with_no_session_fails() {
    let mut controller = FormController::new();
    let err = controller.begin_submit().unwrap_err();
    assert!(matches!(err, CategoryServiceError::NoOpenSession));
    assert!(!err.keeps_form_open());
}

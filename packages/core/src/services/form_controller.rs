//! Form Controller - Modal State Machine
//!
//! Governs the create/edit modal as an explicit finite state machine:
//! `Closed`, or `Open` with exactly one [`FormSession`]. Opening a modal
//! fully replaces the session; nothing is merged with leftover context, so
//! a stale child level can never bleed into a later "add root" flow.
//!
//! # Submit protocol
//!
//! Submission is split into `begin_submit` / `complete_submit` around the
//! store round-trip. `begin_submit` validates and captures the session into
//! a [`SubmitTicket`]; `complete_submit` applies the outcome only if the
//! very same session is still open - a response landing after cancel is
//! discarded with no side effects on modal state. The triggering control
//! stays disabled in between (`is_submitting`), enforcing at most one
//! in-flight mutation per modal.

use crate::models::{CategoryFields, CategoryNode, FormMode, FormSession, FormState};
use crate::services::category_service::CategoryService;
use crate::services::error::CategoryServiceError;

/// Captured session data for one in-flight submission
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub mode: FormMode,
    pub fields: CategoryFields,
    pub generation: u64,
}

/// What `complete_submit` did with the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDisposition {
    /// Success: modal closed, session context destroyed
    Applied,
    /// Failure: modal stays open with the entered fields intact
    Retained,
    /// The issuing session ended first; outcome dropped entirely
    Discarded,
}

/// Modal lifecycle controller.
///
/// Strictly single-instance: at most one session is open, and a new open
/// transition replaces the state wholesale.
#[derive(Debug, Default)]
pub struct FormController {
    state: FormState,
    /// Monotonic session counter; stamps each session so late responses
    /// can tell whether their session is still the open one.
    sessions_opened: u64,
    submitting: bool,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn session(&self) -> Option<&FormSession> {
        self.state.session()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// True while a submission awaits its store response; the UI disables
    /// the submit control for the duration.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Mutable access to the open session's fields (UI data binding).
    pub fn fields_mut(&mut self) -> Option<&mut CategoryFields> {
        match &mut self.state {
            FormState::Open(session) => Some(&mut session.fields),
            FormState::Closed => None,
        }
    }

    fn open(&mut self, make: impl FnOnce(u64) -> FormSession) {
        self.sessions_opened += 1;
        self.submitting = false;
        self.state = FormState::Open(make(self.sessions_opened));
    }

    /// Open the "add top-level category" modal: fields reset to defaults,
    /// target pinned to parent none / level 1.
    pub fn open_create_root(&mut self) {
        self.open(FormSession::create_root);
    }

    /// Open the "add subcategory" modal for a row.
    pub fn open_create_child(&mut self, parent: &CategoryNode) {
        self.open(|generation| FormSession::create_child(parent, generation));
    }

    /// Open the edit modal prefilled from the row's content fields.
    pub fn open_edit(&mut self, node: &CategoryNode) {
        self.open(|generation| FormSession::edit(node, generation));
    }

    /// Close the modal, discarding all field edits and target context.
    pub fn cancel(&mut self) {
        self.state = FormState::Closed;
        self.submitting = false;
    }

    /// Validate and capture the open session for submission.
    ///
    /// A validation failure leaves the state machine untouched (modal open,
    /// fields intact) and performs no store call.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, CategoryServiceError> {
        if self.submitting {
            return Err(CategoryServiceError::SubmitInFlight);
        }
        let session = self
            .state
            .session()
            .ok_or(CategoryServiceError::NoOpenSession)?;
        session.fields.validate()?;
        let ticket = SubmitTicket {
            mode: session.mode.clone(),
            fields: session.fields.clone(),
            generation: session.generation,
        };
        self.submitting = true;
        Ok(ticket)
    }

    /// Apply a submission outcome, but only if the issuing session is still
    /// the open one. Success closes the modal and destroys the session -
    /// and with it every parent/level override and icon preview, so the
    /// next open starts from clean defaults.
    pub fn complete_submit(
        &mut self,
        ticket_generation: u64,
        succeeded: bool,
    ) -> SubmitDisposition {
        let current = match self.state.session() {
            Some(session) => session.generation,
            None => {
                tracing::debug!(
                    "Dropping submit outcome for session {}: modal already closed",
                    ticket_generation
                );
                return SubmitDisposition::Discarded;
            }
        };
        if current != ticket_generation {
            tracing::debug!(
                "Dropping submit outcome for session {}: session {} is open now",
                ticket_generation,
                current
            );
            return SubmitDisposition::Discarded;
        }
        self.submitting = false;
        if succeeded {
            self.state = FormState::Closed;
            SubmitDisposition::Applied
        } else {
            SubmitDisposition::Retained
        }
    }

    /// Full submit cycle against the category service.
    ///
    /// Dispatches on the captured mode: create sessions build a create
    /// request (child levels resolved against the *current* tree), edit
    /// sessions build a content-only update. On success the service has
    /// already refreshed the tree and the modal is closed; on failure the
    /// error is returned with the modal left open for a user-initiated
    /// retry.
    pub async fn submit(
        &mut self,
        service: &mut CategoryService,
    ) -> Result<SubmitDisposition, CategoryServiceError> {
        let ticket = self.begin_submit()?;
        let outcome = Self::perform(&ticket, service).await;
        match outcome {
            Ok(()) => Ok(self.complete_submit(ticket.generation, true)),
            Err(err) => {
                self.complete_submit(ticket.generation, false);
                Err(err)
            }
        }
    }

    /// The store round-trip for a captured ticket.
    pub async fn perform(
        ticket: &SubmitTicket,
        service: &mut CategoryService,
    ) -> Result<(), CategoryServiceError> {
        match &ticket.mode {
            FormMode::CreateRoot | FormMode::CreateChild { .. } => {
                let request = service.build_create_request(&ticket.mode, &ticket.fields)?;
                service.submit_create(&request).await
            }
            FormMode::Edit { category_id } => {
                let request = service.build_update_request(*category_id, &ticket.fields)?;
                service.submit_update(*category_id, &request).await
            }
        }
    }

    /// Attach an uploaded icon URL to the session that initiated the upload.
    ///
    /// Uploads resolve asynchronously; if the session ended (cancel, or a
    /// different modal opened) before the URL arrived, it is dropped.
    pub fn apply_uploaded_icon(&mut self, session_generation: u64, url: String) -> bool {
        match &mut self.state {
            FormState::Open(session) if session.generation == session_generation => {
                session.fields.icon_url = url;
                true
            }
            _ => {
                tracing::debug!(
                    "Dropping uploaded icon for session {}: session no longer open",
                    session_generation
                );
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "form_controller_test.rs"]
mod form_controller_test;

//! State transitions for the visitor sign-in views.
//!
//! The reducer performs no I/O. Every entry point returns the commands the
//! caller must execute; their results come back through [`Controller::apply`].

use std::{collections::HashSet, time::Duration};

use shared::domain::{FormField, Page, VisitorDraft, VisitorId, VisitorRecord};
use tracing::{debug, error, info, warn};

use crate::controller::events::{BackendCommand, BackendEvent, UiAction};

/// How long the "submitted successfully" banner stays up.
pub const SUCCESS_NOTICE_DURATION: Duration = Duration::from_secs(3);

const SUBMIT_FAILED_MESSAGE: &str = "Error submitting form. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessNotice {
    pub ticket: u64,
}

/// Blocking notice the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub page: Page,
    pub draft: VisitorDraft,
    pub records: Vec<VisitorRecord>,
    /// A create call is in flight; submit is disabled.
    pub submitting: bool,
    pub success_notice: Option<SuccessNotice>,
    pub alert: Option<Alert>,
    /// Required fields found blank by the last submit attempt.
    pub missing_fields: Vec<FormField>,
    /// Record awaiting the user's delete confirmation.
    pub pending_confirmation: Option<VisitorId>,
    /// Records with a delete call in flight.
    pub deleting: HashSet<VisitorId>,
}

impl ViewState {
    pub fn success_visible(&self) -> bool {
        self.success_notice.is_some()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_deleting(&self, id: VisitorId) -> bool {
        self.deleting.contains(&id)
    }

    /// A confirmation or alert is up; everything behind it is inert.
    pub fn modal_open(&self) -> bool {
        self.pending_confirmation.is_some() || self.alert.is_some()
    }
}

#[derive(Debug, Default)]
pub struct Controller {
    state: ViewState,
    last_notice_ticket: u64,
    /// Generation of the most recent list request; older responses are stale.
    last_list_generation: u64,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn handle(&mut self, action: UiAction) -> Vec<BackendCommand> {
        match action {
            UiAction::SelectPage(page) => self.select_page(page),
            UiAction::UpdateField { field, value } => {
                self.update_field(field, value);
                Vec::new()
            }
            UiAction::Submit => self.submit(),
            UiAction::Refresh => self.load_records(),
            UiAction::RequestDelete(id) => {
                self.request_delete(id);
                Vec::new()
            }
            UiAction::ConfirmDelete => self.confirm_delete(),
            UiAction::CancelDelete => {
                self.state.pending_confirmation = None;
                Vec::new()
            }
            UiAction::DismissAlert => {
                self.state.alert = None;
                Vec::new()
            }
        }
    }

    /// Switches the active view. Entering the records view always refetches.
    pub fn select_page(&mut self, page: Page) -> Vec<BackendCommand> {
        let entering_records = page == Page::Records && self.state.page != Page::Records;
        self.state.page = page;
        if entering_records {
            self.load_records()
        } else {
            Vec::new()
        }
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.state.draft.set(field, value);
        self.state.missing_fields.retain(|missing| *missing != field);
    }

    pub fn submit(&mut self) -> Vec<BackendCommand> {
        if self.state.submitting {
            return Vec::new();
        }
        let missing = self.state.draft.missing_required();
        if !missing.is_empty() {
            info!(missing = ?missing, "submit blocked: required fields are blank");
            self.state.missing_fields = missing;
            return Vec::new();
        }
        self.state.missing_fields.clear();
        self.state.submitting = true;
        vec![BackendCommand::CreateVisitor {
            draft: self.state.draft.clone(),
        }]
    }

    pub fn load_records(&mut self) -> Vec<BackendCommand> {
        self.last_list_generation += 1;
        vec![BackendCommand::ListVisitors {
            generation: self.last_list_generation,
        }]
    }

    pub fn request_delete(&mut self, id: VisitorId) {
        if self.state.deleting.contains(&id) {
            return;
        }
        self.state.pending_confirmation = Some(id);
    }

    pub fn confirm_delete(&mut self) -> Vec<BackendCommand> {
        let Some(id) = self.state.pending_confirmation.take() else {
            return Vec::new();
        };
        if !self.state.deleting.insert(id) {
            return Vec::new();
        }
        vec![BackendCommand::DeleteVisitor { id }]
    }

    pub fn apply(&mut self, event: BackendEvent) -> Vec<BackendCommand> {
        match event {
            BackendEvent::VisitorsLoaded {
                generation,
                records,
            } => {
                if generation == self.last_list_generation {
                    self.state.records = records;
                } else {
                    debug!(
                        generation,
                        latest = self.last_list_generation,
                        "dropping superseded visitor list"
                    );
                }
                Vec::new()
            }
            BackendEvent::VisitorsLoadFailed { generation, reason } => {
                warn!(generation, "error fetching visitors: {reason}");
                Vec::new()
            }
            BackendEvent::VisitorCreated => {
                self.state.submitting = false;
                self.state.draft = VisitorDraft::default();
                self.last_notice_ticket += 1;
                let ticket = self.last_notice_ticket;
                self.state.success_notice = Some(SuccessNotice { ticket });
                vec![BackendCommand::ScheduleNoticeExpiry {
                    ticket,
                    after: SUCCESS_NOTICE_DURATION,
                }]
            }
            BackendEvent::VisitorCreateFailed(reason) => {
                error!("error submitting form: {reason}");
                self.state.submitting = false;
                self.state.alert = Some(Alert {
                    message: SUBMIT_FAILED_MESSAGE.to_string(),
                    detail: Some(reason),
                });
                Vec::new()
            }
            BackendEvent::VisitorDeleted(id) => {
                self.state.deleting.remove(&id);
                self.load_records()
            }
            BackendEvent::VisitorDeleteFailed { id, reason } => {
                warn!(visitor_id = id.0, "error deleting visitor: {reason}");
                self.state.deleting.remove(&id);
                self.load_records()
            }
            BackendEvent::NoticeExpired { ticket } => {
                if self.state.success_notice.map(|notice| notice.ticket) == Some(ticket) {
                    self.state.success_notice = None;
                }
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;

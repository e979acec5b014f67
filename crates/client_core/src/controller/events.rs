//! Messages flowing into and out of the controller.

use std::time::Duration;

use shared::domain::{FormField, Page, VisitorDraft, VisitorId, VisitorRecord};

/// User intent, as produced by a front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    SelectPage(Page),
    UpdateField { field: FormField, value: String },
    Submit,
    Refresh,
    /// Asks for confirmation; nothing is sent yet.
    RequestDelete(VisitorId),
    ConfirmDelete,
    CancelDelete,
    DismissAlert,
}

/// Work the controller wants done on its behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    /// `generation` is echoed in the outcome so late responses can be dropped.
    ListVisitors { generation: u64 },
    CreateVisitor { draft: VisitorDraft },
    DeleteVisitor { id: VisitorId },
    ScheduleNoticeExpiry { ticket: u64, after: Duration },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::ListVisitors { .. } => "list_visitors",
            BackendCommand::CreateVisitor { .. } => "create_visitor",
            BackendCommand::DeleteVisitor { .. } => "delete_visitor",
            BackendCommand::ScheduleNoticeExpiry { .. } => "schedule_notice_expiry",
        }
    }
}

/// Outcome of a [`BackendCommand`], fed back into the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    VisitorsLoaded {
        generation: u64,
        records: Vec<VisitorRecord>,
    },
    VisitorsLoadFailed {
        generation: u64,
        reason: String,
    },
    VisitorCreated,
    VisitorCreateFailed(String),
    VisitorDeleted(VisitorId),
    VisitorDeleteFailed { id: VisitorId, reason: String },
    NoticeExpired { ticket: u64 },
}

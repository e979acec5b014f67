//! Executes controller commands against a gateway without blocking the caller.

use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info};

use crate::{
    controller::{BackendCommand, BackendEvent},
    gateway::VisitorGateway,
};

/// Destination for backend events. Front-ends adapt their own channel type.
pub trait EventSink: Send + Sync + 'static {
    fn emit(&self, event: BackendEvent);
}

impl EventSink for mpsc::UnboundedSender<BackendEvent> {
    fn emit(&self, event: BackendEvent) {
        if self.send(event).is_err() {
            debug!("event receiver dropped; discarding backend event");
        }
    }
}

/// Runs one gateway command to completion and reports its outcome.
/// Timer commands are not gateway calls and yield `None`.
pub async fn perform<G>(gateway: &G, command: BackendCommand) -> Option<BackendEvent>
where
    G: VisitorGateway + ?Sized,
{
    let event = match command {
        BackendCommand::ListVisitors { generation } => match gateway.list_visitors().await {
            Ok(records) => BackendEvent::VisitorsLoaded {
                generation,
                records,
            },
            Err(err) => BackendEvent::VisitorsLoadFailed {
                generation,
                reason: err.to_string(),
            },
        },
        BackendCommand::CreateVisitor { draft } => match gateway.create_visitor(&draft).await {
            Ok(()) => BackendEvent::VisitorCreated,
            Err(err) => BackendEvent::VisitorCreateFailed(err.to_string()),
        },
        BackendCommand::DeleteVisitor { id } => match gateway.delete_visitor(id).await {
            Ok(()) => BackendEvent::VisitorDeleted(id),
            Err(err) => BackendEvent::VisitorDeleteFailed {
                id,
                reason: err.to_string(),
            },
        },
        BackendCommand::ScheduleNoticeExpiry { .. } => return None,
    };
    Some(event)
}

/// The delayed task that hides the success notice. At most one expiry is
/// pending; dropping the timer aborts it.
#[derive(Debug, Default)]
pub struct NoticeTimer {
    task: Option<JoinHandle<()>>,
}

impl NoticeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, ticket: u64, after: Duration, sink: Arc<dyn EventSink>) {
        self.cancel();
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(after).await;
            sink.emit(BackendEvent::NoticeExpired { ticket });
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for NoticeTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub struct Worker {
    gateway: Arc<dyn VisitorGateway>,
    sink: Arc<dyn EventSink>,
    notice_timer: NoticeTimer,
}

impl Worker {
    pub fn new(gateway: Arc<dyn VisitorGateway>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            gateway,
            sink,
            notice_timer: NoticeTimer::new(),
        }
    }

    /// Starts the command and returns immediately; the outcome arrives through
    /// the sink. Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, command: BackendCommand) {
        info!(command = command.name(), "worker: dispatch");
        match command {
            BackendCommand::ScheduleNoticeExpiry { ticket, after } => {
                self.notice_timer.schedule(ticket, after, self.sink.clone());
            }
            command => {
                let gateway = self.gateway.clone();
                let sink = self.sink.clone();
                tokio::spawn(async move {
                    if let Some(event) = perform(gateway.as_ref(), command).await {
                        sink.emit(event);
                    }
                });
            }
        }
    }

    pub fn notice_pending(&self) -> bool {
        self.notice_timer.is_pending()
    }
}

#[cfg(test)]
#[path = "tests/worker_tests.rs"]
mod tests;

//! Command orchestration helpers from controller output to the backend command queue.

use client_core::{BackendCommand, BackendEvent};
use crossbeam_channel::{Sender, TrySendError};

/// Queues every command for the backend worker. Commands that cannot be
/// queued come back as failure events so the controller never waits on a
/// call that was never made (a stuck busy flag, a stuck delete marker).
pub fn dispatch_backend_commands(
    cmd_tx: &Sender<BackendCommand>,
    commands: Vec<BackendCommand>,
    status: &mut String,
) -> Vec<BackendEvent> {
    let mut undelivered = Vec::new();
    for cmd in commands {
        let cmd_name = cmd.name();
        let (cmd, why) = match cmd_tx.try_send(cmd) {
            Ok(()) => {
                tracing::debug!(command = cmd_name, "queued ui->backend command");
                continue;
            }
            Err(TrySendError::Full(cmd)) => {
                *status = "UI command queue is full; please retry".to_string();
                (cmd, "command queue full")
            }
            Err(TrySendError::Disconnected(cmd)) => {
                *status =
                    "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                        .to_string();
                (cmd, "backend worker unavailable")
            }
        };
        tracing::warn!(command = cmd_name, "could not queue command: {why}");
        undelivered.push(undelivered_event(cmd, why));
    }
    undelivered
}

fn undelivered_event(cmd: BackendCommand, reason: &str) -> BackendEvent {
    match cmd {
        BackendCommand::ListVisitors { generation } => BackendEvent::VisitorsLoadFailed {
            generation,
            reason: reason.to_string(),
        },
        BackendCommand::CreateVisitor { .. } => BackendEvent::VisitorCreateFailed(reason.to_string()),
        BackendCommand::DeleteVisitor { id } => BackendEvent::VisitorDeleteFailed {
            id,
            reason: reason.to_string(),
        },
        BackendCommand::ScheduleNoticeExpiry { ticket, .. } => BackendEvent::NoticeExpired { ticket },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::{VisitorDraft, VisitorId};

    #[test]
    fn queued_commands_produce_no_events() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let mut status = String::new();
        let undelivered = dispatch_backend_commands(
            &cmd_tx,
            vec![BackendCommand::ListVisitors { generation: 1 }],
            &mut status,
        );
        assert!(undelivered.is_empty());
        assert!(status.is_empty());
        assert_eq!(
            cmd_rx.try_recv().ok(),
            Some(BackendCommand::ListVisitors { generation: 1 })
        );
    }

    #[test]
    fn disconnected_worker_turns_commands_into_failures() {
        let (cmd_tx, cmd_rx) = bounded(4);
        drop(cmd_rx);
        let mut status = String::new();
        let undelivered = dispatch_backend_commands(
            &cmd_tx,
            vec![
                BackendCommand::CreateVisitor {
                    draft: VisitorDraft::default(),
                },
                BackendCommand::DeleteVisitor { id: VisitorId(3) },
            ],
            &mut status,
        );
        assert!(status.contains("disconnected"));
        assert!(matches!(
            undelivered.as_slice(),
            [
                BackendEvent::VisitorCreateFailed(_),
                BackendEvent::VisitorDeleteFailed { id: VisitorId(3), .. }
            ]
        ));
    }

    #[test]
    fn full_queue_expires_notice_immediately() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        cmd_tx
            .try_send(BackendCommand::ListVisitors { generation: 1 })
            .expect("fill queue");
        let mut status = String::new();
        let undelivered = dispatch_backend_commands(
            &cmd_tx,
            vec![BackendCommand::ScheduleNoticeExpiry {
                ticket: 4,
                after: std::time::Duration::from_secs(3),
            }],
            &mut status,
        );
        assert_eq!(undelivered, vec![BackendEvent::NoticeExpired { ticket: 4 }]);
        assert!(status.contains("full"));
    }
}

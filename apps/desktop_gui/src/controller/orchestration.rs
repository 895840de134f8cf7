//! Command orchestration helpers from UI actions to backend command queue.

use client_core::Session;
use crossbeam_channel::{Sender, TrySendError};
use shared::error::WorkflowError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut Option<UiError>,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            return true;
        }
        Err(TrySendError::Full(_)) => {
            *status = Some(UiError::from_message(
                UiErrorContext::General,
                "UI command queue is full; please retry",
            ));
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = Some(UiError::from_message(
                UiErrorContext::General,
                "Backend command processor disconnected (possible startup/runtime failure); restart the app",
            ));
        }
    }
    false
}

/// Validates and submits the current selections. A command that cannot be
/// queued resolves its invocation as failed so the session never stays
/// stuck in `Loading`.
pub fn submit_run(
    session: &mut Session,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut Option<UiError>,
) {
    let Ok(ticket) = session.begin_run() else {
        return;
    };
    let seq = ticket.seq;
    if !dispatch_backend_command(cmd_tx, BackendCommand::Recommend { ticket }, status) {
        session.finish_run(seq, Err(WorkflowError::Invocation));
    }
}

//! Command orchestration helpers from UI actions to backend command queue.

use client_core::SearchShell;
use crossbeam_channel::{Sender, TrySendError};
use shared::error::RequestFailed;

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd`, reporting queue problems through `status`. Returns whether
/// the backend will see the command.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker is not running; restart the app".to_string();
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            false
        }
    }
}

/// Starts a search for the shell's current query and hands it to the
/// backend. A blank query is a no-op. When the command cannot be queued the
/// search completes immediately as a failure so the shell never stays loading.
pub fn submit_search(
    shell: &mut SearchShell,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) -> bool {
    let Some(pending) = shell.begin_search() else {
        return false;
    };

    let ticket = pending.ticket;
    let queued = dispatch_backend_command(
        cmd_tx,
        BackendCommand::Recommend {
            ticket,
            query: pending.query,
        },
        status,
    );
    if !queued {
        shell.complete_search(
            ticket,
            Err(RequestFailed::transport("search command was not queued")),
        );
    }
    true
}

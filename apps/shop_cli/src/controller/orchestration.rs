//! Command orchestration helpers from front-loop actions to the backend
//! command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(cmd_tx: &Sender<BackendCommand>, cmd: BackendCommand) {
    let cmd_name = match &cmd {
        BackendCommand::FetchCatalog => "fetch_catalog",
        BackendCommand::PlaceOrder { .. } => "place_order",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued backend command"),
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend command queue is full; dropping");
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(
                command = cmd_name,
                "backend command processor disconnected (possible startup failure)"
            );
        }
    }
}

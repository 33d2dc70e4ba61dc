use std::sync::Arc;

use crate::channel::DedicatedChannel;
use crate::registry::TransactionRegistry;
use crate::router::{DcchHandlers, dispatch};

/// The dedicated-control-channel service loop. One dispatcher worker per
/// channel, running for the lifetime of the channel; each iteration serves
/// one establish/transaction cycle and never escapes the loop on failure.
pub struct DcchDispatcher {
    handlers: Arc<dyn DcchHandlers>,
    registry: Arc<dyn TransactionRegistry>,
}

impl DcchDispatcher {
    pub fn new(handlers: Arc<dyn DcchHandlers>, registry: Arc<dyn TransactionRegistry>) -> Self {
        DcchDispatcher { handlers, registry }
    }

    /// Serve the channel forever. Intended as a thread body.
    pub fn run(&self, dcch: &dyn DedicatedChannel) -> ! {
        tracing::info!("dispatcher starting on {}", dcch.id());
        loop {
            self.dispatch_once(dcch);
        }
    }

    /// One establish/serve cycle: wait for the channel to come up, read the
    /// opening message, route it, and recover from any failure by releasing
    /// the channel with the mandated cause code.
    pub fn dispatch_once(&self, dcch: &dyn DedicatedChannel) {
        dcch.wait_for_establish();
        tracing::debug!("{} established", dcch.id());

        let outcome = dcch
            .read_message()
            .and_then(|msg| dispatch(&msg, dcch, self.handlers.as_ref()));

        if let Err(err) = outcome {
            self.recover(dcch, &err);
        }
    }

    fn recover(&self, dcch: &dyn DedicatedChannel, err: &crate::errors::ControlError) {
        if err.is_session_leak() {
            // These should have been resolved inside the transaction layer;
            // reaching here means an entry may be stranded in the registry.
            tracing::warn!("{}: stray failure escaped transaction layer: {}", dcch.id(), err);
        } else {
            tracing::info!("{}: recovering from {}", dcch.id(), err);
        }

        dcch.send_release(err.release_cause());

        if let Some(id) = err.transaction_id() {
            self.registry.remove(id);
        }
    }
}

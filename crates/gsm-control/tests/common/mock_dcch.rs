use std::collections::VecDeque;
use std::sync::Mutex;

use gsm_control::{ChannelId, ControlError, DcchKind, DedicatedChannel};
use gsm_core::L3Message;

/// Scripted dedicated channel: serves pre-loaded read results in order and
/// records every release it is asked to transmit.
pub struct MockDcch {
    kind: DcchKind,
    reads: Mutex<VecDeque<Result<L3Message, ControlError>>>,
    releases: Mutex<Vec<u8>>,
}

impl MockDcch {
    pub fn new(kind: DcchKind) -> MockDcch {
        MockDcch {
            kind,
            reads: Mutex::new(VecDeque::new()),
            releases: Mutex::new(Vec::new()),
        }
    }

    pub fn script_read(&self, result: Result<L3Message, ControlError>) {
        self.reads.lock().unwrap().push_back(result);
    }

    /// Cause codes of all releases sent so far, in order
    pub fn releases(&self) -> Vec<u8> {
        self.releases.lock().unwrap().clone()
    }
}

impl DedicatedChannel for MockDcch {
    fn id(&self) -> ChannelId {
        ChannelId { arfcn: 871, timeslot: 2, tsc: 2 }
    }

    fn kind(&self) -> DcchKind {
        self.kind
    }

    fn wait_for_establish(&self) {}

    fn read_message(&self) -> Result<L3Message, ControlError> {
        self.reads
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ControlError::ChannelReadTimeout { transaction_id: None }))
    }

    fn send_release(&self, cause: u8) {
        self.releases.lock().unwrap().push(cause);
    }
}

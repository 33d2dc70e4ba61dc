use std::sync::Mutex;

use gsm_control::{ControlError, DcchHandlers, DedicatedChannel};
use gsm_core::L3Message;

/// Handler set that records which handler ran. Optionally fails every call
/// with a scripted error, to exercise the recovery path.
#[derive(Default)]
pub struct RecordingHandlers {
    calls: Mutex<Vec<&'static str>>,
    fail_with: Mutex<Option<ControlError>>,
}

impl RecordingHandlers {
    pub fn new() -> RecordingHandlers {
        RecordingHandlers::default()
    }

    pub fn failing(err: ControlError) -> RecordingHandlers {
        RecordingHandlers {
            calls: Mutex::new(Vec::new()),
            fail_with: Mutex::new(Some(err)),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, name: &'static str) -> Result<(), ControlError> {
        self.calls.lock().unwrap().push(name);
        match self.fail_with.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl DcchHandlers for RecordingHandlers {
    fn location_updating(&self, _msg: &L3Message, _dcch: &dyn DedicatedChannel) -> Result<(), ControlError> {
        self.record("location_updating")
    }

    fn imsi_detach(&self, _msg: &L3Message, _dcch: &dyn DedicatedChannel) -> Result<(), ControlError> {
        self.record("imsi_detach")
    }

    fn cm_service(&self, _msg: &L3Message, _dcch: &dyn DedicatedChannel) -> Result<(), ControlError> {
        self.record("cm_service")
    }

    fn paging_response(&self, _msg: &L3Message, _dcch: &dyn DedicatedChannel) -> Result<(), ControlError> {
        self.record("paging_response")
    }

    fn assignment_complete(&self, _msg: &L3Message, _dcch: &dyn DedicatedChannel) -> Result<(), ControlError> {
        self.record("assignment_complete")
    }
}

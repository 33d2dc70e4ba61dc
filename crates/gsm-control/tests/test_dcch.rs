mod common;

use std::sync::Arc;

use gsm_control::{ControlError, DcchDispatcher, DcchKind, TransactionTable, cause};
use gsm_core::debug;

use common::{MockDcch, RecordingHandlers, l3};

fn dispatcher(handlers: RecordingHandlers) -> (DcchDispatcher, Arc<TransactionTable>) {
    let registry = Arc::new(TransactionTable::new());
    (
        DcchDispatcher::new(Arc::new(handlers), registry.clone()),
        registry,
    )
}

#[test]
fn test_served_message_sends_no_release() {
    debug::setup_logging_verbose();
    let dcch = MockDcch::new(DcchKind::Sdcch);
    dcch.script_read(Ok(l3(0x05, 0x08)));

    let (dispatcher, _registry) = dispatcher(RecordingHandlers::new());
    dispatcher.dispatch_once(&dcch);

    assert!(dcch.releases().is_empty());
}

#[test]
fn test_unknown_protocol_releases_with_0x61() {
    debug::setup_logging_verbose();
    let dcch = MockDcch::new(DcchKind::Sdcch);
    dcch.script_read(Ok(l3(0xff, 0x00)));

    let (dispatcher, _registry) = dispatcher(RecordingHandlers::new());
    dispatcher.dispatch_once(&dcch);

    assert_eq!(dcch.releases(), vec![cause::MSG_TYPE_NOT_IMPLEMENTED]);
}

#[test]
fn test_read_timeout_releases_with_0x03() {
    debug::setup_logging_verbose();
    let dcch = MockDcch::new(DcchKind::Sdcch);
    dcch.script_read(Err(ControlError::ChannelReadTimeout { transaction_id: None }));

    let (dispatcher, _registry) = dispatcher(RecordingHandlers::new());
    dispatcher.dispatch_once(&dcch);

    assert_eq!(dcch.releases(), vec![cause::ABNORMAL_TIMER_EXPIRED]);
}

#[test]
fn test_handler_failure_cleans_up_its_transaction() {
    debug::setup_logging_verbose();
    let dcch = MockDcch::new(DcchKind::Sdcch);
    dcch.script_read(Ok(l3(0x05, 0x24)));

    let handlers =
        RecordingHandlers::failing(ControlError::SignalingTimerExpired { transaction_id: Some(7) });
    let (dispatcher, registry) = dispatcher(handlers);
    registry.insert(7);
    registry.insert(8);

    dispatcher.dispatch_once(&dcch);

    assert_eq!(dcch.releases(), vec![cause::ABNORMAL_TIMER_EXPIRED]);
    assert!(!registry.contains(7));
    assert!(registry.contains(8));
}

#[test]
fn test_session_error_releases_unspecified() {
    debug::setup_logging_verbose();
    let dcch = MockDcch::new(DcchKind::Sdcch);
    dcch.script_read(Ok(l3(0x05, 0x08)));

    let handlers =
        RecordingHandlers::failing(ControlError::SessionError { transaction_id: None });
    let (dispatcher, registry) = dispatcher(handlers);
    registry.insert(3);

    dispatcher.dispatch_once(&dcch);

    assert_eq!(dcch.releases(), vec![cause::ABNORMAL_UNSPECIFIED]);
    // No transaction ID was carried, so the entry stays (the stray is logged)
    assert!(registry.contains(3));
}

#[test]
fn test_each_iteration_recovers_independently() {
    debug::setup_logging_verbose();
    let dcch = MockDcch::new(DcchKind::Sdcch);
    dcch.script_read(Ok(l3(0xff, 0x00)));
    dcch.script_read(Ok(l3(0x05, 0x01)));
    dcch.script_read(Err(ControlError::ChannelReadTimeout { transaction_id: None }));

    let (dispatcher, _registry) = dispatcher(RecordingHandlers::new());
    dispatcher.dispatch_once(&dcch);
    dispatcher.dispatch_once(&dcch);
    dispatcher.dispatch_once(&dcch);

    // Failure, success, failure; only the failures released
    assert_eq!(
        dcch.releases(),
        vec![cause::MSG_TYPE_NOT_IMPLEMENTED, cause::ABNORMAL_TIMER_EXPIRED]
    );
}

mod common;

use gsm_control::{ControlError, DcchKind, cause, dispatch};
use gsm_core::debug;

use common::{MockDcch, RecordingHandlers, l3};

#[test]
fn test_mm_messages_reach_their_handlers() {
    debug::setup_logging_verbose();
    let dcch = MockDcch::new(DcchKind::Sdcch);
    let handlers = RecordingHandlers::new();

    dispatch(&l3(0x05, 0x08), &dcch, &handlers).unwrap();
    dispatch(&l3(0x05, 0x01), &dcch, &handlers).unwrap();
    dispatch(&l3(0x05, 0x24), &dcch, &handlers).unwrap();

    assert_eq!(handlers.calls(), vec!["location_updating", "imsi_detach", "cm_service"]);
}

#[test]
fn test_paging_response_on_sdcch() {
    debug::setup_logging_verbose();
    let dcch = MockDcch::new(DcchKind::Sdcch);
    let handlers = RecordingHandlers::new();

    dispatch(&l3(0x06, 0x27), &dcch, &handlers).unwrap();
    assert_eq!(handlers.calls(), vec!["paging_response"]);
}

#[test]
fn test_assignment_complete_needs_traffic_channel() {
    debug::setup_logging_verbose();
    let handlers = RecordingHandlers::new();

    // On the signaling-only channel the message is rejected unrouted
    let sdcch = MockDcch::new(DcchKind::Sdcch);
    let err = dispatch(&l3(0x06, 0x29), &sdcch, &handlers).unwrap_err();
    assert_eq!(err.release_cause(), cause::MSG_TYPE_NOT_IMPLEMENTED);
    assert!(handlers.calls().is_empty());

    // On the traffic channel it reaches its handler
    let tch = MockDcch::new(DcchKind::TchFacch);
    dispatch(&l3(0x06, 0x29), &tch, &handlers).unwrap();
    assert_eq!(handlers.calls(), vec!["assignment_complete"]);
}

#[test]
fn test_unknown_protocol_is_unsupported() {
    debug::setup_logging_verbose();
    let dcch = MockDcch::new(DcchKind::Sdcch);
    let handlers = RecordingHandlers::new();

    let err = dispatch(&l3(0xff, 0x08), &dcch, &handlers).unwrap_err();
    assert_eq!(err, ControlError::UnsupportedProtocol { pd: 0xff, transaction_id: None });
    assert_eq!(err.release_cause(), 0x61);
    assert!(handlers.calls().is_empty());
}

#[test]
fn test_unknown_message_types_are_unsupported() {
    debug::setup_logging_verbose();
    let dcch = MockDcch::new(DcchKind::Sdcch);
    let handlers = RecordingHandlers::new();

    // MM with a message type this router does not serve
    let err = dispatch(&l3(0x05, 0x77), &dcch, &handlers).unwrap_err();
    assert_eq!(
        err,
        ControlError::UnsupportedMessage { pd: 0x05, mti: 0x77, transaction_id: None }
    );

    // Same for RR
    let err = dispatch(&l3(0x06, 0x55), &dcch, &handlers).unwrap_err();
    assert_eq!(err.release_cause(), cause::MSG_TYPE_NOT_IMPLEMENTED);
    assert!(handlers.calls().is_empty());
}

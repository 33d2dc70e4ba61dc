use gsm_core::{L3Message, L3Pd, MmMti, RrMti};

use crate::channel::{DcchKind, DedicatedChannel};
use crate::errors::ControlError;

/// The per-message-type transaction handlers, supplied by the signaling
/// collaborators. The router guarantees correct demultiplexing; handler
/// behavior is entirely theirs.
pub trait DcchHandlers: Send + Sync {
    fn location_updating(&self, msg: &L3Message, dcch: &dyn DedicatedChannel) -> Result<(), ControlError>;
    fn imsi_detach(&self, msg: &L3Message, dcch: &dyn DedicatedChannel) -> Result<(), ControlError>;
    fn cm_service(&self, msg: &L3Message, dcch: &dyn DedicatedChannel) -> Result<(), ControlError>;
    fn paging_response(&self, msg: &L3Message, dcch: &dyn DedicatedChannel) -> Result<(), ControlError>;

    /// Only ever invoked with a traffic-capable channel; the router enforces
    /// the variant before the call.
    fn assignment_complete(&self, msg: &L3Message, dcch: &dyn DedicatedChannel) -> Result<(), ControlError>;
}

/// Dispatch the appropriate handler for a Mobility Management message.
fn dispatch_mm(
    msg: &L3Message,
    dcch: &dyn DedicatedChannel,
    handlers: &dyn DcchHandlers,
) -> Result<(), ControlError> {
    match MmMti::from_raw(msg.mti) {
        Some(MmMti::LocationUpdatingRequest) => handlers.location_updating(msg, dcch),
        Some(MmMti::ImsiDetachIndication) => handlers.imsi_detach(msg, dcch),
        Some(MmMti::CmServiceRequest) => handlers.cm_service(msg, dcch),
        None => {
            tracing::info!("unhandled MM message 0x{:02x} on {}", msg.mti, dcch.id());
            Err(ControlError::UnsupportedMessage {
                pd: msg.pd,
                mti: msg.mti,
                transaction_id: None,
            })
        }
    }
}

/// Dispatch the appropriate handler for a Radio Resource message.
fn dispatch_rr(
    msg: &L3Message,
    dcch: &dyn DedicatedChannel,
    handlers: &dyn DcchHandlers,
) -> Result<(), ControlError> {
    tracing::debug!("checking RR MTI 0x{:02x}", msg.mti);
    match RrMti::from_raw(msg.mti) {
        Some(RrMti::PagingResponse) => handlers.paging_response(msg, dcch),
        Some(RrMti::AssignmentComplete) => {
            // Assignment completion only makes sense on the traffic channel
            // the mobile was assigned to. A typed variant match, not a cast.
            if dcch.kind() != DcchKind::TchFacch {
                tracing::info!("AssignmentComplete on non-traffic channel {}", dcch.id());
                return Err(ControlError::UnsupportedMessage {
                    pd: msg.pd,
                    mti: msg.mti,
                    transaction_id: None,
                });
            }
            handlers.assignment_complete(msg, dcch)
        }
        None => {
            tracing::info!("unhandled RR message 0x{:02x} on {}", msg.mti, dcch.id());
            Err(ControlError::UnsupportedMessage {
                pd: msg.pd,
                mti: msg.mti,
                transaction_id: None,
            })
        }
    }
}

/// Route one signaling message to exactly one handler, or fail. Pure and
/// total over (discriminator, message type); no state of its own.
pub fn dispatch(
    msg: &L3Message,
    dcch: &dyn DedicatedChannel,
    handlers: &dyn DcchHandlers,
) -> Result<(), ControlError> {
    // Each protocol has its own sub-dispatcher.
    match L3Pd::from_raw(msg.pd) {
        Some(L3Pd::MobilityManagement) => dispatch_mm(msg, dcch, handlers),
        Some(L3Pd::RadioResource) => dispatch_rr(msg, dcch, handlers),
        None => {
            tracing::info!("unhandled protocol 0x{:02x} on {}", msg.pd, dcch.id());
            Err(ControlError::UnsupportedProtocol {
                pd: msg.pd,
                transaction_id: None,
            })
        }
    }
}

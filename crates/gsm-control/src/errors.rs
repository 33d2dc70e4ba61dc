use core::fmt;

use gsm_core::TransactionId;

/// Channel-release cause codes from GSM 04.08 clause 10.5.2.31
pub mod cause {
    /// Abnormal release, unspecified
    pub const ABNORMAL_UNSPECIFIED: u8 = 0x01;
    /// Abnormal release, timer expired
    pub const ABNORMAL_TIMER_EXPIRED: u8 = 0x03;
    /// Message type not implemented
    pub const MSG_TYPE_NOT_IMPLEMENTED: u8 = 0x61;
    /// Message type not compatible with protocol state
    pub const MSG_TYPE_INCOMPATIBLE: u8 = 0x62;
}

/// Everything that can abort one control-channel iteration. Each variant
/// maps to exactly one release cause; variants carry the transaction ID when
/// the failing collaborator knows it, so the registry entry can be cleaned
/// up. Session-control failures bubbling up from the call-control stack are
/// first-class members here rather than foreign leaks.
#[derive(Debug, PartialEq, Eq)]
pub enum ControlError {
    /// Read timeout while waiting on the channel
    ChannelReadTimeout { transaction_id: Option<TransactionId> },
    /// Primitive not valid in the current protocol state
    UnexpectedPrimitive { transaction_id: Option<TransactionId> },
    /// Message not valid in the current transaction state
    UnexpectedMessage { transaction_id: Option<TransactionId> },
    /// Protocol discriminator with no sub-router
    UnsupportedProtocol { pd: u8, transaction_id: Option<TransactionId> },
    /// Message type recognized by discriminator but not implemented
    UnsupportedMessage { pd: u8, mti: u8, transaction_id: Option<TransactionId> },
    /// A signaling timer expired while a transaction was pending
    SignalingTimerExpired { transaction_id: Option<TransactionId> },
    /// Session-control timeout bubbling up uncaught
    SessionTimeout { transaction_id: Option<TransactionId> },
    /// Session-control protocol error bubbling up uncaught
    SessionError { transaction_id: Option<TransactionId> },
}

impl ControlError {
    /// The cause code carried in the channel release for this failure
    pub fn release_cause(&self) -> u8 {
        match self {
            ControlError::ChannelReadTimeout { .. } => cause::ABNORMAL_TIMER_EXPIRED,
            ControlError::UnexpectedPrimitive { .. } => cause::MSG_TYPE_INCOMPATIBLE,
            ControlError::UnexpectedMessage { .. } => cause::MSG_TYPE_INCOMPATIBLE,
            ControlError::UnsupportedProtocol { .. } => cause::MSG_TYPE_NOT_IMPLEMENTED,
            ControlError::UnsupportedMessage { .. } => cause::MSG_TYPE_NOT_IMPLEMENTED,
            ControlError::SignalingTimerExpired { .. } => cause::ABNORMAL_TIMER_EXPIRED,
            ControlError::SessionTimeout { .. } => cause::ABNORMAL_TIMER_EXPIRED,
            ControlError::SessionError { .. } => cause::ABNORMAL_UNSPECIFIED,
        }
    }

    pub fn transaction_id(&self) -> Option<TransactionId> {
        match self {
            ControlError::ChannelReadTimeout { transaction_id }
            | ControlError::UnexpectedPrimitive { transaction_id }
            | ControlError::UnexpectedMessage { transaction_id }
            | ControlError::UnsupportedProtocol { transaction_id, .. }
            | ControlError::UnsupportedMessage { transaction_id, .. }
            | ControlError::SignalingTimerExpired { transaction_id }
            | ControlError::SessionTimeout { transaction_id }
            | ControlError::SessionError { transaction_id } => *transaction_id,
        }
    }

    /// Session-control failures should have been handled below this layer;
    /// when the transaction ID is missing they leave a stray registry entry.
    pub fn is_session_leak(&self) -> bool {
        matches!(
            self,
            ControlError::SessionTimeout { .. } | ControlError::SessionError { .. }
        )
    }
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::ChannelReadTimeout { .. } => write!(f, "channel read timeout"),
            ControlError::UnexpectedPrimitive { .. } => write!(f, "unexpected primitive"),
            ControlError::UnexpectedMessage { .. } => write!(f, "unexpected message"),
            ControlError::UnsupportedProtocol { pd, .. } => {
                write!(f, "unsupported protocol 0x{:02x}", pd)
            }
            ControlError::UnsupportedMessage { pd, mti, .. } => {
                write!(f, "unsupported message pd=0x{:02x} mti=0x{:02x}", pd, mti)
            }
            ControlError::SignalingTimerExpired { .. } => write!(f, "signaling timer expired"),
            ControlError::SessionTimeout { .. } => write!(f, "session-control timeout"),
            ControlError::SessionError { .. } => write!(f, "session-control error"),
        }
    }
}

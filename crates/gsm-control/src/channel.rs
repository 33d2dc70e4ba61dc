use core::fmt;

use gsm_core::L3Message;
use gsm_pcuif::{PcuSapi, RlcMacFrame};

use crate::errors::ControlError;

/// Identity of one logical channel on the air interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelId {
    pub arfcn: u16,
    pub timeslot: u8,
    /// Training sequence code
    pub tsc: u8,
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ARFCN{} TS{} TSC{}", self.arfcn, self.timeslot, self.tsc)
    }
}

/// The concrete variant behind a dedicated control channel. Assignment
/// completion is only meaningful on a traffic-capable channel; the router
/// matches on this tag instead of downcasting the channel reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DcchKind {
    /// Standalone dedicated control channel, signaling only
    Sdcch,
    /// Traffic channel with its associated FACCH, voice capable
    TchFacch,
}

/// A dedicated control channel as owned by the radio subsystem. One
/// dispatcher worker holds the channel for its lifetime; the core only
/// drives it through this seam.
pub trait DedicatedChannel: Send {
    fn id(&self) -> ChannelId;
    fn kind(&self) -> DcchKind;

    /// Block until the channel signals an establish event
    fn wait_for_establish(&self);

    /// Read the next signaling message. Blocks; may time out, which is a
    /// recoverable failure handled at the iteration boundary.
    fn read_message(&self) -> Result<L3Message, ControlError>;

    /// Transmit a channel release carrying the given cause code
    fn send_release(&self, cause: u8);
}

/// Radio-side events feeding the outbound bridge pump
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdchEvent {
    /// An uplink RLC/MAC frame received on the packet channel
    Frame(RlcMacFrame),
    /// A downlink transmit opportunity on `ts` at frame `frame`
    ReadyToSend { ts: u8, frame: u32 },
    /// An access burst detected on the packet channel
    RandomAccess { ra: u16, qta: i16, frame: u32 },
}

/// A packet data channel. The outbound pump consumes its events, the
/// inbound pump feeds frames back; both pumps share one channel object.
pub trait PacketChannel: Send + Sync {
    fn id(&self) -> ChannelId;

    /// Block for the next radio-side event. Returns None when the radio
    /// side has torn the channel down, ending the outbound pump.
    fn recv_event(&self) -> Option<PdchEvent>;

    /// Enqueue a downlink frame for transmission on the packet channel
    fn send_frame(&self, frame: RlcMacFrame);
}

/// One broadcast or paging downlink queue (AGCH/PCH/BCCH)
pub trait BroadcastQueue: Send + Sync {
    /// Current queue load, compared against the configured maximum
    fn load(&self) -> usize;

    /// Wrap the payload as a message unit and queue it for transmission
    fn enqueue(&self, payload: Vec<u8>);
}

/// Maps a broadcast/paging SAPI to the matching downlink queue
pub trait BroadcastSelector: Send + Sync {
    fn select(&self, sapi: PcuSapi) -> Option<&dyn BroadcastQueue>;
}

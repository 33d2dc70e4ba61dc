//! Control-channel dispatch and PCU bridging
//!
//! The two persistent worker bodies of the control core live here:
//! - `DcchDispatcher::run`: the dedicated-control-channel loop, waits for
//!   an establish event, reads the first message, routes it to a transaction
//!   handler, and converts every failure into a standards-mandated channel
//!   release plus best-effort transaction cleanup.
//! - `PdchBridge::run_outbound` / `run_inbound`: the two pumps bridging a
//!   packet data channel to the external PCU over a datagram transport.

pub mod channel;
pub mod dcch;
pub mod errors;
pub mod pcu_sock;
pub mod pdch;
pub mod queues;
pub mod registry;
pub mod router;

pub use channel::{BroadcastQueue, BroadcastSelector, ChannelId, DcchKind, DedicatedChannel, PacketChannel, PdchEvent};
pub use dcch::DcchDispatcher;
pub use errors::{ControlError, cause};
pub use pcu_sock::PcuSocket;
pub use pdch::PdchBridge;
pub use queues::{CommonQueues, QueuePacketChannel, RadioSideHandle, VecBroadcastQueue, queue_packet_channel};
pub use registry::{TransactionRegistry, TransactionTable};
pub use router::{DcchHandlers, dispatch};

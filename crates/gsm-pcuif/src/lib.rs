//! PCU interface: primitive records and RLC/MAC frames
//!
//! Pure data transformation between the typed primitives exchanged with the
//! external packet control unit and their fixed-layout byte records. No I/O
//! lives here; the bridge in gsm-control owns the datagram endpoint.

pub mod codec;
pub mod primitives;
pub mod rlcmac;
pub mod wire;

pub use codec::PcuifCodec;
pub use primitives::{DataInd, DataReq, InfoInd, PcuPrimitive, PcuSapi, RachInd, RtsInd, TimeInd};
pub use rlcmac::{RLCMAC_FRAME_BITS, RlcMacFrame, RlcMacPayloadType};
pub use wire::PcuifErr;

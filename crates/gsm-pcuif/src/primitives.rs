use core::fmt;

use crate::wire::PcuifErr;

/// Message discriminators, byte 0 of every record
pub const PCUIF_MSG_DATA_REQ: u8 = 0x00;
pub const PCUIF_MSG_DATA_IND: u8 = 0x02;
pub const PCUIF_MSG_RTS_IND: u8 = 0x10;
pub const PCUIF_MSG_RACH_IND: u8 = 0x22;
pub const PCUIF_MSG_INFO_IND: u8 = 0x32;
pub const PCUIF_MSG_TIME_IND: u8 = 0x52;

/// Fixed capacity of the payload bytes inside a data record. A payload
/// beyond this length is a protocol error, never a silent truncation.
pub const PCUIF_DATA_CAP: usize = 162;

/// Service access point identifier, tags the payload class of a primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PcuSapi {
    Rach,
    Agch,
    Pch,
    Bcch,
    Pdtch,
    Prach,
    Ptcch,
}

impl PcuSapi {
    pub fn from_raw(value: u8) -> Result<PcuSapi, PcuifErr> {
        match value {
            0x01 => Ok(PcuSapi::Rach),
            0x02 => Ok(PcuSapi::Agch),
            0x03 => Ok(PcuSapi::Pch),
            0x04 => Ok(PcuSapi::Bcch),
            0x05 => Ok(PcuSapi::Pdtch),
            0x06 => Ok(PcuSapi::Prach),
            0x07 => Ok(PcuSapi::Ptcch),
            other => Err(PcuifErr::InvalidValue {
                field: "sapi",
                value: other as u64,
            }),
        }
    }

    pub fn into_raw(self) -> u8 {
        match self {
            PcuSapi::Rach => 0x01,
            PcuSapi::Agch => 0x02,
            PcuSapi::Pch => 0x03,
            PcuSapi::Bcch => 0x04,
            PcuSapi::Pdtch => 0x05,
            PcuSapi::Prach => 0x06,
            PcuSapi::Ptcch => 0x07,
        }
    }

    /// Broadcast/paging traffic, routed to the common downlink queues
    pub fn is_broadcast(self) -> bool {
        matches!(self, PcuSapi::Agch | PcuSapi::Pch | PcuSapi::Bcch)
    }

    /// Packet data / control-ack traffic, routed to the packet channel
    pub fn is_packet_data(self) -> bool {
        matches!(self, PcuSapi::Pdtch | PcuSapi::Ptcch)
    }
}

/// Connection indication: cell identity and protocol timers, sent exactly
/// once when the bridge comes up so the PCU knows its operating parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoInd {
    pub mcc: u16,
    pub mnc: u16,
    pub lac: u16,
    pub cell_id: u16,
    pub bsic: u8,
    pub arfcn: u16,
    pub t3169: u8,
    pub t3191: u8,
    pub t3193_ms: u16,
    /// Initial coding scheme; only on the wire in the extended layout
    pub initial_cs: u8,
}

/// Random access burst forwarded to the PCU for uplink assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RachInd {
    pub ra: u16,
    /// Quarter-bit timing advance of the access burst
    pub qta: i16,
    pub frame: u32,
}

/// Ready-to-send: announces a transmit opportunity on a timeslot/block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtsInd {
    pub sapi: PcuSapi,
    pub ts: u8,
    pub frame: u32,
    pub block_nr: u8,
}

/// Uplink data block towards the PCU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataInd {
    pub sapi: PcuSapi,
    pub ts: u8,
    pub frame: u32,
    pub block_nr: u8,
    pub arfcn: u16,
    pub data: Vec<u8>,
}

/// Downlink data block from the PCU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataReq {
    pub sapi: PcuSapi,
    pub ts: u8,
    pub frame: u32,
    pub block_nr: u8,
    pub arfcn: u16,
    pub data: Vec<u8>,
}

/// Current frame number, keeps the PCU synchronized to the radio clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInd {
    pub frame: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PcuPrimitive {
    InfoInd(InfoInd),
    RachInd(RachInd),
    RtsInd(RtsInd),
    DataInd(DataInd),
    DataReq(DataReq),
    TimeInd(TimeInd),
}

impl PcuPrimitive {
    pub fn msg_type(&self) -> u8 {
        match self {
            PcuPrimitive::InfoInd(_) => PCUIF_MSG_INFO_IND,
            PcuPrimitive::RachInd(_) => PCUIF_MSG_RACH_IND,
            PcuPrimitive::RtsInd(_) => PCUIF_MSG_RTS_IND,
            PcuPrimitive::DataInd(_) => PCUIF_MSG_DATA_IND,
            PcuPrimitive::DataReq(_) => PCUIF_MSG_DATA_REQ,
            PcuPrimitive::TimeInd(_) => PCUIF_MSG_TIME_IND,
        }
    }
}

impl fmt::Display for PcuPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PcuPrimitive::InfoInd(p) => write!(f, "InfoInd mcc={} mnc={} lac={} ci={}", p.mcc, p.mnc, p.lac, p.cell_id),
            PcuPrimitive::RachInd(p) => write!(f, "RachInd ra={} qta={} fn={}", p.ra, p.qta, p.frame),
            PcuPrimitive::RtsInd(p) => write!(f, "RtsInd {:?} ts={} fn={} bn={}", p.sapi, p.ts, p.frame, p.block_nr),
            PcuPrimitive::DataInd(p) => write!(f, "DataInd {:?} ts={} fn={} bn={} ({} bytes)", p.sapi, p.ts, p.frame, p.block_nr, p.data.len()),
            PcuPrimitive::DataReq(p) => write!(f, "DataReq {:?} ts={} fn={} bn={} ({} bytes)", p.sapi, p.ts, p.frame, p.block_nr, p.data.len()),
            PcuPrimitive::TimeInd(p) => write!(f, "TimeInd fn={}", p.frame),
        }
    }
}

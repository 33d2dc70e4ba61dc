use core::fmt;

/// Protocol discriminator values from GSM 04.08 clause 10.2 that this core
/// dispatches on. Everything else is routed nowhere and fails dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum L3Pd {
    /// Mobility Management (0x05)
    MobilityManagement,
    /// Radio Resource management (0x06)
    RadioResource,
}

impl L3Pd {
    pub fn from_raw(pd: u8) -> Option<L3Pd> {
        match pd {
            0x05 => Some(L3Pd::MobilityManagement),
            0x06 => Some(L3Pd::RadioResource),
            _ => None,
        }
    }

    pub fn into_raw(self) -> u8 {
        match self {
            L3Pd::MobilityManagement => 0x05,
            L3Pd::RadioResource => 0x06,
        }
    }
}

/// Mobility Management message types handled by the dispatcher
/// (GSM 04.08 table 10.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmMti {
    ImsiDetachIndication,
    LocationUpdatingRequest,
    CmServiceRequest,
}

impl MmMti {
    pub fn from_raw(mti: u8) -> Option<MmMti> {
        match mti {
            0x01 => Some(MmMti::ImsiDetachIndication),
            0x08 => Some(MmMti::LocationUpdatingRequest),
            0x24 => Some(MmMti::CmServiceRequest),
            _ => None,
        }
    }

    pub fn into_raw(self) -> u8 {
        match self {
            MmMti::ImsiDetachIndication => 0x01,
            MmMti::LocationUpdatingRequest => 0x08,
            MmMti::CmServiceRequest => 0x24,
        }
    }
}

/// Radio Resource message types handled by the dispatcher
/// (GSM 04.08 table 10.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RrMti {
    PagingResponse,
    AssignmentComplete,
}

impl RrMti {
    pub fn from_raw(mti: u8) -> Option<RrMti> {
        match mti {
            0x27 => Some(RrMti::PagingResponse),
            0x29 => Some(RrMti::AssignmentComplete),
            _ => None,
        }
    }

    pub fn into_raw(self) -> u8 {
        match self {
            RrMti::PagingResponse => 0x27,
            RrMti::AssignmentComplete => 0x29,
        }
    }
}

/// A decoded L3 signaling message as produced by the external decoder.
/// The dispatcher only ever inspects the two classifying fields; the body
/// stays opaque and is handed to the selected handler untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L3Message {
    /// Protocol discriminator, raw 4-bit value
    pub pd: u8,
    /// Message type indicator, raw value
    pub mti: u8,
    /// Remaining message content, owned by the handler side
    pub body: Vec<u8>,
}

impl L3Message {
    pub fn new(pd: u8, mti: u8, body: Vec<u8>) -> L3Message {
        L3Message { pd, mti, body }
    }
}

impl fmt::Display for L3Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L3 pd=0x{:02x} mti=0x{:02x} ({} body bytes)",
            self.pd,
            self.mti,
            self.body.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pd_round_trip() {
        for pd in [L3Pd::MobilityManagement, L3Pd::RadioResource] {
            assert_eq!(L3Pd::from_raw(pd.into_raw()), Some(pd));
        }
        assert_eq!(L3Pd::from_raw(0x03), None); // call control not dispatched here
        assert_eq!(L3Pd::from_raw(0xff), None);
    }

    #[test]
    fn test_mti_round_trip() {
        for mti in [
            MmMti::ImsiDetachIndication,
            MmMti::LocationUpdatingRequest,
            MmMti::CmServiceRequest,
        ] {
            assert_eq!(MmMti::from_raw(mti.into_raw()), Some(mti));
        }
        for mti in [RrMti::PagingResponse, RrMti::AssignmentComplete] {
            assert_eq!(RrMti::from_raw(mti.into_raw()), Some(mti));
        }
        assert_eq!(MmMti::from_raw(0x29), None);
        assert_eq!(RrMti::from_raw(0x08), None);
    }
}

use std::sync::Arc;

use gsm_core::PcuifVersion;

#[derive(Debug, Clone)]
pub struct CfgNetInfo {
    /// Mobile country code, 3 decimal digits
    pub mcc: u16,
    /// Mobile network code, 2-3 decimal digits
    pub mnc: u16,
}

#[derive(Debug, Clone)]
pub struct CfgCellInfo {
    /// Location area code
    pub lac: u16,
    /// Cell identity within the location area
    pub cell_id: u16,
    /// Base station identity code (NCC << 3 | BCC), 6 bits
    pub bsic: u8,
    /// Absolute radio frequency channel number of the BCCH carrier
    pub arfcn: u16,
}

impl Default for CfgCellInfo {
    fn default() -> Self {
        Self {
            lac: 1000,
            cell_id: 10,
            bsic: 2,
            arfcn: 871,
        }
    }
}

/// Packet-domain protocol timers handed to the PCU in the startup
/// info indication. T3169/T3191 in seconds, T3193 in milliseconds.
#[derive(Debug, Clone)]
pub struct CfgPcuTimers {
    pub t3169: u8,
    pub t3191: u8,
    pub t3193_ms: u16,
}

impl Default for CfgPcuTimers {
    fn default() -> Self {
        Self {
            t3169: 5,
            t3191: 5,
            t3193_ms: 1600,
        }
    }
}

/// PCU bridge configuration. The wire-format version also selects the
/// default datagram ports; both sides must be configured identically.
#[derive(Debug, Clone)]
pub struct CfgPcu {
    pub version: PcuifVersion,
    /// Local datagram bind address, e.g. "127.0.0.1:5934"
    pub local_addr: String,
    /// Remote PCU datagram address, e.g. "127.0.0.1:5070"
    pub remote_addr: String,
    /// Bounded timeout for the inbound transport read
    pub read_timeout_ms: u64,
    /// Maximum broadcast/paging queue load before data requests are dropped
    pub max_bcast_queue: usize,
    pub timers: CfgPcuTimers,
}

impl CfgPcu {
    /// Per-version defaults. The historical revisions moved the port pair
    /// when the record layout changed, so the defaults follow the version.
    pub fn default_for(version: PcuifVersion) -> Self {
        let (local_port, remote_port) = match version {
            PcuifVersion::V5 => (5934, 5070),
            PcuifVersion::V8 => (5944, 5080),
        };
        Self {
            version,
            local_addr: format!("127.0.0.1:{}", local_port),
            remote_addr: format!("127.0.0.1:{}", remote_port),
            read_timeout_ms: 3000,
            max_bcast_queue: 8,
            timers: CfgPcuTimers::default(),
        }
    }
}

impl Default for CfgPcu {
    fn default() -> Self {
        Self::default_for(PcuifVersion::V5)
    }
}

#[derive(Debug, Clone)]
pub struct StackConfig {
    pub debug_log: Option<String>,

    /// Network info is REQUIRED - no default provided
    pub net: CfgNetInfo,

    pub cell: CfgCellInfo,

    pub pcu: CfgPcu,
}

impl StackConfig {
    pub fn new(mcc: u16, mnc: u16) -> Self {
        StackConfig {
            debug_log: None,
            net: CfgNetInfo { mcc, mnc },
            cell: CfgCellInfo::default(),
            pcu: CfgPcu::default(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.net.mcc > 999 {
            return Err(format!("mcc out of range: {}", self.net.mcc));
        }
        if self.net.mnc > 999 {
            return Err(format!("mnc out of range: {}", self.net.mnc));
        }
        if self.cell.bsic > 63 {
            return Err(format!("bsic out of range: {}", self.cell.bsic));
        }
        if self.cell.arfcn > 1023 {
            return Err(format!("arfcn out of range: {}", self.cell.arfcn));
        }
        if self.pcu.max_bcast_queue == 0 {
            return Err("pcu.max_bcast_queue must be at least 1".to_string());
        }
        if self.pcu.read_timeout_ms == 0 {
            return Err("pcu.read_timeout_ms must be nonzero".to_string());
        }
        Ok(())
    }
}

/// Cheaply clonable handle to the immutable stack configuration. Handed to
/// every worker at construction time; there is no ambient global lookup.
#[derive(Clone)]
pub struct SharedConfig {
    cfg: Arc<StackConfig>,
}

impl SharedConfig {
    pub fn new(mcc: u16, mnc: u16) -> Self {
        Self::from_config(StackConfig::new(mcc, mnc))
    }

    pub fn from_config(cfg: StackConfig) -> Self {
        // Check config for validity before returning the SharedConfig object
        match cfg.validate() {
            Ok(_) => {}
            Err(e) => panic!("Invalid stack configuration: {}", e),
        }

        Self { cfg: Arc::new(cfg) }
    }

    /// Access immutable config.
    pub fn config(&self) -> Arc<StackConfig> {
        Arc::clone(&self.cfg)
    }
}

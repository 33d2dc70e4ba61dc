use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use toml::Value;

use gsm_core::PcuifVersion;

use super::stack_config::{CfgCellInfo, CfgNetInfo, CfgPcu, SharedConfig, StackConfig};

/// Build `SharedConfig` from a TOML configuration file
pub fn from_toml_str(toml_str: &str) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    // Various sanity checks
    let expected_config_version = "0.2";
    if !root.config_version.eq(expected_config_version) {
        return Err(format!(
            "Unrecognized config_version: {}, expect {}",
            root.config_version, expected_config_version
        )
        .into());
    }
    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }
    if !root.net_info.extra.is_empty() {
        return Err(format!("Unrecognized fields in net_info: {:?}", sorted_keys(&root.net_info.extra)).into());
    }
    if let Some(ref ci) = root.cell_info {
        if !ci.extra.is_empty() {
            return Err(format!("Unrecognized fields in cell_info: {:?}", sorted_keys(&ci.extra)).into());
        }
    }
    if let Some(ref pcu) = root.pcu {
        if !pcu.extra.is_empty() {
            return Err(format!("Unrecognized fields in pcu: {:?}", sorted_keys(&pcu.extra)).into());
        }
    }

    // Build config from required and optional values
    let mut cfg = StackConfig {
        debug_log: root.debug_log,
        net: CfgNetInfo {
            mcc: root.net_info.mcc,
            mnc: root.net_info.mnc,
        },
        cell: CfgCellInfo::default(),
        pcu: CfgPcu::default(),
    };

    if let Some(ci) = root.cell_info {
        apply_cell_info_patch(&mut cfg.cell, ci);
    }

    if let Some(pcu) = root.pcu {
        cfg.pcu = apply_pcu_patch(pcu);
    }

    if let Err(e) = cfg.validate() {
        return Err(format!("Invalid configuration: {}", e).into());
    }

    Ok(SharedConfig::from_config(cfg))
}

/// Build `SharedConfig` from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader.read_to_string(&mut contents)?;
    from_toml_str(&contents)
}

/// Build `SharedConfig` from a file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    let r = BufReader::new(f);
    let cfg = from_reader(r)?;
    Ok(cfg)
}

fn apply_cell_info_patch(dst: &mut CfgCellInfo, ci: CellInfoDto) {
    dst.lac = ci.lac;
    dst.cell_id = ci.cell_id;
    dst.arfcn = ci.arfcn;

    if let Some(v) = ci.bsic {
        dst.bsic = v;
    }
}

fn apply_pcu_patch(pcu: PcuDto) -> CfgPcu {
    // Version selects the layout and the port defaults; explicit addresses
    // and tunables override the defaults.
    let mut dst = CfgPcu::default_for(pcu.version);

    if let Some(v) = pcu.local_addr {
        dst.local_addr = v;
    }
    if let Some(v) = pcu.remote_addr {
        dst.remote_addr = v;
    }
    if let Some(v) = pcu.read_timeout_ms {
        dst.read_timeout_ms = v;
    }
    if let Some(v) = pcu.max_bcast_queue {
        dst.max_bcast_queue = v;
    }
    if let Some(v) = pcu.t3169 {
        dst.timers.t3169 = v;
    }
    if let Some(v) = pcu.t3191 {
        dst.timers.t3191 = v;
    }
    if let Some(v) = pcu.t3193_ms {
        dst.timers.t3193_ms = v;
    }

    dst
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&str> {
    let mut v: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v
}

/// ----------------------- DTOs for input shape -----------------------

#[derive(Deserialize)]
struct TomlConfigRoot {
    config_version: String,
    debug_log: Option<String>,

    #[serde(default)]
    net_info: NetInfoDto,

    #[serde(default)]
    cell_info: Option<CellInfoDto>,

    #[serde(default)]
    pcu: Option<PcuDto>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Default, Deserialize)]
struct NetInfoDto {
    pub mcc: u16,
    pub mnc: u16,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Default, Deserialize)]
struct CellInfoDto {
    pub lac: u16,
    pub cell_id: u16,
    pub arfcn: u16,

    pub bsic: Option<u8>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct PcuDto {
    pub version: PcuifVersion,

    pub local_addr: Option<String>,
    pub remote_addr: Option<String>,
    pub read_timeout_ms: Option<u64>,
    pub max_bcast_queue: Option<usize>,

    pub t3169: Option<u8>,
    pub t3191: Option<u8>,
    pub t3193_ms: Option<u16>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
config_version = "0.2"

[net_info]
mcc = 204
mnc = 49

[cell_info]
lac = 1000
cell_id = 10
arfcn = 871
bsic = 63

[pcu]
version = "V5"
max_bcast_queue = 4
"#;

    #[test]
    fn test_parse_sample() {
        let cfg = from_toml_str(SAMPLE).expect("Failed parsing sample config");
        let cfg = cfg.config();
        assert_eq!(cfg.net.mcc, 204);
        assert_eq!(cfg.cell.bsic, 63);
        assert_eq!(cfg.pcu.version, PcuifVersion::V5);
        assert_eq!(cfg.pcu.max_bcast_queue, 4);
        // Port defaults follow the version
        assert_eq!(cfg.pcu.local_addr, "127.0.0.1:5934");
        assert_eq!(cfg.pcu.remote_addr, "127.0.0.1:5070");
    }

    #[test]
    fn test_version_selects_ports() {
        let toml = SAMPLE.replace("version = \"V5\"", "version = \"V8\"");
        let cfg = from_toml_str(&toml).unwrap();
        let cfg = cfg.config();
        assert_eq!(cfg.pcu.version, PcuifVersion::V8);
        assert_eq!(cfg.pcu.local_addr, "127.0.0.1:5944");
        assert_eq!(cfg.pcu.remote_addr, "127.0.0.1:5080");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let toml = format!("{}\nbogus_key = 1\n", SAMPLE);
        assert!(from_toml_str(&toml).is_err());
    }

    #[test]
    fn test_wrong_config_version_rejected() {
        let toml = SAMPLE.replace("\"0.2\"", "\"0.1\"");
        assert!(from_toml_str(&toml).is_err());
    }
}

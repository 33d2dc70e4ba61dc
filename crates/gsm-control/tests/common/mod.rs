pub mod mock_dcch;
pub mod recording;

pub use mock_dcch::MockDcch;
pub use recording::RecordingHandlers;

use gsm_config::{SharedConfig, StackConfig};
use gsm_core::{L3Message, PcuifVersion};

/// Creates a default config for testing. It can still be modified as needed
/// before wrapping it in a SharedConfig.
pub fn default_test_config() -> StackConfig {
    let mut config = StackConfig::new(262, 42);
    config.pcu.version = PcuifVersion::V5;
    config.pcu.local_addr = "127.0.0.1:0".to_string();
    config.pcu.read_timeout_ms = 100;
    config
}

/// Test config wired to talk to a PCU emulator at `remote`.
pub fn shared_test_config(remote: &str) -> SharedConfig {
    let mut config = default_test_config();
    config.pcu.remote_addr = remote.to_string();
    SharedConfig::from_config(config)
}

pub fn l3(pd: u8, mti: u8) -> L3Message {
    L3Message {
        pd,
        mti,
        body: vec![],
    }
}

use clap::Parser;

use std::net::UdpSocket;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use rand::Rng;

use gsm_config::{SharedConfig, toml_config};
use gsm_control::{
    ChannelId, CommonQueues, PdchBridge, PdchEvent, QueuePacketChannel, RadioSideHandle,
    queue_packet_channel,
};
use gsm_core::{FrameClock, debug};
use gsm_pcuif::{DataReq, PcuPrimitive, PcuSapi, PcuifCodec, RLCMAC_FRAME_BITS, RlcMacFrame};

/// One TDMA block is four frames of ~4.615 ms each
const BLOCK_PERIOD: Duration = Duration::from_micros(4 * 4615);

/// Load configuration file
fn load_config_from_toml(cfg_path: &str) -> SharedConfig {
    match toml_config::from_file(cfg_path) {
        Ok(c) => c,
        Err(e) => {
            println!("Failed to load configuration from {}: {}", cfg_path, e);
            std::process::exit(1);
        }
    }
}

/// Emulated PCU endpoint: decodes whatever the bridge sends and answers
/// every transmit opportunity with a random downlink block. Occasionally
/// queues a paging request to exercise the broadcast path.
fn run_pcu_emulator(cfg: SharedConfig, bridge_addr: std::net::SocketAddr, running: Arc<AtomicBool>) {
    let cfg = cfg.config();
    let codec = PcuifCodec::new(cfg.pcu.version);
    let socket = match UdpSocket::bind(cfg.pcu.remote_addr.as_str()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("PCU emulator failed to bind {}: {}", cfg.pcu.remote_addr, e);
            return;
        }
    };
    if let Err(e) = socket.set_read_timeout(Some(Duration::from_millis(200))) {
        tracing::error!("PCU emulator socket setup failed: {}", e);
        return;
    }

    let mut rng = rand::rng();
    let mut buf = [0u8; 1500];
    while running.load(Ordering::Relaxed) {
        let len = match socket.recv_from(&mut buf) {
            Ok((len, _)) => len,
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock || e.kind() == std::io::ErrorKind::TimedOut => {
                continue;
            }
            Err(e) => {
                tracing::error!("PCU emulator recv failed: {}", e);
                return;
            }
        };

        let prim = match codec.decode(&buf[..len]) {
            Ok(Some(prim)) => prim,
            Ok(None) | Err(_) => continue,
        };

        let reply = match &prim {
            PcuPrimitive::InfoInd(info) => {
                tracing::info!("PCU: cell {}/{} lac {} ci {} up", info.mcc, info.mnc, info.lac, info.cell_id);
                None
            }
            PcuPrimitive::RtsInd(rts) => {
                // Fill the opportunity with a random data block
                let mut data = vec![0u8; RLCMAC_FRAME_BITS / 8];
                rng.fill(&mut data[..]);
                data[0] &= 0x3f; // tag as RLC data
                Some(DataReq {
                    sapi: rts.sapi,
                    ts: rts.ts,
                    frame: rts.frame,
                    block_nr: rts.block_nr,
                    arfcn: cfg.cell.arfcn,
                    data,
                })
            }
            PcuPrimitive::RachInd(rach) => {
                tracing::info!("PCU: access burst ra=0x{:02x} fn={}", rach.ra, rach.frame);
                // Answer with an immediate-assignment-shaped page
                Some(DataReq {
                    sapi: PcuSapi::Agch,
                    ts: 0,
                    frame: rach.frame,
                    block_nr: 0,
                    arfcn: cfg.cell.arfcn,
                    data: vec![0x2d; 23],
                })
            }
            PcuPrimitive::DataInd(ind) => {
                tracing::debug!("PCU: uplink block fn={} bn={} ({} bytes)", ind.frame, ind.block_nr, ind.data.len());
                None
            }
            _ => None,
        };

        if let Some(req) = reply {
            match codec.encode(&PcuPrimitive::DataReq(req)) {
                Ok(record) => {
                    if let Err(e) = socket.send_to(&record, bridge_addr) {
                        tracing::warn!("PCU emulator send failed: {}", e);
                    }
                }
                Err(e) => tracing::warn!("PCU emulator encode failed: {:?}", e),
            }
        }
    }
}

/// Emulated radio side: advances the frame clock, announces transmit
/// opportunities, raises the occasional access burst and uplink block, and
/// drains whatever comes back down.
fn run_radio_emulator(
    radio: RadioSideHandle,
    queues: Arc<CommonQueues>,
    clock: FrameClock,
    ts: u8,
    running: Arc<AtomicBool>,
) {
    let mut rng = rand::rng();
    while running.load(Ordering::Relaxed) {
        thread::sleep(BLOCK_PERIOD);
        clock.advance(4);
        let frame = clock.now();

        if !radio.push_event(PdchEvent::ReadyToSend { ts, frame }) {
            break;
        }

        if rng.random_bool(0.05) {
            let event = PdchEvent::RandomAccess {
                ra: rng.random::<u8>() as u16,
                qta: rng.random_range(-8..8),
                frame,
            };
            if !radio.push_event(event) {
                break;
            }
        }

        if rng.random_bool(0.25) {
            let mut bytes = vec![0u8; RLCMAC_FRAME_BITS / 8];
            rng.fill(&mut bytes[..]);
            bytes[0] &= 0x3f;
            match RlcMacFrame::pdch_block(&bytes) {
                Ok(frame) => {
                    if !radio.push_event(PdchEvent::Frame(frame)) {
                        break;
                    }
                }
                Err(e) => tracing::warn!("bad uplink block: {:?}", e),
            }
        }

        while let Some(frame) = radio.try_recv_frame() {
            tracing::info!("radio: downlink {}", frame);
        }
        while let Some(page) = queues.agch.pop() {
            tracing::info!("radio: AGCH message ({} bytes)", page.len());
        }
        while let Some(page) = queues.pch.pop() {
            tracing::info!("radio: PCH message ({} bytes)", page.len());
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "PCU bridge loopback tester",
    long_about = "Runs the PDCH/PCU bridge against an in-process PCU emulator and an emulated radio, using the provided TOML configuration"
)]
struct Args {
    /// Config file (required)
    #[arg(help = "TOML config with network/cell/pcu parameters")]
    config: String,
}

fn main() {
    eprintln!("GSM PCU bridge loopback tester\n");

    let args = Args::parse();
    let cfg = load_config_from_toml(&args.config);
    let _log_guard = debug::setup_logging_default(cfg.config().debug_log.clone());

    // Set up Ctrl+C handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    }) {
        tracing::error!("failed to set Ctrl+C handler: {}", e);
        std::process::exit(1);
    }

    let clock = FrameClock::new(0);
    let pdch_ts = 6;
    let channel = ChannelId {
        arfcn: cfg.config().cell.arfcn,
        timeslot: pdch_ts,
        tsc: cfg.config().cell.bsic & 0x07,
    };
    let (pdch, radio) = queue_packet_channel(channel);
    let pdch: Arc<QueuePacketChannel> = Arc::new(pdch);
    let queues = Arc::new(CommonQueues::new());

    let bridge = match PdchBridge::new(cfg.clone(), clock.clone()) {
        Ok(bridge) => Arc::new(bridge),
        Err(e) => {
            tracing::error!("failed to bring up the bridge: {}", e);
            std::process::exit(1);
        }
    };
    let bridge_addr = match bridge.local_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("no local address: {}", e);
            std::process::exit(1);
        }
    };

    // PCU emulator first, so the info indication finds a listener
    let emulator = {
        let cfg = cfg.clone();
        let running = running.clone();
        thread::spawn(move || run_pcu_emulator(cfg, bridge_addr, running))
    };

    if let Err(e) = bridge.send_info_ind() {
        tracing::error!("info indication failed: {}", e);
        std::process::exit(1);
    }

    let inbound = {
        let bridge = bridge.clone();
        let pdch = pdch.clone();
        let queues = queues.clone();
        let running = running.clone();
        thread::spawn(move || bridge.run_inbound(&*pdch, &*queues, &running))
    };
    let outbound = {
        let bridge = bridge.clone();
        let pdch = pdch.clone();
        thread::spawn(move || bridge.run_outbound(&*pdch))
    };

    run_radio_emulator(radio, queues, clock, pdch_ts, running.clone());
    // Radio handle dropped above; the outbound pump sees the end of the
    // event stream, the inbound pump sees the running flag.
    running.store(false, Ordering::SeqCst);
    let _ = outbound.join();
    let _ = inbound.join();
    let _ = emulator.join();

    tracing::info!("shutdown complete");
}

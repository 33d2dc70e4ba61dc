use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use gsm_config::SharedConfig;
use gsm_core::{FrameClock, block_number};
use gsm_pcuif::{
    DataInd, DataReq, InfoInd, PcuPrimitive, PcuSapi, PcuifCodec, RachInd, RlcMacFrame, RtsInd,
    TimeInd,
};

use crate::channel::{BroadcastSelector, PacketChannel, PdchEvent};
use crate::pcu_sock::PcuSocket;

/// Bridges one packet data channel to the external PCU over a datagram
/// transport. Two pumps share the bridge: the outbound pump consumes radio
/// events and emits primitives, the inbound pump decodes primitives and
/// feeds frames and broadcast payloads back. Neither pump ever terminates
/// on a malformed or foreign record.
pub struct PdchBridge {
    config: SharedConfig,
    codec: PcuifCodec,
    clock: FrameClock,
    socket: PcuSocket,
}

impl PdchBridge {
    pub fn new(config: SharedConfig, clock: FrameClock) -> io::Result<PdchBridge> {
        let cfg = config.config();
        let socket = PcuSocket::new(
            cfg.pcu.local_addr.as_str(),
            cfg.pcu.remote_addr.as_str(),
            Duration::from_millis(cfg.pcu.read_timeout_ms),
        )?;
        let codec = PcuifCodec::new(cfg.pcu.version);
        tracing::info!(
            "bridge up, {} -> {}, wire version {:?}",
            socket.local_addr()?,
            socket.remote_addr(),
            codec.version()
        );
        Ok(PdchBridge { config, codec, clock, socket })
    }

    pub fn local_addr(&self) -> io::Result<std::net::SocketAddr> {
        self.socket.local_addr()
    }

    /// Announce cell identity and timers to the PCU. Sent exactly once,
    /// before the pumps start; the PCU ignores data until it has seen this.
    pub fn send_info_ind(&self) -> io::Result<()> {
        let cfg = self.config.config();
        let prim = PcuPrimitive::InfoInd(InfoInd {
            mcc: cfg.net.mcc,
            mnc: cfg.net.mnc,
            lac: cfg.cell.lac,
            cell_id: cfg.cell.cell_id,
            bsic: cfg.cell.bsic,
            arfcn: cfg.cell.arfcn,
            t3169: cfg.pcu.timers.t3169,
            t3191: cfg.pcu.timers.t3191,
            t3193_ms: cfg.pcu.timers.t3193_ms,
            initial_cs: 1,
        });
        let record = self
            .codec
            .encode(&prim)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("{:?}", e)))?;
        self.socket.send(&record)?;
        tracing::info!("sent {}", prim);
        Ok(())
    }

    /// Encode and transmit one primitive. Failures are logged and swallowed
    /// so a single bad record never stops a pump.
    fn send_prim(&self, prim: &PcuPrimitive) {
        let record = match self.codec.encode(prim) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("encode failed for {}: {:?}", prim, e);
                return;
            }
        };
        if let Err(e) = self.socket.send(&record) {
            tracing::warn!("send failed for {}: {}", prim, e);
        }
    }

    /// Outbound pump body: consume radio events until the channel is torn
    /// down. Intended as a thread body.
    pub fn run_outbound(&self, pdch: &dyn PacketChannel) {
        tracing::info!("outbound pump starting on {}", pdch.id());
        while let Some(event) = pdch.recv_event() {
            self.handle_event(pdch, event);
        }
        tracing::info!("outbound pump on {} done", pdch.id());
    }

    /// Translate one radio event into primitives towards the PCU.
    pub fn handle_event(&self, pdch: &dyn PacketChannel, event: PdchEvent) {
        match event {
            PdchEvent::Frame(frame) => {
                let fnr = self.clock.now();
                self.send_prim(&PcuPrimitive::DataInd(DataInd {
                    sapi: PcuSapi::Pdtch,
                    ts: pdch.id().timeslot,
                    frame: fnr,
                    block_nr: block_number(fnr),
                    arfcn: pdch.id().arfcn,
                    data: frame.into_bytes(),
                }));
            }
            PdchEvent::ReadyToSend { ts, frame } => {
                // The transmit opportunity first, then a clock update so the
                // PCU schedules against a fresh frame number.
                self.send_prim(&PcuPrimitive::RtsInd(RtsInd {
                    sapi: PcuSapi::Pdtch,
                    ts,
                    frame,
                    block_nr: block_number(frame),
                }));
                self.send_prim(&PcuPrimitive::TimeInd(TimeInd { frame: self.clock.now() }));
            }
            PdchEvent::RandomAccess { ra, qta, frame } => {
                self.send_prim(&PcuPrimitive::RachInd(RachInd { ra, qta, frame }));
            }
        }
    }

    /// Inbound pump body: receive datagrams until `running` goes false.
    /// Intended as a thread body.
    pub fn run_inbound(
        &self,
        pdch: &dyn PacketChannel,
        bcast: &dyn BroadcastSelector,
        running: &AtomicBool,
    ) {
        tracing::info!("inbound pump starting on {}", pdch.id());
        let mut buf = [0u8; 1500];
        while running.load(Ordering::Relaxed) {
            match self.socket.recv(&mut buf) {
                Ok(Some(len)) => self.handle_datagram(pdch, bcast, &buf[..len]),
                Ok(None) => {} // read timeout, check running again
                Err(e) => {
                    tracing::warn!("recv failed: {}", e);
                }
            }
        }
        tracing::info!("inbound pump on {} done", pdch.id());
    }

    /// Decode and act on one received datagram. Undecodable or foreign
    /// records are dropped without affecting the pump.
    pub fn handle_datagram(
        &self,
        pdch: &dyn PacketChannel,
        bcast: &dyn BroadcastSelector,
        buf: &[u8],
    ) {
        let prim = match self.codec.decode(buf) {
            Ok(Some(prim)) => prim,
            Ok(None) => {
                tracing::trace!("skipping foreign record ({} bytes)", buf.len());
                return;
            }
            Err(e) => {
                tracing::trace!("dropping bad record ({} bytes): {:?}", buf.len(), e);
                return;
            }
        };

        match prim {
            PcuPrimitive::DataReq(req) => self.handle_data_req(pdch, bcast, req),
            other => {
                tracing::trace!("ignoring {}", other);
            }
        }
    }

    fn handle_data_req(
        &self,
        pdch: &dyn PacketChannel,
        bcast: &dyn BroadcastSelector,
        req: DataReq,
    ) {
        if req.sapi.is_packet_data() {
            let len_bits = req.data.len() * 8;
            match RlcMacFrame::from_bytes(&req.data, len_bits) {
                Ok(frame) => {
                    tracing::debug!("downlink {} on ts {}", frame, req.ts);
                    pdch.send_frame(frame);
                }
                Err(e) => {
                    tracing::trace!("dropping downlink block: {:?}", e);
                }
            }
            return;
        }

        if req.sapi.is_broadcast() {
            let Some(queue) = bcast.select(req.sapi) else {
                tracing::trace!("no queue for {:?}", req.sapi);
                return;
            };
            let max = self.config.config().pcu.max_bcast_queue;
            let load = queue.load();
            if load > max {
                // Congestion: shed this request, the PCU will repeat pages.
                tracing::warn!("{:?} queue congested ({} > {}), dropping", req.sapi, load, max);
                return;
            }
            queue.enqueue(req.data);
            return;
        }

        tracing::trace!("ignoring data request on {:?}", req.sapi);
    }
}

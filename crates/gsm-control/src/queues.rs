use std::collections::VecDeque;
use std::sync::Mutex;

use crossbeam_channel::{Receiver, Sender, unbounded};
use gsm_pcuif::{PcuSapi, RlcMacFrame};

use crate::channel::{BroadcastQueue, BroadcastSelector, ChannelId, PacketChannel, PdchEvent};

/// Queue-backed packet channel, the core side of a radio/core pair. The
/// radio side holds the matching [`RadioSideHandle`]; dropping the handle
/// ends the event stream and with it the outbound pump.
pub struct QueuePacketChannel {
    id: ChannelId,
    events: Receiver<PdchEvent>,
    frames: Sender<RlcMacFrame>,
}

/// Radio side of a queue-backed packet channel
pub struct RadioSideHandle {
    events: Sender<PdchEvent>,
    frames: Receiver<RlcMacFrame>,
}

/// Builds a connected packet-channel pair over in-process queues.
pub fn queue_packet_channel(id: ChannelId) -> (QueuePacketChannel, RadioSideHandle) {
    let (events_tx, events_rx) = unbounded();
    let (frames_tx, frames_rx) = unbounded();
    (
        QueuePacketChannel {
            id,
            events: events_rx,
            frames: frames_tx,
        },
        RadioSideHandle {
            events: events_tx,
            frames: frames_rx,
        },
    )
}

impl PacketChannel for QueuePacketChannel {
    fn id(&self) -> ChannelId {
        self.id
    }

    fn recv_event(&self) -> Option<PdchEvent> {
        self.events.recv().ok()
    }

    fn send_frame(&self, frame: RlcMacFrame) {
        if self.frames.send(frame).is_err() {
            tracing::debug!("{}: radio side gone, frame dropped", self.id);
        }
    }
}

impl RadioSideHandle {
    /// Hand an event to the outbound pump. Returns false when the core side
    /// has been torn down.
    pub fn push_event(&self, event: PdchEvent) -> bool {
        self.events.send(event).is_ok()
    }

    /// Next downlink frame, if one is queued
    pub fn try_recv_frame(&self) -> Option<RlcMacFrame> {
        self.frames.try_recv().ok()
    }
}

/// In-memory broadcast/paging queue, drained by the radio side
#[derive(Default)]
pub struct VecBroadcastQueue {
    items: Mutex<VecDeque<Vec<u8>>>,
}

impl VecBroadcastQueue {
    pub fn new() -> VecBroadcastQueue {
        VecBroadcastQueue::default()
    }

    /// Dequeue the oldest payload, radio side only
    pub fn pop(&self) -> Option<Vec<u8>> {
        match self.items.lock() {
            Ok(mut items) => items.pop_front(),
            Err(_) => None,
        }
    }
}

impl BroadcastQueue for VecBroadcastQueue {
    fn load(&self) -> usize {
        match self.items.lock() {
            Ok(items) => items.len(),
            Err(_) => 0,
        }
    }

    fn enqueue(&self, payload: Vec<u8>) {
        if let Ok(mut items) = self.items.lock() {
            items.push_back(payload);
        }
    }
}

/// The three common downlink queues and their SAPI mapping
#[derive(Default)]
pub struct CommonQueues {
    pub agch: VecBroadcastQueue,
    pub pch: VecBroadcastQueue,
    pub bcch: VecBroadcastQueue,
}

impl CommonQueues {
    pub fn new() -> CommonQueues {
        CommonQueues::default()
    }
}

impl BroadcastSelector for CommonQueues {
    fn select(&self, sapi: PcuSapi) -> Option<&dyn BroadcastQueue> {
        match sapi {
            PcuSapi::Agch => Some(&self.agch),
            PcuSapi::Pch => Some(&self.pch),
            PcuSapi::Bcch => Some(&self.bcch),
            _ => None,
        }
    }
}

use core::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Frames per hyperframe: 2048 superframes of 26 x 51 frames.
/// The absolute frame number wraps back to 0 at this value.
pub const FRAMES_PER_HYPERFRAME: u32 = 2048 * 26 * 51;

/// Length of the packet-domain (PDCH) multiframe in frames.
pub const FRAMES_PER_52_MULTIFRAME: u32 = 52;

/// Data blocks per 52-multiframe. The trailing idle segment of the
/// multiframe does not start a new block.
pub const BLOCKS_PER_52_MULTIFRAME: u8 = 11;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct GsmTime {
    /// Absolute frame number, from 0 to FRAMES_PER_HYPERFRAME - 1
    pub frame: u32,
    /// Timeslot number, from 0 to 7
    pub slot: u8,
}

impl Default for GsmTime {
    fn default() -> GsmTime {
        GsmTime { frame: 0, slot: 0 }
    }
}

/// Difference between two frame numbers, handling hyperframe wrap-around.
pub fn frame_diff(a: u32, b: u32) -> i32 {
    let wrap = FRAMES_PER_HYPERFRAME as i64;
    let mut diff = a as i64 - b as i64;
    while diff < -wrap / 2 {
        diff += wrap;
    }
    while diff >= wrap / 2 {
        diff -= wrap;
    }
    diff as i32
}

/// Maps an absolute frame number to its data-block index within the
/// repeating 52-multiframe. Block boundaries sit at multiples of 4;
/// the count of boundaries at or below the multiframe offset gives the
/// block index, clamped so the result stays within the 11 data blocks.
/// Pure and deterministic; used identically on transmit and receive.
pub fn block_number(frame: u32) -> u8 {
    let r = frame % FRAMES_PER_52_MULTIFRAME;
    let mut bn: u8 = 0;
    let mut boundary: u32 = 4;
    while boundary <= 48 && boundary <= r {
        bn += 1;
        boundary += 4;
    }
    bn.min(BLOCKS_PER_52_MULTIFRAME - 1)
}

impl GsmTime {
    pub fn new(frame: u32, slot: u8) -> GsmTime {
        GsmTime {
            frame: frame % FRAMES_PER_HYPERFRAME,
            slot: slot % 8,
        }
    }

    pub fn is_valid(self) -> bool {
        self.frame < FRAMES_PER_HYPERFRAME && self.slot < 8
    }

    /// Add a number of frames, wrapping at the hyperframe boundary
    pub fn add_frames(self, num_frames: i32) -> GsmTime {
        let wrap = FRAMES_PER_HYPERFRAME as i64;
        let frame = (self.frame as i64 + num_frames as i64).rem_euclid(wrap);
        GsmTime {
            frame: frame as u32,
            slot: self.slot,
        }
    }

    /// Difference to another GsmTime in frames
    pub fn diff(self, b: Self) -> i32 {
        frame_diff(self.frame, b.frame)
    }

    /// Block index of this time within its 52-multiframe
    pub fn block(self) -> u8 {
        block_number(self.frame)
    }
}

impl fmt::Display for GsmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:7}/{}", self.frame, self.slot)
    }
}

impl fmt::Debug for GsmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:7}/{}", self.frame, self.slot)
    }
}

/// Process-wide monotonic frame counter. The radio owner advances it once
/// per frame period; everyone else holds a read-only clone. Cheap to clone,
/// safe to read from any worker.
#[derive(Clone, Default)]
pub struct FrameClock {
    inner: Arc<AtomicU32>,
}

impl FrameClock {
    pub fn new(start: u32) -> FrameClock {
        FrameClock {
            inner: Arc::new(AtomicU32::new(start % FRAMES_PER_HYPERFRAME)),
        }
    }

    /// Current absolute frame number
    pub fn now(&self) -> u32 {
        self.inner.load(Ordering::Relaxed)
    }

    /// Advance the counter by `num_frames`, wrapping at the hyperframe.
    /// Only the radio-side owner calls this.
    pub fn advance(&self, num_frames: u32) {
        let prev = self.inner.load(Ordering::Relaxed);
        let next = (prev + num_frames) % FRAMES_PER_HYPERFRAME;
        self.inner.store(next, Ordering::Relaxed);
    }
}

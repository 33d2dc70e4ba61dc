//! Core types for the GSM control core
//!
//! This crate provides the fundamental types shared across the stack:
//! - GsmTime and block-number arithmetic for the packet multiframe
//! - FrameClock, the process-wide monotonic frame counter
//! - The L3 signaling message model (protocol discriminator + message type)
//! - Logging bootstrap

pub mod debug;
pub mod gsm_time;
pub mod l3;

// Re-export commonly used items
pub use gsm_time::{FrameClock, GsmTime, block_number};
pub use l3::{L3Message, L3Pd, MmMti, RrMti};

/// Identifier of an active transaction in the shared transaction registry.
/// Transactions are created and interpreted by the signaling collaborators;
/// this core only ever removes entries on failure paths.
pub type TransactionId = u32;

use serde::Deserialize;

/// Wire-format revision of the PCU interface. The record layouts are not
/// self-describing beyond the leading discriminator, so the revision must be
/// selected explicitly by configuration and never sniffed from traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PcuifVersion {
    /// Classic layout: 176-byte records, 8-bit length fields
    V5,
    /// Extended layout: 180-byte records, 16-bit length fields,
    /// initial coding scheme carried in the info indication
    V8,
}

//! Single-slot, non-blocking frame transmitters.
//!
//! A telemetry encoder hands complete frames to a [`FrameSink`]. The sink
//! models a DMA-style serial transmitter: at most one frame is in flight at
//! a time, [`FrameSink::start_send`] returns without waiting for completion,
//! and [`FrameSink::is_ready`] answers whether a new send may be issued.
//! There is no queue — a frame offered while the slot is occupied is the
//! caller's to drop.
//!
//! This is the lowest layer of plotwire. Everything else builds on top of
//! the [`FrameSink`] trait provided here.

pub mod direct;
pub mod error;
pub mod spooled;
pub mod traits;

pub use direct::DirectSink;
pub use error::{Result, TransportError};
pub use spooled::SpooledSink;
pub use traits::FrameSink;

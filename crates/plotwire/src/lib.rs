//! Telemetry frame streaming for serial plotting tools.
//!
//! plotwire encodes numeric telemetry frames into the two wire formats
//! understood by host-side waveform viewers — the JustFloat binary format
//! and the FireWater text format — and hands them to a single-slot,
//! non-blocking transmitter that drops frames rather than block the caller.
//!
//! # Crate Structure
//!
//! - [`transport`] — The [`FrameSink`](transport::FrameSink) transmitter
//!   abstraction and its direct/background implementations
//! - [`frame`] — The two encoders and the
//!   [`TelemetrySender`](frame::TelemetrySender) transmission gate

/// Re-export transport types.
pub mod transport {
    pub use plotwire_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use plotwire_frame::*;
}

//! Telemetry frame encoding for serial plotting tools.
//!
//! Host-side plotting tools accept one of two wire formats:
//! - **JustFloat** — raw IEEE-754 single-precision channel values followed by
//!   a 4-byte end-of-frame sentinel. Compact, length-implicit.
//! - **FireWater** — a human-readable line, `prefix:v0,v1,...,vn\n`, with an
//!   optional caller-controlled prefix.
//!
//! Each format owns a fixed-capacity buffer that is rewritten in full on
//! every encode; no partial frame from a previous call is ever retransmitted.
//! [`TelemetrySender`] gates both encoders behind a transport readiness
//! check: a frame offered while a previous send is still in flight is
//! dropped, never queued or blocked upon.

pub mod config;
pub mod error;
pub mod firewater;
pub mod global;
pub mod justfloat;
pub mod sender;

pub use config::{
    FrameConfig, DEFAULT_MAX_CHANNELS, DEFAULT_MAX_PREFIX_LEN, FORMATTED_VALUE_WIDTH, FRAME_TAIL,
};
pub use error::{FrameError, Result};
pub use firewater::FireWaterEncoder;
pub use justfloat::JustFloatEncoder;
pub use sender::TelemetrySender;

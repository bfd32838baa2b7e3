//! Process-wide installed sender.
//!
//! Firmware-shaped hosts often want free functions rather than threading a
//! sender value through every call site. This module keeps one
//! [`TelemetrySender`] in process-wide state: [`install`] it exactly once,
//! after the transport is configured and before the first send. The backing
//! mutex serializes callers, so the per-format buffers cannot be raced from
//! different execution contexts.

use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

use plotwire_transport::FrameSink;

use crate::config::FrameConfig;
use crate::error::{FrameError, Result};
use crate::sender::TelemetrySender;

type InstalledSender = TelemetrySender<Box<dyn FrameSink + Send>>;

static SENDER: OnceLock<Mutex<InstalledSender>> = OnceLock::new();

/// Install the process-wide transmitter with default frame sizing.
///
/// Fails with [`FrameError::AlreadyInstalled`] on any call after the first.
pub fn install(sink: impl FrameSink + Send + 'static) -> Result<()> {
    install_with_config(sink, &FrameConfig::default())
}

/// Install the process-wide transmitter with explicit frame sizing.
pub fn install_with_config(
    sink: impl FrameSink + Send + 'static,
    config: &FrameConfig,
) -> Result<()> {
    let boxed: Box<dyn FrameSink + Send> = Box::new(sink);
    SENDER
        .set(Mutex::new(TelemetrySender::with_config(boxed, config)))
        .map_err(|_| FrameError::AlreadyInstalled)
}

/// Whether a transmitter has been installed.
pub fn is_installed() -> bool {
    SENDER.get().is_some()
}

/// Send a JustFloat frame through the installed transmitter.
pub fn send_just_float(channels: &[f32]) -> Result<()> {
    with_sender(|sender| sender.send_just_float(channels))
}

/// Send a free-form FireWater frame through the installed transmitter.
pub fn send_fire_water(args: fmt::Arguments<'_>) -> Result<()> {
    with_sender(|sender| sender.send_fire_water(args))
}

/// Send a structured FireWater frame through the installed transmitter.
pub fn send_channels(prefix: &str, channels: &[f32]) -> Result<()> {
    with_sender(|sender| sender.send_channels(prefix, channels))
}

fn with_sender<T>(f: impl FnOnce(&mut InstalledSender) -> Result<T>) -> Result<T> {
    let sender = SENDER.get().ok_or(FrameError::NotInstalled)?;
    let mut guard = sender.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

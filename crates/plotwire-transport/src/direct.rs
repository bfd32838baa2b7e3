use std::io::{ErrorKind, Write};

use crate::error::{Result, TransportError};
use crate::traits::FrameSink;

/// A sink that completes every send before returning.
///
/// Wraps any [`Write`] stream — a file, a TCP connection, a serial device
/// opened as a character file. The send is synchronous, so the sink is
/// always ready; this is the blocking-transmit counterpart to
/// [`SpooledSink`](crate::SpooledSink).
pub struct DirectSink<W> {
    inner: W,
}

impl<W: Write> DirectSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Borrow the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Mutably borrow the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consume the sink and return the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> FrameSink for DirectSink<W> {
    fn is_ready(&self) -> bool {
        true
    }

    fn start_send(&mut self, frame: &[u8]) -> Result<()> {
        write_all_frame(&mut self.inner, frame)
    }
}

/// Write `frame` in full, retrying transient errors, then flush.
pub(crate) fn write_all_frame<W: Write>(writer: &mut W, frame: &[u8]) -> Result<()> {
    let mut offset = 0usize;
    while offset < frame.len() {
        match writer.write(&frame[offset..]) {
            Ok(0) => return Err(TransportError::Closed),
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
            Err(err) => return Err(TransportError::Io(err)),
        }
    }

    loop {
        match writer.flush() {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
            Err(err) => return Err(TransportError::Io(err)),
        }
    }
}

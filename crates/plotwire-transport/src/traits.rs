use crate::error::Result;

/// A non-blocking, single-slot frame transmitter.
///
/// Implementations hold at most one frame in flight. [`start_send`] must
/// return immediately: either the frame was accepted for background
/// transmission, or the call failed and the frame is dropped. Nothing here
/// blocks, retries, or queues.
///
/// Once accepted, a frame cannot be recalled; the next [`is_ready`] query is
/// the only interaction point with an outstanding send.
///
/// [`start_send`]: FrameSink::start_send
/// [`is_ready`]: FrameSink::is_ready
pub trait FrameSink {
    /// Whether a new transmission may be started right now.
    fn is_ready(&self) -> bool;

    /// Hand `frame` to the transport without waiting for completion.
    ///
    /// Returns [`TransportError::Busy`] when a previous send is still in
    /// flight.
    ///
    /// [`TransportError::Busy`]: crate::TransportError::Busy
    fn start_send(&mut self, frame: &[u8]) -> Result<()>;
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn start_send(&mut self, frame: &[u8]) -> Result<()> {
        (**self).start_send(frame)
    }
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn start_send(&mut self, frame: &[u8]) -> Result<()> {
        (**self).start_send(frame)
    }
}

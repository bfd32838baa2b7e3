use std::fmt;

use plotwire_transport::{FrameSink, TransportError};
use tracing::trace;

use crate::config::FrameConfig;
use crate::error::Result;
use crate::firewater::FireWaterEncoder;
use crate::justfloat::JustFloatEncoder;

/// Gates the two encoders behind one transport readiness check.
///
/// Every send follows the same contract: query the sink, and if a previous
/// frame is still in flight, drop the new one and fail with
/// [`TransportError::Busy`] — never block, spin, or queue. Only when the
/// sink is ready is the format's buffer rewritten and handed over.
///
/// The sender is not internally synchronized; `&mut self` makes concurrent
/// use of one instance a compile error. For a process-wide shared sender,
/// see [`crate::global`].
pub struct TelemetrySender<S> {
    sink: S,
    justfloat: JustFloatEncoder,
    firewater: FireWaterEncoder,
}

impl<S: FrameSink> TelemetrySender<S> {
    /// Create a sender with default frame sizing.
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, &FrameConfig::default())
    }

    /// Create a sender with explicit frame sizing.
    pub fn with_config(sink: S, config: &FrameConfig) -> Self {
        Self {
            sink,
            justfloat: JustFloatEncoder::new(config),
            firewater: FireWaterEncoder::new(config),
        }
    }

    /// Encode `channels` as a JustFloat frame and hand it to the transport.
    pub fn send_just_float(&mut self, channels: &[f32]) -> Result<()> {
        self.check_ready()?;
        let frame = self.justfloat.encode(channels)?;
        self.sink.start_send(frame)?;
        Ok(())
    }

    /// Render free-form format arguments as a FireWater frame and hand it to
    /// the transport. All-or-nothing: an overlong rendering fails instead of
    /// truncating.
    ///
    /// ```
    /// # use plotwire_frame::TelemetrySender;
    /// # use plotwire_transport::DirectSink;
    /// let mut sender = TelemetrySender::new(DirectSink::new(Vec::new()));
    /// sender
    ///     .send_fire_water(format_args!("volts:{:.3}\n", 3.3f32))
    ///     .unwrap();
    /// ```
    pub fn send_fire_water(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.check_ready()?;
        let frame = self.firewater.encode_fmt(args)?;
        self.sink.start_send(frame)?;
        Ok(())
    }

    /// Encode `prefix + v0,v1,...,vn\n` as a FireWater frame and hand it to
    /// the transport. Truncates gracefully if the line outgrows the buffer.
    ///
    /// For the consumer to parse the line, a non-empty `prefix` must end
    /// with `:`.
    pub fn send_channels(&mut self, prefix: &str, channels: &[f32]) -> Result<()> {
        self.check_ready()?;
        let frame = self.firewater.encode_channels(prefix, channels)?;
        self.sink.start_send(frame)?;
        Ok(())
    }

    fn check_ready(&self) -> Result<()> {
        if self.sink.is_ready() {
            Ok(())
        } else {
            trace!("transport busy, dropping frame");
            Err(TransportError::Busy.into())
        }
    }

    /// Borrow the underlying sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrow the underlying sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the sender and return the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;

    /// Records every accepted frame; readiness is test-controlled.
    struct RecordingSink {
        ready: bool,
        frames: Vec<Vec<u8>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                ready: true,
                frames: Vec::new(),
            }
        }
    }

    impl FrameSink for RecordingSink {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn start_send(&mut self, frame: &[u8]) -> plotwire_transport::Result<()> {
            if !self.ready {
                return Err(TransportError::Busy);
            }
            self.frames.push(frame.to_vec());
            Ok(())
        }
    }

    #[test]
    fn just_float_frame_reaches_the_sink() {
        let mut sender = TelemetrySender::new(RecordingSink::new());

        sender.send_just_float(&[1.0, 2.0]).unwrap();

        let frames = &sender.sink().frames;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), 12);
        assert_eq!(frames[0][8..], [0x00, 0x00, 0x80, 0x7F]);
    }

    #[test]
    fn structured_fire_water_frame_reaches_the_sink() {
        let mut sender = TelemetrySender::new(RecordingSink::new());

        sender.send_channels("ch:", &[1.0, 2.5, -3.25]).unwrap();

        assert_eq!(
            sender.sink().frames[0],
            b"ch:1.000000,2.500000,-3.250000\n"
        );
    }

    #[test]
    fn free_form_fire_water_frame_reaches_the_sink() {
        let mut sender = TelemetrySender::new(RecordingSink::new());

        sender
            .send_fire_water(format_args!("a:{:.1}\n", 0.5f32))
            .unwrap();

        assert_eq!(sender.sink().frames[0], b"a:0.5\n");
    }

    #[test]
    fn busy_sink_drops_all_three_paths() {
        let mut sender = TelemetrySender::new(RecordingSink::new());
        sender.sink_mut().ready = false;

        assert!(sender.send_just_float(&[1.0]).unwrap_err().is_busy());
        assert!(sender
            .send_fire_water(format_args!("x\n"))
            .unwrap_err()
            .is_busy());
        assert!(sender.send_channels("p:", &[1.0]).unwrap_err().is_busy());

        assert!(sender.sink().frames.is_empty());
    }

    #[test]
    fn busy_sink_leaves_buffers_untouched() {
        let mut sender = TelemetrySender::new(RecordingSink::new());

        sender.send_just_float(&[1.0]).unwrap();
        sender.send_channels("p:", &[2.0]).unwrap();

        sender.sink_mut().ready = false;
        let _ = sender.send_just_float(&[9.0, 9.0]);
        let _ = sender.send_channels("q:", &[8.0, 8.0]);
        sender.sink_mut().ready = true;

        // Re-encoding the original inputs reproduces the original bytes, so
        // the rejected frames cannot have leaked into the buffers.
        sender.send_just_float(&[1.0]).unwrap();
        sender.send_channels("p:", &[2.0]).unwrap();

        let frames = &sender.sink().frames;
        assert_eq!(frames[0], frames[2]);
        assert_eq!(frames[1], frames[3]);
    }

    #[test]
    fn invalid_input_never_reaches_the_sink() {
        let mut sender = TelemetrySender::new(RecordingSink::new());

        assert!(matches!(
            sender.send_just_float(&[]),
            Err(FrameError::InvalidChannelCount { .. })
        ));
        assert!(matches!(
            sender.send_channels("p:", &[]),
            Err(FrameError::InvalidChannelCount { .. })
        ));
        assert!(matches!(
            sender.send_fire_water(format_args!("")),
            Err(FrameError::EmptyFrame)
        ));
        let oversized = "x".repeat(500);
        assert!(matches!(
            sender.send_fire_water(format_args!("{oversized}")),
            Err(FrameError::FormatOverflow { .. })
        ));

        assert!(sender.sink().frames.is_empty());
    }

    #[test]
    fn repeated_sends_are_byte_identical() {
        let mut sender = TelemetrySender::new(RecordingSink::new());

        sender.send_just_float(&[1.0, 2.5, -3.25]).unwrap();
        sender.send_just_float(&[1.0, 2.5, -3.25]).unwrap();
        sender.send_channels("ch:", &[1.0, 2.5, -3.25]).unwrap();
        sender.send_channels("ch:", &[1.0, 2.5, -3.25]).unwrap();

        let frames = &sender.sink().frames;
        assert_eq!(frames[0], frames[1]);
        assert_eq!(frames[2], frames[3]);
    }

    #[test]
    fn transport_errors_surface() {
        struct RejectingSink;

        impl FrameSink for RejectingSink {
            fn is_ready(&self) -> bool {
                true
            }

            fn start_send(&mut self, _frame: &[u8]) -> plotwire_transport::Result<()> {
                Err(TransportError::Shutdown)
            }
        }

        let mut sender = TelemetrySender::new(RejectingSink);
        let err = sender.send_just_float(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            FrameError::Transport(TransportError::Shutdown)
        ));
    }
}

use bytes::{BufMut, BytesMut};

use crate::config::{FrameConfig, FRAME_TAIL};
use crate::error::{FrameError, Result};

/// Encoder for the JustFloat binary format.
///
/// Wire format:
/// ```text
/// ┌────────────────────────────┬──────────────────┐
/// │ Channels (4 bytes each,    │ Tail             │
/// │ native-endian IEEE-754 f32)│ 0x00 0x00 0x80   │
/// │                            │ 0x7F             │
/// └────────────────────────────┴──────────────────┘
/// ```
///
/// The buffer is preallocated for `max_channels` values and overwritten in
/// full on every call.
pub struct JustFloatEncoder {
    buf: BytesMut,
    max_channels: usize,
}

impl JustFloatEncoder {
    /// Create an encoder with explicit sizing.
    pub fn new(config: &FrameConfig) -> Self {
        Self {
            buf: BytesMut::with_capacity(config.binary_capacity()),
            max_channels: config.max_channels,
        }
    }

    /// Maximum number of channels accepted per frame.
    pub fn max_channels(&self) -> usize {
        self.max_channels
    }

    /// Encode one frame, returning the `len * 4 + 4` wire bytes.
    ///
    /// Rejects empty and oversized channel arrays without touching the
    /// buffer.
    pub fn encode(&mut self, channels: &[f32]) -> Result<&[u8]> {
        if channels.is_empty() || channels.len() > self.max_channels {
            return Err(FrameError::InvalidChannelCount {
                count: channels.len(),
                max: self.max_channels,
            });
        }

        self.buf.clear();
        for value in channels {
            self.buf.put_slice(&value.to_ne_bytes());
        }
        self.buf.put_slice(&FRAME_TAIL);
        Ok(&self.buf)
    }
}

impl Default for JustFloatEncoder {
    fn default() -> Self {
        Self::new(&FrameConfig::default())
    }
}

use std::fmt::{self, Write};

use crate::config::FrameConfig;
use crate::error::{FrameError, Result};

/// Encoder for the FireWater delimited-text format.
///
/// Wire format: `[prefix]v0,v1,...,v_{n-1}\n`, each value rendered as
/// fixed-point decimal with six fractional digits. The consumer expects a
/// prefix, if present, to end with `:`; that is a protocol convention for
/// the caller to honor, not something this encoder enforces.
///
/// Two entry points with deliberately different overflow policies:
/// - [`encode_fmt`] renders caller-supplied format arguments and rejects the
///   whole frame if the result would not fit — a partially rendered line is
///   never placed on the wire.
/// - [`encode_channels`] fills the buffer value by value and truncates
///   gracefully, sending whatever fit.
///
/// [`encode_fmt`]: FireWaterEncoder::encode_fmt
/// [`encode_channels`]: FireWaterEncoder::encode_channels
pub struct FireWaterEncoder {
    buf: String,
    scratch: String,
    max_channels: usize,
    capacity: usize,
}

impl FireWaterEncoder {
    /// Create an encoder with explicit sizing.
    pub fn new(config: &FrameConfig) -> Self {
        let capacity = config.text_capacity();
        Self {
            buf: String::with_capacity(capacity),
            scratch: String::new(),
            max_channels: config.max_channels,
            capacity,
        }
    }

    /// Buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Render free-form format arguments into the buffer, all or nothing.
    ///
    /// The rendered text is rejected when it is empty, when the formatter
    /// fails, or when it would fill or exceed the buffer. This path cannot
    /// check remaining space per field, so it never emits a partial line.
    /// No terminator is added beyond what the arguments render.
    pub fn encode_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<&[u8]> {
        self.buf.clear();
        self.buf.write_fmt(args)?;

        if self.buf.is_empty() {
            return Err(FrameError::EmptyFrame);
        }
        if self.buf.len() >= self.capacity {
            return Err(FrameError::FormatOverflow {
                size: self.buf.len(),
                capacity: self.capacity,
            });
        }
        Ok(self.buf.as_bytes())
    }

    /// Build `prefix + v0,v1,...,v_{n-1}\n` into the buffer.
    ///
    /// An empty `prefix` means no prefix. The prefix is clipped silently if
    /// it alone overruns the buffer. Channel values are appended until the
    /// buffer has at most one byte left, at which point the frame is cut
    /// short — the partial line is still returned for transmission. The
    /// last value is newline-terminated, all others comma-terminated.
    pub fn encode_channels(&mut self, prefix: &str, channels: &[f32]) -> Result<&[u8]> {
        if channels.is_empty() || channels.len() > self.max_channels {
            return Err(FrameError::InvalidChannelCount {
                count: channels.len(),
                max: self.max_channels,
            });
        }

        self.buf.clear();
        if !prefix.is_empty() {
            push_bounded(&mut self.buf, self.capacity, prefix);
        }

        for (i, value) in channels.iter().enumerate() {
            if self.capacity.saturating_sub(self.buf.len()) <= 1 {
                break;
            }
            let sep = if i == channels.len() - 1 { '\n' } else { ',' };
            self.scratch.clear();
            write!(self.scratch, "{value:.6}{sep}")?;
            push_bounded(&mut self.buf, self.capacity, &self.scratch);
        }

        Ok(self.buf.as_bytes())
    }
}

impl Default for FireWaterEncoder {
    fn default() -> Self {
        Self::new(&FrameConfig::default())
    }
}

/// Append as much of `text` as fits, keeping one byte of headroom and
/// cutting only on a character boundary.
fn push_bounded(buf: &mut String, capacity: usize, text: &str) {
    let avail = capacity.saturating_sub(1).saturating_sub(buf.len());
    if text.len() <= avail {
        buf.push_str(text);
        return;
    }
    let mut cut = avail;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    buf.push_str(&text[..cut]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_frame_matches_expected_text() {
        let mut encoder = FireWaterEncoder::default();

        let frame = encoder.encode_channels("ch:", &[1.0, 2.5, -3.25]).unwrap();

        assert_eq!(frame, b"ch:1.000000,2.500000,-3.250000\n");
    }

    #[test]
    fn structured_frame_without_prefix() {
        let mut encoder = FireWaterEncoder::default();
        let frame = encoder.encode_channels("", &[7.0]).unwrap();
        assert_eq!(frame, b"7.000000\n");
    }

    #[test]
    fn structured_rejects_empty_channel_array() {
        let mut encoder = FireWaterEncoder::default();
        let err = encoder.encode_channels("ch:", &[]).unwrap_err();
        assert!(matches!(err, FrameError::InvalidChannelCount { count: 0, .. }));
    }

    #[test]
    fn structured_rejects_too_many_channels() {
        let mut encoder = FireWaterEncoder::default();
        let channels = [0.0f32; 11];
        let err = encoder.encode_channels("", &channels).unwrap_err();
        assert!(matches!(
            err,
            FrameError::InvalidChannelCount { count: 11, max: 10 }
        ));
    }

    #[test]
    fn oversized_prefix_is_clipped_not_fatal() {
        let config = FrameConfig {
            max_channels: 2,
            max_prefix_len: 8,
        };
        let mut encoder = FireWaterEncoder::new(&config);
        let capacity = encoder.capacity();
        let long_prefix = "p".repeat(capacity * 2);

        let frame = encoder.encode_channels(&long_prefix, &[1.0, 2.0]).unwrap();

        assert_eq!(frame.len(), capacity - 1);
        assert!(frame.iter().all(|&b| b == b'p'));
    }

    #[test]
    fn truncates_gracefully_when_values_overflow() {
        let config = FrameConfig {
            max_channels: 2,
            max_prefix_len: 8,
        };
        // Capacity 40; a 30-byte prefix leaves room for exactly one value.
        let mut encoder = FireWaterEncoder::new(&config);
        let prefix = "p".repeat(30);

        let frame = encoder.encode_channels(&prefix, &[1.0, 2.0]).unwrap();

        assert_eq!(frame.len(), 39);
        assert!(frame.ends_with(b"1.000000,"));
        // Cut short before the second value: the closing newline never fit.
        assert!(!frame.ends_with(b"\n"));
    }

    #[test]
    fn free_form_renders_exact_bytes() {
        let mut encoder = FireWaterEncoder::default();

        let frame = encoder
            .encode_fmt(format_args!("volts:{:.3},{:.3}\n", 1.25f32, -2.0f32))
            .unwrap();

        assert_eq!(frame, b"volts:1.250,-2.000\n");
    }

    #[test]
    fn free_form_rejects_empty_rendering() {
        let mut encoder = FireWaterEncoder::default();
        let err = encoder.encode_fmt(format_args!("")).unwrap_err();
        assert!(matches!(err, FrameError::EmptyFrame));
    }

    #[test]
    fn free_form_rejects_exact_fill() {
        let mut encoder = FireWaterEncoder::default();
        let capacity = encoder.capacity();
        let line = "x".repeat(capacity);

        let err = encoder.encode_fmt(format_args!("{line}")).unwrap_err();
        assert!(matches!(err, FrameError::FormatOverflow { .. }));
    }

    #[test]
    fn free_form_rejects_overflow() {
        let mut encoder = FireWaterEncoder::default();
        let capacity = encoder.capacity();
        let line = "y".repeat(capacity + 40);

        let err = encoder.encode_fmt(format_args!("{line}")).unwrap_err();
        assert!(matches!(
            err,
            FrameError::FormatOverflow { size, .. } if size == capacity + 40
        ));
    }

    #[test]
    fn free_form_accepts_capacity_minus_one() {
        let mut encoder = FireWaterEncoder::default();
        let capacity = encoder.capacity();
        let line = "z".repeat(capacity - 1);

        let frame = encoder.encode_fmt(format_args!("{line}")).unwrap();
        assert_eq!(frame.len(), capacity - 1);
    }

    #[test]
    fn identical_input_encodes_identically() {
        let mut encoder = FireWaterEncoder::default();
        let first = encoder.encode_channels("s:", &[1.5, 2.5]).unwrap().to_vec();
        let second = encoder.encode_channels("s:", &[1.5, 2.5]).unwrap().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn push_bounded_cuts_on_char_boundary() {
        let mut buf = String::new();
        // "é" is two bytes; capacity 4 leaves 3 usable, cutting inside it.
        push_bounded(&mut buf, 4, "aaé");
        assert_eq!(buf, "aa");
    }
}

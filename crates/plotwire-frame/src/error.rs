use plotwire_transport::TransportError;

/// Errors that can occur while encoding or submitting a telemetry frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The channel array was empty or longer than the configured maximum.
    #[error("invalid channel count ({count}, expected 1..={max})")]
    InvalidChannelCount { count: usize, max: usize },

    /// The rendered text would not fit the frame buffer.
    #[error("rendered frame too large ({size} bytes, capacity {capacity})")]
    FormatOverflow { size: usize, capacity: usize },

    /// The format arguments rendered to nothing.
    #[error("rendered frame is empty")]
    EmptyFrame,

    /// A formatter implementation reported an error while rendering.
    #[error("frame formatting failed: {0}")]
    Format(#[from] std::fmt::Error),

    /// A send was attempted before a transmitter was installed.
    #[error("no transmitter installed")]
    NotInstalled,

    /// A second transmitter install was attempted.
    #[error("transmitter already installed")]
    AlreadyInstalled,

    /// The transport rejected the frame.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl FrameError {
    /// Whether this failure means the frame was dropped because a previous
    /// send was still in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, FrameError::Transport(TransportError::Busy))
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;

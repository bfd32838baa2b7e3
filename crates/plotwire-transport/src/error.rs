/// Errors that can occur in telemetry transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// A previous transmission is still in flight.
    #[error("transmitter busy (previous frame still in flight)")]
    Busy,

    /// The writer accepted zero bytes, i.e. the peer is gone.
    #[error("transport closed (writer accepted no bytes)")]
    Closed,

    /// The background transmitter has shut down after a write failure.
    #[error("transmitter shut down")]
    Shutdown,

    /// An I/O error occurred on the underlying stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;

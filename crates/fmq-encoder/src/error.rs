use fmq_wire::WireError;

/// Errors that can occur while emitting frames.
///
/// ```text
///   EncodeError
///   ├── MessageTooLarge      ← payload beyond the addressable ceiling
///   ├── Wire(WireError)      ← from fmq-wire header emission
///   └── Io(std::io::Error)   ← from the underlying writer
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The payload is longer than any peer can be assumed to address.
    /// Refused at encode time so that emitted streams always decode.
    #[error("payload of {length} bytes exceeds the addressable message size")]
    MessageTooLarge { length: usize },

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

use fmq_decoder::DecodeError;

/// Errors surfaced by the read drivers.
///
/// ```text
///   DriverError
///   ├── Decode(DecodeError)  ← validation, sink, or poisoned decoder
///   ├── TruncatedStream      ← reader hit EOF inside a frame
///   └── Io(std::io::Error)   ← from the underlying reader
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The byte source ended mid-frame; `missing` bytes were still
    /// required to finish the current step.
    #[error("stream ended inside a frame ({missing} bytes missing)")]
    TruncatedStream { missing: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

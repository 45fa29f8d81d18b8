/// Errors produced while decoding a framed byte stream.
///
/// The first three variants poison the decoder: once one of them has
/// been returned, every later step on the same instance returns the
/// same error again, and the owner is expected to tear the connection
/// down. `SinkRejected` and `NoSink` fail only the step that hit them —
/// the completed message stays inside the decoder and delivery can be
/// retried.
///
/// ```text
///   DecodeError                           sticky?
///   ├── OversizedMessage                  yes
///   ├── SizeOverflow                      yes
///   ├── SinkBackpressure                  yes
///   ├── SinkRejected                      no
///   └── NoSink                            no
/// ```
///
/// The enum is `Copy` so the poisoned state can replay the original
/// error verbatim on every subsequent step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Declared payload length exceeds the configured maximum.
    #[error("declared length {length} exceeds maximum message size {max}")]
    OversizedMessage { length: u64, max: i64 },

    /// Declared payload length exceeds what peers can be assumed to
    /// address, regardless of the configured maximum.
    #[error("declared length {length} exceeds the addressable message size")]
    SizeOverflow { length: u64 },

    /// The sink reported it would block. There is no queue to park the
    /// message in, so the stream cannot make progress again.
    #[error("sink would block; stream is dead")]
    SinkBackpressure,

    /// The sink refused the message for a reason other than
    /// backpressure.
    #[error("sink rejected the message")]
    SinkRejected,

    /// A message completed but no sink is attached.
    #[error("no sink attached")]
    NoSink,
}

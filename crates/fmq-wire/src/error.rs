/// Errors produced by structural frame parsing and emission.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete flags byte or length field could be
    /// read. `offset` is the byte position from the start of the input
    /// where the read failed.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// I/O error while writing a frame.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

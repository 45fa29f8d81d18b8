use fmq_msg::Message;
use fmq_wire::flags::MsgFlags;
use fmq_wire::frame::{FrameHeader, MAX_FRAME_LENGTH};

use crate::error::EncodeError;

/// Send-side framing — builds a wire stream from a message sequence.
///
/// The encoder is the inverse of the incremental decoder in
/// `fmq-decoder`: every message becomes one frame, with the short or
/// long length form chosen per frame from the payload size alone. A
/// multi-frame logical message is expressed by adding its leading parts
/// with [`add_part`](Self::add_part) (MORE set) and its final part with
/// [`add_message`](Self::add_message).
///
/// # Usage
///
/// ```rust
/// use fmq_encoder::FrameEncoder;
///
/// let stream = FrameEncoder::new()
///     .add_part(b"routing".to_vec())
///     .add_message(b"body".to_vec())
///     .encode()
///     .unwrap();
/// assert_eq!(&stream[..2], &[0x01, 0x07]);
/// ```
///
/// # Output layout
///
/// ```text
/// ┌──────────────┬───────────────────────────────────────────┐
/// │ [2|9 bytes]  │ Frame 0 header (flags + short/long length)│
/// │ [N bytes]    │ Frame 0 payload                           │
/// │ [2|9 bytes]  │ Frame 1 header ...                        │
/// │ ...          │                                           │
/// └──────────────┴───────────────────────────────────────────┘
/// ```
#[derive(Debug, Default)]
pub struct FrameEncoder {
    messages: Vec<Message>,
}

impl FrameEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the final (or only) frame of a logical message.
    pub fn add_message(&mut self, payload: impl Into<Vec<u8>>) -> &mut Self {
        self.messages.push(Message::from_payload(payload));
        self
    }

    /// Append a frame with MORE set: another frame of the same logical
    /// message follows.
    pub fn add_part(&mut self, payload: impl Into<Vec<u8>>) -> &mut Self {
        let mut message = Message::from_payload(payload);
        message.set_more();
        self.messages.push(message);
        self
    }

    /// Append one logical message split across several frames; MORE is
    /// set on every part but the last.
    pub fn add_multipart<I>(&mut self, parts: I) -> &mut Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let mut pending: Option<Message> = None;
        for part in parts {
            if let Some(mut earlier) = pending.take() {
                earlier.set_more();
                self.messages.push(earlier);
            }
            pending = Some(Message::from_payload(part));
        }
        if let Some(last) = pending {
            self.messages.push(last);
        }
        self
    }

    /// Append a pre-built message, flags taken as-is.
    pub fn add(&mut self, message: Message) -> &mut Self {
        self.messages.push(message);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Serialize every accumulated message into a fresh byte vector.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::MessageTooLarge`] if any payload exceeds
    /// the addressable ceiling.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let capacity: usize = self
            .messages
            .iter()
            .map(|m| FrameHeader::new(m.flags(), m.len() as u64).encoded_len() + m.len())
            .sum();

        let mut output = Vec::with_capacity(capacity);
        self.encode_to(&mut output)?;
        Ok(output)
    }

    /// Serialize every accumulated message to the provided writer.
    ///
    /// # Errors
    ///
    /// [`EncodeError::MessageTooLarge`] for an over-sized payload,
    /// [`EncodeError::Wire`] / [`EncodeError::Io`] if the writer fails.
    pub fn encode_to(&self, w: &mut impl std::io::Write) -> Result<usize, EncodeError> {
        let mut written = 0;
        for message in &self.messages {
            written += write_message(message, w)?;
        }
        Ok(written)
    }
}

/// Write a single message as one frame.
///
/// # Errors
///
/// Same conditions as [`FrameEncoder::encode_to`].
pub fn write_message(message: &Message, w: &mut impl std::io::Write) -> Result<usize, EncodeError> {
    let length = message.len() as u64;
    if length > MAX_FRAME_LENGTH {
        return Err(EncodeError::MessageTooLarge {
            length: message.len(),
        });
    }

    let flags = if message.has_more() {
        MsgFlags::MORE
    } else {
        MsgFlags::NONE
    };

    let mut written = FrameHeader::new(flags, length).write_to(w)?;
    w.write_all(message.payload()).map_err(EncodeError::Io)?;
    written += message.len();
    Ok(written)
}

use fmq_wire::flags::MsgFlags;

/// One decoded application message: a payload plus its protocol flags.
///
/// The payload buffer is allocated to its exact final size as soon as
/// the declared length is known, and is then filled in place — the
/// decoder hands out `payload_mut()` as the fill target, so the bytes
/// read from the transport land directly in the message with no
/// intermediate copy.
///
/// Of the wire flags only MORE is meaningful on a materialized message;
/// LARGE is a length-encoding detail that does not survive decoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    flags: MsgFlags,
    payload: Vec<u8>,
}

impl Message {
    /// Create an empty message with no flags set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a message whose payload is `size` zeroed bytes, ready to
    /// be filled in place.
    #[must_use]
    pub fn with_size(size: usize) -> Self {
        Self {
            flags: MsgFlags::NONE,
            payload: vec![0u8; size],
        }
    }

    /// Create a message from an existing payload.
    #[must_use]
    pub fn from_payload(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            flags: MsgFlags::NONE,
            payload: payload.into(),
        }
    }

    pub fn flags(&self) -> MsgFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: MsgFlags) {
        self.flags = flags;
    }

    /// Mark this message as one part of a multi-frame logical message.
    pub fn set_more(&mut self) {
        self.flags = self.flags.with_more();
    }

    pub fn has_more(&self) -> bool {
        self.flags.has_more()
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Mutable view of the payload, used to fill it in place.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.payload
    }

    /// Consume the message and take its payload.
    #[must_use]
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

/// Frame flags bitfield.
///
/// Bit layout:
///   bit 0 = MORE  (another frame follows in the same logical message)
///   bit 1 = LARGE (length field is 8 bytes instead of 1)
///   bits 2-7 = reserved, ignored on read
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MsgFlags(u8);

impl MsgFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);

    /// Another frame belongs to the same logical message.
    pub const MORE: Self = Self(0b0000_0001);

    /// The length field is 8 bytes, big-endian.
    pub const LARGE: Self = Self(0b0000_0010);

    /// Create flags from a raw wire byte. Reserved bits are kept but
    /// never interpreted.
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Get the underlying byte value.
    pub fn raw(self) -> u8 {
        self.0
    }

    pub fn has_more(self) -> bool {
        self.0 & Self::MORE.0 != 0
    }

    pub fn is_large(self) -> bool {
        self.0 & Self::LARGE.0 != 0
    }

    /// Copy of these flags with the MORE bit set.
    pub fn with_more(self) -> Self {
        Self(self.0 | Self::MORE.0)
    }
}

use crate::error::WireError;
use crate::flags::MsgFlags;

/// Size of the flags byte.
pub const FLAGS_LEN: usize = 1;

/// Size of the short-form length field.
pub const SHORT_LENGTH_LEN: usize = 1;

/// Size of the long-form length field.
pub const LONG_LENGTH_LEN: usize = 8;

/// Largest payload length encodable in the short form.
pub const MAX_SHORT_LENGTH: u64 = u8::MAX as u64;

/// Largest payload length any peer can be assumed to address.
///
/// The long form can carry a full unsigned 64-bit value, but peers on
/// 32-bit hosts index payload storage with a signed size type. Lengths
/// above this ceiling are not interoperable and are rejected before any
/// allocation happens.
pub const MAX_FRAME_LENGTH: u64 = i32::MAX as u64;

/// Frame header — the envelope preceding every payload on the wire.
///
/// ```text
/// ┌────────┬─────────────┬──────────────────────────────────────┐
/// │ Offset │ Size        │ Description                          │
/// ├────────┼─────────────┼──────────────────────────────────────┤
/// │ 0x00   │ 1 byte      │ Flags: bit0=MORE, bit1=LARGE         │
/// │ 0x01   │ 1 byte      │ Length (0..=255), if LARGE clear     │
/// │ 0x01   │ 8 bytes     │ Length, big-endian u64, if LARGE set │
/// └────────┴─────────────┴──────────────────────────────────────┘
/// ```
///
/// `write_to` chooses the encoding from the length alone: payloads of
/// 255 bytes or fewer take the short form, everything else the long
/// form. `read_from` trusts the LARGE bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    pub flags: MsgFlags,
    pub length: u64,
}

impl FrameHeader {
    pub fn new(flags: MsgFlags, length: u64) -> Self {
        Self { flags, length }
    }

    /// Number of bytes this header occupies when written.
    pub fn encoded_len(&self) -> usize {
        if self.length > MAX_SHORT_LENGTH {
            FLAGS_LEN + LONG_LENGTH_LEN
        } else {
            FLAGS_LEN + SHORT_LENGTH_LEN
        }
    }

    /// Write this header to the provided writer.
    ///
    /// The LARGE bit on the wire is derived from the length; the MORE
    /// bit is taken from `flags`. Reserved bits are always written as
    /// zero.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Io`] if the writer fails.
    pub fn write_to(&self, w: &mut impl std::io::Write) -> Result<usize, WireError> {
        let more = if self.flags.has_more() {
            MsgFlags::MORE.raw()
        } else {
            0
        };

        if self.length > MAX_SHORT_LENGTH {
            w.write_all(&[more | MsgFlags::LARGE.raw()])?;
            w.write_all(&self.length.to_be_bytes())?;
            Ok(FLAGS_LEN + LONG_LENGTH_LEN)
        } else {
            #[allow(clippy::cast_possible_truncation)]
            let short = self.length as u8;
            w.write_all(&[more, short])?;
            Ok(FLAGS_LEN + SHORT_LENGTH_LEN)
        }
    }

    /// Parse a header from the start of the provided buffer.
    ///
    /// # Returns
    ///
    /// The parsed header and the number of bytes consumed (2 for the
    /// short form, 9 for the long form).
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if the buffer ends inside
    /// the flags byte or the length field.
    pub fn read_from(buf: &[u8]) -> Result<(Self, usize), WireError> {
        let flags_byte = *buf.first().ok_or(WireError::UnexpectedEof { offset: 0 })?;
        let flags = MsgFlags::from_raw(flags_byte);

        if flags.is_large() {
            let end = FLAGS_LEN + LONG_LENGTH_LEN;
            let field = buf
                .get(FLAGS_LEN..end)
                .ok_or(WireError::UnexpectedEof { offset: buf.len() })?;
            let mut raw = [0u8; LONG_LENGTH_LEN];
            raw.copy_from_slice(field);
            Ok((Self::new(flags, u64::from_be_bytes(raw)), end))
        } else {
            let length = *buf
                .get(FLAGS_LEN)
                .ok_or(WireError::UnexpectedEof { offset: buf.len() })?;
            Ok((Self::new(flags, u64::from(length)), FLAGS_LEN + SHORT_LENGTH_LEN))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_header(header: &FrameHeader) -> Vec<u8> {
        let mut buf = Vec::new();
        let n = header.write_to(&mut buf).unwrap();
        assert_eq!(n, buf.len());
        assert_eq!(n, header.encoded_len());
        buf
    }

    #[test]
    fn short_form_roundtrip() {
        for length in [0u64, 1, 255] {
            let header = FrameHeader::new(MsgFlags::NONE, length);
            let bytes = write_header(&header);
            assert_eq!(bytes.len(), 2);

            let (parsed, consumed) = FrameHeader::read_from(&bytes).unwrap();
            assert_eq!(consumed, 2);
            assert_eq!(parsed.length, length);
            assert!(!parsed.flags.has_more());
            assert!(!parsed.flags.is_large());
        }
    }

    #[test]
    fn long_form_exact_bytes_for_256() {
        let header = FrameHeader::new(MsgFlags::NONE, 256);
        let bytes = write_header(&header);
        assert_eq!(
            bytes,
            [0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00]
        );

        let (parsed, consumed) = FrameHeader::read_from(&bytes).unwrap();
        assert_eq!(consumed, 9);
        assert_eq!(parsed.length, 256);
        assert!(parsed.flags.is_large());
    }

    #[test]
    fn more_bit_survives_both_forms() {
        let short = write_header(&FrameHeader::new(MsgFlags::MORE, 3));
        assert_eq!(short[0], 0x01);
        let (parsed, _) = FrameHeader::read_from(&short).unwrap();
        assert!(parsed.flags.has_more());

        let long = write_header(&FrameHeader::new(MsgFlags::MORE, 1 << 16));
        assert_eq!(long[0], 0x03);
        let (parsed, _) = FrameHeader::read_from(&long).unwrap();
        assert!(parsed.flags.has_more());
        assert_eq!(parsed.length, 1 << 16);
    }

    #[test]
    fn large_bit_not_derived_from_message_flags() {
        // A header built with a stray LARGE flag but a small length still
        // writes the short form; the wire bit comes from the length.
        let header = FrameHeader::new(MsgFlags::LARGE, 7);
        let bytes = write_header(&header);
        assert_eq!(bytes, [0x00, 0x07]);
    }

    #[test]
    fn read_empty_buffer() {
        let result = FrameHeader::read_from(&[]);
        assert!(matches!(result, Err(WireError::UnexpectedEof { offset: 0 })));
    }

    #[test]
    fn read_truncated_short_length() {
        let result = FrameHeader::read_from(&[0x00]);
        assert!(matches!(result, Err(WireError::UnexpectedEof { offset: 1 })));
    }

    #[test]
    fn read_truncated_long_length() {
        // LARGE set but only 4 of 8 length bytes present.
        let result = FrameHeader::read_from(&[0x02, 0x00, 0x00, 0x00, 0x00]);
        assert!(matches!(result, Err(WireError::UnexpectedEof { offset: 5 })));
    }

    #[test]
    fn reserved_bits_fall_through_to_short_form() {
        let (parsed, consumed) = FrameHeader::read_from(&[0b1111_0000, 0x05]).unwrap();
        assert_eq!(consumed, 2);
        assert_eq!(parsed.length, 5);
        assert!(!parsed.flags.has_more());
    }

    #[test]
    fn long_form_max_value() {
        let header = FrameHeader::new(MsgFlags::NONE, u64::MAX);
        let bytes = write_header(&header);
        let (parsed, _) = FrameHeader::read_from(&bytes).unwrap();
        assert_eq!(parsed.length, u64::MAX);
    }
}

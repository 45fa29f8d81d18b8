//! Wire-image round trips: hand-written byte streams in, messages out,
//! and encoder output back through the decoder.

use fmq_encoder::FrameEncoder;
use fmq_tests::{decode_all, shape};

// ── Hand-written wire images ─────────────────────────────────────────────────

#[test]
fn short_form_lengths_zero_one_and_max() {
    for length in [0usize, 1, 255] {
        for more in [false, true] {
            let mut stream = vec![u8::from(more), u8::try_from(length).unwrap()];
            stream.extend(std::iter::repeat_n(0xEE, length));

            let messages = decode_all(&stream, -1).unwrap();
            assert_eq!(messages.len(), 1, "length {length}, more {more}");
            assert_eq!(messages[0].len(), length);
            assert_eq!(messages[0].has_more(), more);
        }
    }
}

#[test]
fn long_form_256_exact_wire_image() {
    // LARGE set, MORE clear, length 256 big-endian.
    let mut stream = hex::decode("020000000000000100").unwrap();
    stream.extend(std::iter::repeat_n(0x42, 256));

    let messages = decode_all(&stream, -1).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].len(), 256);
    assert!(!messages[0].has_more());
    assert!(messages[0].payload().iter().all(|&b| b == 0x42));
}

#[test]
fn more_flag_is_reset_between_messages() {
    let stream = hex::decode("0103414243").unwrap() // MORE, "ABC"
        .into_iter()
        .chain(hex::decode("0000").unwrap()) // empty final frame
        .collect::<Vec<_>>();

    let messages = decode_all(&stream, -1).unwrap();
    assert_eq!(
        shape(&messages),
        vec![(true, b"ABC".to_vec()), (false, Vec::new())]
    );
}

#[test]
fn reserved_flag_bits_are_ignored() {
    // Bits 2..7 set alongside MORE; still a short 2-byte payload.
    let stream = [0b1111_1101, 0x02, b'h', b'i'];
    let messages = decode_all(&stream, -1).unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].has_more());
    assert_eq!(messages[0].payload(), b"hi");
}

// ── Encoder → decoder round trips ────────────────────────────────────────────

#[test]
fn payload_sizes_across_both_length_forms() {
    for size in [0usize, 1, 100, 255, 256, 257, 65_536] {
        let mut enc = FrameEncoder::new();
        enc.add_message(vec![0xA5; size]);
        let stream = enc.encode().unwrap();

        let messages = decode_all(&stream, -1).unwrap();
        assert_eq!(messages.len(), 1, "size {size}");
        assert_eq!(messages[0].len(), size);
    }
}

#[test]
fn multipart_group_survives_the_wire() {
    let mut enc = FrameEncoder::new();
    enc.add_multipart([
        b"envelope".to_vec(),
        b"body".to_vec(),
        b"trailer".to_vec(),
    ])
    .add_message(b"next".to_vec());
    let stream = enc.encode().unwrap();

    let messages = decode_all(&stream, -1).unwrap();
    assert_eq!(
        shape(&messages),
        vec![
            (true, b"envelope".to_vec()),
            (true, b"body".to_vec()),
            (false, b"trailer".to_vec()),
            (false, b"next".to_vec()),
        ]
    );
}

#[test]
fn empty_stream_decodes_to_no_messages() {
    let messages = decode_all(&[], -1).unwrap();
    assert!(messages.is_empty());
}

#[test]
fn encoder_picks_the_length_form_at_the_boundary() {
    use fmq_wire::frame::FrameHeader;

    let mut enc = FrameEncoder::new();
    enc.add_message(vec![0u8; 255]).add_message(vec![0u8; 256]);
    let stream = enc.encode().unwrap();

    let (first, consumed) = FrameHeader::read_from(&stream).unwrap();
    assert!(!first.flags.is_large());
    assert_eq!(first.length, 255);

    let (second, _) = FrameHeader::read_from(&stream[consumed + 255..]).unwrap();
    assert!(second.flags.is_large());
    assert_eq!(second.length, 256);
}

#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: structural frame header parse on arbitrary bytes.
//
// Catches bugs in:
// - Short/long form selection from the LARGE bit
// - Big-endian length field handling
// - Truncated input handling
fuzz_target!(|data: &[u8]| {
    if let Ok((header, consumed)) = fmq_wire::frame::FrameHeader::read_from(data) {
        assert!(consumed <= data.len());
        assert!(consumed == 2 || consumed == 9);
        // Re-emitting a parsed header must reproduce the same length.
        let mut out = Vec::new();
        let _ = header.write_to(&mut out);
        let (reparsed, _) = fmq_wire::frame::FrameHeader::read_from(&out).unwrap();
        assert_eq!(reparsed.length, header.length);
        assert_eq!(reparsed.flags.has_more(), header.flags.has_more());
    }
});

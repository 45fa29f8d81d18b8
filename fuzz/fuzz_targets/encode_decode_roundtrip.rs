#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use fmq_decoder::FrameDecoder;
use fmq_encoder::FrameEncoder;
use fmq_msg::CollectSink;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzMessage {
    payload: Vec<u8>,
    more: bool,
}

// Fuzz target: FrameEncoder -> FrameDecoder roundtrip.
//
// The decoder must accept anything the encoder produces, and the
// decoded (more, payload) sequence must match the input exactly.
fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(messages) = Vec::<FuzzMessage>::arbitrary(&mut u) else {
        return;
    };

    let count = messages.len().min(64);
    let messages = &messages[..count];

    let mut encoder = FrameEncoder::new();
    for msg in messages {
        if msg.more {
            encoder.add_part(msg.payload.clone());
        } else {
            encoder.add_message(msg.payload.clone());
        }
    }
    let stream = encoder.encode().expect("encoder refused a fuzz payload");

    let mut decoder = FrameDecoder::with_sink(-1, CollectSink::new());
    decoder
        .consume(&stream)
        .expect("decoder failed on valid encoder output");

    let decoded = decoder.take_sink().map(CollectSink::into_messages).unwrap();
    assert_eq!(decoded.len(), count);
    for (original, decoded) in messages.iter().zip(&decoded) {
        assert_eq!(decoded.payload(), original.payload.as_slice());
        assert_eq!(decoded.has_more(), original.more);
    }
});

#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use fmq_decoder::FrameDecoder;
use fmq_msg::CollectSink;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    stream: Vec<u8>,
    chunk: u8,
}

// Fuzz target: fragmented and contiguous decoding must agree.
//
// Feeds the same arbitrary byte stream to two decoders — one chunked,
// one contiguous — and asserts they produce the same messages and the
// same outcome. This is the fragmentation-invariance property under
// hostile input, not just under encoder output.
fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(input) = FuzzInput::arbitrary(&mut u) else {
        return;
    };
    let chunk = usize::from(input.chunk).max(1);

    let mut whole = FrameDecoder::with_sink(1 << 20, CollectSink::new());
    let whole_result = whole.consume(&input.stream);

    let mut pieces = FrameDecoder::with_sink(1 << 20, CollectSink::new());
    let mut pieces_result = Ok(0);
    for piece in input.stream.chunks(chunk) {
        pieces_result = pieces.consume(piece);
        if pieces_result.is_err() {
            break;
        }
    }

    assert_eq!(whole_result.is_err(), pieces_result.is_err());
    if let (Err(a), Err(b)) = (&whole_result, &pieces_result) {
        assert_eq!(a, b);
    }

    let whole_msgs = whole.take_sink().map(CollectSink::into_messages).unwrap();
    let piece_msgs = pieces.take_sink().map(CollectSink::into_messages).unwrap();
    assert_eq!(whole_msgs, piece_msgs);
});

#![no_main]

use fmq_decoder::FrameDecoder;
use fmq_msg::CollectSink;
use libfuzzer_sys::fuzz_target;

// Fuzz target: full incremental decoder on arbitrary bytes.
//
// Catches bugs in:
// - Flags / length state transitions
// - Size and overflow validation ordering
// - Payload fill bookkeeping
// - Sticky error handling
//
// With an unlimited maximum a hostile length could make the decoder
// allocate gigabytes, so the fuzz config caps it instead.
fuzz_target!(|data: &[u8]| {
    let mut decoder = FrameDecoder::with_sink(1 << 20, CollectSink::new());
    let _ = decoder.consume(data);
    // Whatever happened, the decoder must stay internally coherent.
    let _ = decoder.stalled();
    let _ = decoder.required();
});

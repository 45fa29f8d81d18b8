use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use fmq_decoder::FrameDecoder;
use fmq_encoder::FrameEncoder;
use fmq_msg::CollectSink;

fn small_message_stream(count: usize) -> Vec<u8> {
    let mut enc = FrameEncoder::new();
    for i in 0..count {
        enc.add_message(vec![u8::try_from(i % 251).unwrap(); 32]);
    }
    enc.encode().unwrap()
}

fn decode_whole(stream: &[u8]) -> usize {
    let mut decoder = FrameDecoder::with_sink(-1, CollectSink::new());
    decoder.consume(stream).unwrap();
    decoder.sink().map(CollectSink::len).unwrap_or_default()
}

fn bench_decode_small_messages(c: &mut Criterion) {
    let stream = small_message_stream(1000);

    let mut group = c.benchmark_group("decode_small_messages");
    group.throughput(Throughput::Bytes(stream.len() as u64));
    group.bench_function("contiguous", |b| {
        b.iter(|| decode_whole(&stream));
    });
    group.bench_function("chunks_of_7", |b| {
        b.iter(|| {
            let mut decoder = FrameDecoder::with_sink(-1, CollectSink::new());
            for piece in stream.chunks(7) {
                decoder.consume(piece).unwrap();
            }
            decoder.sink().map(CollectSink::len).unwrap_or_default()
        });
    });
    group.finish();
}

fn bench_decode_large_message(c: &mut Criterion) {
    let mut enc = FrameEncoder::new();
    enc.add_message(vec![0xF0; 1 << 20]);
    let stream = enc.encode().unwrap();

    let mut group = c.benchmark_group("decode_large_message");
    group.throughput(Throughput::Bytes(stream.len() as u64));
    group.bench_function("1MiB", |b| {
        b.iter(|| decode_whole(&stream));
    });
    group.finish();
}

criterion_group!(benches, bench_decode_small_messages, bench_decode_large_message);
criterion_main!(benches);

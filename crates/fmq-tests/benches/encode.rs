use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use fmq_encoder::{FrameEncoder, write_message};
use fmq_msg::Message;

fn bench_encode_small_messages(c: &mut Criterion) {
    let payloads: Vec<Vec<u8>> = (0..1000u32)
        .map(|i| i.to_be_bytes().repeat(8))
        .collect();
    let total: usize = payloads.iter().map(|p| p.len() + 2).sum();

    let mut group = c.benchmark_group("encode_small_messages");
    group.throughput(Throughput::Bytes(total as u64));
    group.bench_function("builder", |b| {
        b.iter(|| {
            let mut enc = FrameEncoder::new();
            for payload in &payloads {
                enc.add_message(payload.clone());
            }
            enc.encode().unwrap().len()
        });
    });
    group.finish();
}

fn bench_encode_large_message(c: &mut Criterion) {
    let message = Message::from_payload(vec![0x0F; 1 << 20]);

    let mut group = c.benchmark_group("encode_large_message");
    group.throughput(Throughput::Bytes((1 << 20) + 9));
    group.bench_function("1MiB", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity((1 << 20) + 9);
            write_message(&message, &mut out).unwrap()
        });
    });
    group.finish();
}

criterion_group!(benches, bench_encode_small_messages, bench_encode_large_message);
criterion_main!(benches);

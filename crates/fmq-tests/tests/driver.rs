//! End-to-end runs through the read drivers: reader → decoder → sink,
//! with fragmented sources, truncation, and the large-payload direct
//! fill path.

use std::io::Cursor;

use fmq_decoder::DecodeError;
use fmq_driver::{AsyncReadDriver, DriverConfig, DriverError, ReadDriver};
use fmq_encoder::FrameEncoder;
use fmq_msg::CollectSink;
use fmq_tests::{SliverReader, shape};

fn sample_stream() -> Vec<u8> {
    let mut enc = FrameEncoder::new();
    enc.add_multipart([b"id".to_vec(), b"payload".to_vec()])
        .add_message(Vec::new())
        .add_message(vec![0x77; 700]);
    enc.encode().unwrap()
}

#[test]
fn driver_decodes_a_fragmented_source() {
    let stream = sample_stream();
    let reference = shape(&fmq_tests::decode_all(&stream, -1).unwrap());

    for sliver in [1, 2, 3, 7, 64] {
        let reader = SliverReader::new(stream.clone(), sliver);
        let mut driver = ReadDriver::new(reader, DriverConfig::default(), CollectSink::new());
        driver.run().unwrap();

        let (_, decoder) = driver.into_parts();
        let messages = decoder
            .sink()
            .map(|s| s.messages().to_vec())
            .unwrap_or_default();
        assert_eq!(shape(&messages), reference, "sliver {sliver}");
    }
}

#[test]
fn driver_enforces_the_configured_maximum() {
    let stream = sample_stream();
    let config = DriverConfig::default().with_max_message_size(100);
    let mut driver = ReadDriver::new(Cursor::new(stream), config, CollectSink::new());

    let err = driver.run().unwrap_err();
    assert!(matches!(
        err,
        DriverError::Decode(DecodeError::OversizedMessage {
            length: 700,
            max: 100
        })
    ));
}

#[test]
fn truncated_source_is_distinguished_from_clean_eof() {
    let mut stream = sample_stream();
    stream.pop(); // last payload byte missing

    let mut driver = ReadDriver::new(
        Cursor::new(stream),
        DriverConfig::default(),
        CollectSink::new(),
    );
    let err = driver.run().unwrap_err();
    assert!(matches!(err, DriverError::TruncatedStream { missing: 1 }));
}

#[test]
fn tiny_staging_buffer_forces_the_direct_path() {
    let stream = sample_stream();
    let config = DriverConfig::default().with_read_buffer_size(8);
    let mut driver = ReadDriver::new(Cursor::new(stream), config, CollectSink::new());
    driver.run().unwrap();

    let messages = driver.decoder().sink().unwrap().messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[3].len(), 700);
}

#[tokio::test]
async fn async_driver_matches_the_blocking_driver() {
    let stream = sample_stream();
    let reference = shape(&fmq_tests::decode_all(&stream, -1).unwrap());

    let reader = tokio::io::BufReader::new(Cursor::new(stream));
    let mut driver = AsyncReadDriver::new(reader, DriverConfig::default(), CollectSink::new());
    driver.run().await.unwrap();

    let (_, decoder) = driver.into_parts();
    let messages = decoder
        .sink()
        .map(|s| s.messages().to_vec())
        .unwrap_or_default();
    assert_eq!(shape(&messages), reference);
}

#[tokio::test]
async fn async_driver_reports_truncation() {
    let reader = tokio::io::BufReader::new(Cursor::new(vec![0x00, 0x04, b'a']));
    let mut driver = AsyncReadDriver::new(reader, DriverConfig::default(), CollectSink::new());
    let err = driver.run().await.unwrap_err();
    assert!(matches!(err, DriverError::TruncatedStream { missing: 3 }));
}

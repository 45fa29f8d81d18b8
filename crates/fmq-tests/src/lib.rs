//! Shared helpers for the fmq integration tests and benchmarks:
//! misbehaving sinks, fragmenting readers, and decode-everything
//! conveniences.

#![warn(clippy::pedantic)]

use fmq_decoder::{DecodeError, FrameDecoder};
use fmq_msg::{CollectSink, Message, MessageSink, PushError};

/// Sink that always reports backpressure.
#[derive(Debug, Default)]
pub struct WouldBlockSink;

impl MessageSink for WouldBlockSink {
    fn push(&mut self, msg: Message) -> Result<(), PushError> {
        Err(PushError::would_block(msg))
    }
}

/// Sink that refuses every message for a non-backpressure reason.
#[derive(Debug, Default)]
pub struct RefusingSink;

impl MessageSink for RefusingSink {
    fn push(&mut self, msg: Message) -> Result<(), PushError> {
        Err(PushError::rejected(msg))
    }
}

/// Sink that accepts a fixed number of messages, then applies
/// backpressure.
#[derive(Debug)]
pub struct QuotaSink {
    remaining: usize,
    accepted: Vec<Message>,
}

impl QuotaSink {
    #[must_use]
    pub fn new(quota: usize) -> Self {
        Self {
            remaining: quota,
            accepted: Vec::new(),
        }
    }

    #[must_use]
    pub fn accepted(&self) -> &[Message] {
        &self.accepted
    }
}

impl MessageSink for QuotaSink {
    fn push(&mut self, msg: Message) -> Result<(), PushError> {
        if self.remaining == 0 {
            return Err(PushError::would_block(msg));
        }
        self.remaining -= 1;
        self.accepted.push(msg);
        Ok(())
    }
}

/// Reader that hands out its data in fixed-size slivers, regardless of
/// how much the caller asks for.
#[derive(Debug)]
pub struct SliverReader {
    data: Vec<u8>,
    pos: usize,
    sliver: usize,
}

impl SliverReader {
    #[must_use]
    pub fn new(data: Vec<u8>, sliver: usize) -> Self {
        Self {
            data,
            pos: 0,
            sliver: sliver.max(1),
        }
    }
}

impl std::io::Read for SliverReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self
            .sliver
            .min(buf.len())
            .min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Decode a complete stream in one call and return the messages.
///
/// # Errors
///
/// Propagates any [`DecodeError`] from the decoder.
pub fn decode_all(stream: &[u8], max_message_size: i64) -> Result<Vec<Message>, DecodeError> {
    let mut decoder = FrameDecoder::with_sink(max_message_size, CollectSink::new());
    decoder.consume(stream)?;
    Ok(decoder
        .take_sink()
        .map(CollectSink::into_messages)
        .unwrap_or_default())
}

/// Decode a complete stream fed in `chunk`-sized pieces.
///
/// # Errors
///
/// Propagates any [`DecodeError`] from the decoder.
pub fn decode_chunked(
    stream: &[u8],
    chunk: usize,
    max_message_size: i64,
) -> Result<Vec<Message>, DecodeError> {
    let mut decoder = FrameDecoder::with_sink(max_message_size, CollectSink::new());
    for piece in stream.chunks(chunk.max(1)) {
        decoder.consume(piece)?;
    }
    Ok(decoder
        .take_sink()
        .map(CollectSink::into_messages)
        .unwrap_or_default())
}

/// Project messages to comparable (more, payload) pairs.
#[must_use]
pub fn shape(messages: &[Message]) -> Vec<(bool, Vec<u8>)> {
    messages
        .iter()
        .map(|m| (m.has_more(), m.payload().to_vec()))
        .collect()
}

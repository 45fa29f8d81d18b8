use bytes::{Buf, BytesMut};
use fmq_decoder::FrameDecoder;
use fmq_msg::MessageSink;
use tracing::{debug, trace};

use crate::config::DriverConfig;
use crate::error::DriverError;

/// Blocking read driver: pumps a [`std::io::Read`] source through a
/// [`FrameDecoder`] until the stream ends.
///
/// The driver owns the accumulation half of the contract the decoder
/// declares: it keeps reading until the decoder's open requirement is
/// satisfied, then lets the decoder step. Small requirements (headers,
/// small payloads) are batched through a staging buffer so the source
/// is not read two bytes at a time; once the decoder asks for at least
/// a full staging buffer's worth, reads land directly in the message's
/// own storage.
///
/// ```text
///                     required() < staging capacity
/// reader ──▶ staging ─────────────────────────────▶ decoder.space()
///    │                                                    ▲
///    └────────────────────────────────────────────────────┘
///                     required() >= staging capacity
/// ```
///
/// A [`run`](Self::run) that failed with a recoverable delivery error
/// (no sink, sink rejection) can be called again after the sink is
/// fixed up via [`decoder_mut`](Self::decoder_mut); the pending message
/// is delivered before any new bytes are read.
#[derive(Debug)]
pub struct ReadDriver<R, S> {
    reader: R,
    decoder: FrameDecoder<S>,
    staging: BytesMut,
    capacity: usize,
}

impl<R: std::io::Read, S: MessageSink> ReadDriver<R, S> {
    /// Create a driver delivering to `sink`.
    pub fn new(reader: R, config: DriverConfig, sink: S) -> Self {
        Self::with_decoder(
            reader,
            config.read_buffer_size,
            FrameDecoder::with_sink(config.max_message_size, sink),
        )
    }

    /// Create a driver around an existing decoder (which may be
    /// mid-frame, or have no sink yet).
    pub fn with_decoder(reader: R, read_buffer_size: usize, decoder: FrameDecoder<S>) -> Self {
        let capacity = read_buffer_size.max(1);
        Self {
            reader,
            decoder,
            staging: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    pub fn decoder(&self) -> &FrameDecoder<S> {
        &self.decoder
    }

    pub fn decoder_mut(&mut self) -> &mut FrameDecoder<S> {
        &mut self.decoder
    }

    /// Tear the driver apart, keeping the reader and decoder.
    pub fn into_parts(self) -> (R, FrameDecoder<S>) {
        (self.reader, self.decoder)
    }

    /// Pump the reader until clean end of stream.
    ///
    /// Returns `Ok(())` when the source reports EOF on a frame boundary
    /// with nothing pending.
    ///
    /// # Errors
    ///
    /// [`DriverError::Decode`] when the decoder fails (including a
    /// pending delivery that cannot complete),
    /// [`DriverError::TruncatedStream`] when EOF lands inside a frame,
    /// [`DriverError::Io`] when the reader fails.
    pub fn run(&mut self) -> Result<(), DriverError> {
        loop {
            // Run every satisfied step first; this is also what retries
            // a delivery left pending by an earlier failed run.
            while self.decoder.ready() {
                self.decoder.step()?;
            }

            // Drain staged bytes before touching the reader.
            if !self.staging.is_empty() {
                let take = self.decoder.required().min(self.staging.len());
                self.decoder.space()[..take].copy_from_slice(&self.staging[..take]);
                self.decoder.advance(take);
                self.staging.advance(take);
                continue;
            }

            let required = self.decoder.required();
            if required >= self.capacity {
                // Large requirement: skip staging, fill the message
                // buffer straight from the source.
                let n = self.reader.read(self.decoder.space())?;
                if n == 0 {
                    return self.end_of_stream();
                }
                trace!(bytes = n, "read directly into message storage");
                self.decoder.advance(n);
            } else {
                self.staging.resize(self.capacity, 0);
                let n = self.reader.read(&mut self.staging[..])?;
                self.staging.truncate(n);
                if n == 0 {
                    return self.end_of_stream();
                }
            }
        }
    }

    fn end_of_stream(&self) -> Result<(), DriverError> {
        if self.decoder.at_frame_boundary() {
            Ok(())
        } else {
            let missing = self.decoder.required();
            debug!(missing, "stream ended inside a frame");
            Err(DriverError::TruncatedStream { missing })
        }
    }
}

use bytes::{Buf, BytesMut};
use fmq_decoder::FrameDecoder;
use fmq_msg::MessageSink;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

use crate::config::DriverConfig;
use crate::error::DriverError;

/// Asynchronous read driver — [`ReadDriver`](crate::ReadDriver) over a
/// [`tokio::io::AsyncRead`] source.
///
/// Identical semantics to the blocking driver: staged small reads,
/// direct fill for large requirements, clean-EOF vs truncation
/// distinction, and re-runnable after a recoverable delivery failure.
/// The decoder itself stays synchronous; only the byte acquisition
/// awaits.
#[derive(Debug)]
pub struct AsyncReadDriver<R, S> {
    reader: R,
    decoder: FrameDecoder<S>,
    staging: BytesMut,
    capacity: usize,
}

impl<R: AsyncRead + Unpin, S: MessageSink> AsyncReadDriver<R, S> {
    /// Create a driver delivering to `sink`.
    pub fn new(reader: R, config: DriverConfig, sink: S) -> Self {
        Self::with_decoder(
            reader,
            config.read_buffer_size,
            FrameDecoder::with_sink(config.max_message_size, sink),
        )
    }

    /// Create a driver around an existing decoder.
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
    /// # Errors
    ///
    /// Same conditions as [`ReadDriver::run`](crate::ReadDriver::run).
    pub async fn run(&mut self) -> Result<(), DriverError> {
        loop {
            while self.decoder.ready() {
                self.decoder.step()?;
            }

            if !self.staging.is_empty() {
                let take = self.decoder.required().min(self.staging.len());
                self.decoder.space()[..take].copy_from_slice(&self.staging[..take]);
                self.decoder.advance(take);
                self.staging.advance(take);
                continue;
            }

            let required = self.decoder.required();
            if required >= self.capacity {
                let n = self.reader.read(self.decoder.space()).await?;
                if n == 0 {
                    return self.end_of_stream();
                }
                trace!(bytes = n, "read directly into message storage");
                self.decoder.advance(n);
            } else {
                self.staging.resize(self.capacity, 0);
                let n = self.reader.read(&mut self.staging[..]).await?;
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

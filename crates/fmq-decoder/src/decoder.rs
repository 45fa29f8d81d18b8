use fmq_msg::{Message, MessageSink, PushErrorKind};
use fmq_wire::flags::MsgFlags;
use fmq_wire::frame::{FLAGS_LEN, LONG_LENGTH_LEN, MAX_FRAME_LENGTH, SHORT_LENGTH_LEN};

use crate::error::DecodeError;

/// Where the decoder currently is in the frame cycle.
///
/// The payload state owns the in-progress message, so the fill target
/// and the state can never disagree about which buffer is being
/// written.
#[derive(Debug)]
enum Step {
    /// Waiting for the 1-byte flags field.
    Flags,
    /// Waiting for the 1-byte length field.
    ShortLength,
    /// Waiting for the 8-byte big-endian length field.
    LongLength,
    /// Waiting for the payload to fill, or for a filled payload to be
    /// delivered.
    Payload { message: Message },
}

/// Incremental decoder for a length-prefixed framed byte stream.
///
/// The decoder is a synchronous step machine driven from outside: after
/// every completed step it declares how many bytes it needs next and
/// which buffer they belong in, and the driver is responsible for
/// getting them there — possibly one byte at a time, across any number
/// of reads.
///
/// ```text
///           ┌──────▶ ShortLength (need 1) ──────┐
/// Flags ────┤                                   ├──▶ Payload (need N) ──▶ deliver ──▶ Flags
/// (need 1)  └──────▶ LongLength  (need 8) ──────┘                            │
///                                                                 push to sink, by move
/// ```
///
/// Two interfaces drive it:
///
/// - **Requirement-driven** (what a transport driver uses): fill
///   [`space`](Self::space) with up to [`required`](Self::required)
///   bytes, record them with [`advance`](Self::advance), and call
///   [`step`](Self::step) whenever [`ready`](Self::ready) is true.
///   Reads can land directly in `space()` — for payloads that is the
///   message's own storage, so large messages are never staged through
///   an intermediate buffer.
/// - **Chunk-driven** (tests, simple embeddings):
///   [`consume`](Self::consume) copies from a slice and runs steps as
///   requirements fill.
///
/// A completed message is pushed to the sink before any further bytes
/// are requested. Size limits are enforced before the payload buffer
/// is allocated, so a hostile length field never causes a large
/// allocation. Validation failures and sink backpressure poison the
/// instance permanently; see [`DecodeError`].
#[derive(Debug)]
pub struct FrameDecoder<S> {
    step: Step,
    /// Staging for the flags byte and the length field only. Payload
    /// bytes never pass through here.
    scratch: [u8; LONG_LENGTH_LEN],
    /// Total bytes the current step needs.
    needed: usize,
    /// Bytes of the current requirement received so far.
    filled: usize,
    /// Flags resolved for the message currently being decoded. Reset
    /// at the start of every cycle.
    msg_flags: MsgFlags,
    /// Maximum accepted payload length; negative means unlimited.
    max_message_size: i64,
    sink: Option<S>,
    terminal: Option<DecodeError>,
}

impl<S: MessageSink> FrameDecoder<S> {
    /// Create a decoder with no sink attached.
    ///
    /// A sink must be attached with [`set_sink`](Self::set_sink) before
    /// the first message completes, otherwise delivery fails with
    /// [`DecodeError::NoSink`].
    #[must_use]
    pub fn new(max_message_size: i64) -> Self {
        Self {
            step: Step::Flags,
            scratch: [0u8; LONG_LENGTH_LEN],
            needed: FLAGS_LEN,
            filled: 0,
            msg_flags: MsgFlags::NONE,
            max_message_size,
            sink: None,
            terminal: None,
        }
    }

    /// Create a decoder delivering to `sink`.
    #[must_use]
    pub fn with_sink(max_message_size: i64, sink: S) -> Self {
        let mut decoder = Self::new(max_message_size);
        decoder.sink = Some(sink);
        decoder
    }

    /// Replace the sink. Decoder state is untouched — an undelivered
    /// message stays pending and will be pushed to the new sink.
    pub fn set_sink(&mut self, sink: S) {
        self.sink = Some(sink);
    }

    /// Detach and return the current sink, if any.
    pub fn take_sink(&mut self) -> Option<S> {
        self.sink.take()
    }

    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    /// Bytes still required before the next step can run.
    #[must_use]
    pub fn required(&self) -> usize {
        self.needed - self.filled
    }

    /// True when the current requirement is satisfied and
    /// [`step`](Self::step) will make progress.
    #[must_use]
    pub fn ready(&self) -> bool {
        self.filled >= self.needed
    }

    /// The unfilled remainder of the current target buffer.
    ///
    /// The driver writes incoming bytes here (any prefix of it) and
    /// reports them with [`advance`](Self::advance). Empty once the
    /// requirement is satisfied.
    pub fn space(&mut self) -> &mut [u8] {
        let range = self.filled..self.needed;
        match &mut self.step {
            Step::Payload { message } => &mut message.payload_mut()[range],
            _ => &mut self.scratch[range],
        }
    }

    /// Record that `n` bytes were written into [`space`](Self::space).
    ///
    /// Counts beyond the open requirement are ignored.
    pub fn advance(&mut self, n: usize) {
        self.filled = (self.filled + n).min(self.needed);
    }

    /// True exactly while a fully received message is waiting to be
    /// delivered: one more step with zero new bytes will make forward
    /// progress.
    #[must_use]
    pub fn stalled(&self) -> bool {
        self.terminal.is_none() && self.ready() && matches!(self.step, Step::Payload { .. })
    }

    /// The error that poisoned this decoder, if any.
    #[must_use]
    pub fn error(&self) -> Option<DecodeError> {
        self.terminal
    }

    /// True when the decoder sits between frames with nothing partial
    /// buffered — the byte stream may end here cleanly.
    #[must_use]
    pub fn at_frame_boundary(&self) -> bool {
        matches!(self.step, Step::Flags) && self.filled == 0
    }

    /// Run one state handler.
    ///
    /// A no-op when the current requirement is not yet satisfied.
    ///
    /// # Errors
    ///
    /// Returns the poisoning error on every call once the decoder has
    /// failed terminally, [`DecodeError::NoSink`] /
    /// [`DecodeError::SinkRejected`] when delivery fails recoverably,
    /// and the sticky validation or backpressure errors otherwise.
    pub fn step(&mut self) -> Result<(), DecodeError> {
        if let Some(err) = self.terminal {
            return Err(err);
        }
        if !self.ready() {
            return Ok(());
        }

        match std::mem::replace(&mut self.step, Step::Flags) {
            Step::Flags => {
                self.flags_ready();
                Ok(())
            }
            Step::ShortLength => self.short_length_ready(),
            Step::LongLength => self.long_length_ready(),
            Step::Payload { message } => self.message_ready(message),
        }
    }

    /// Feed a chunk of the stream, running steps as requirements fill.
    ///
    /// Returns the number of bytes taken from `data`; the count equals
    /// `data.len()` unless an error cut the call short. Completed
    /// messages are delivered along the way. Feeding an empty slice is
    /// meaningful: it retries a pending delivery (see
    /// [`stalled`](Self::stalled)).
    ///
    /// # Errors
    ///
    /// Same conditions as [`step`](Self::step). On error, bytes of
    /// `data` past the failing frame have not been taken.
    pub fn consume(&mut self, data: &[u8]) -> Result<usize, DecodeError> {
        let mut consumed = 0;
        loop {
            while self.ready() {
                self.step()?;
            }
            if consumed == data.len() {
                return Ok(consumed);
            }
            let take = self.required().min(data.len() - consumed);
            self.space()[..take].copy_from_slice(&data[consumed..consumed + take]);
            self.advance(take);
            consumed += take;
        }
    }

    fn next_step(&mut self, step: Step, needed: usize) {
        self.step = step;
        self.needed = needed;
        self.filled = 0;
    }

    fn flags_ready(&mut self) {
        let wire = MsgFlags::from_raw(self.scratch[0]);

        // Fresh flags every cycle; only MORE survives onto the message.
        self.msg_flags = if wire.has_more() {
            MsgFlags::MORE
        } else {
            MsgFlags::NONE
        };

        if wire.is_large() {
            self.next_step(Step::LongLength, LONG_LENGTH_LEN);
        } else {
            self.next_step(Step::ShortLength, SHORT_LENGTH_LEN);
        }
    }

    fn short_length_ready(&mut self) -> Result<(), DecodeError> {
        let length = u64::from(self.scratch[0]);
        self.check_maximum(length)?;
        self.begin_payload(length);
        Ok(())
    }

    fn long_length_ready(&mut self) -> Result<(), DecodeError> {
        // The payload length is an unsigned 64-bit integer, most
        // significant byte first.
        let length = u64::from_be_bytes(self.scratch);
        self.check_maximum(length)?;
        if length > MAX_FRAME_LENGTH {
            return Err(self.fail(DecodeError::SizeOverflow { length }));
        }
        self.begin_payload(length);
        Ok(())
    }

    #[allow(clippy::cast_sign_loss)]
    fn check_maximum(&mut self, length: u64) -> Result<(), DecodeError> {
        if self.max_message_size >= 0 && length > self.max_message_size as u64 {
            return Err(self.fail(DecodeError::OversizedMessage {
                length,
                max: self.max_message_size,
            }));
        }
        Ok(())
    }

    /// Allocate the message buffer and make it the fill target. Runs
    /// only after `length` has passed validation.
    fn begin_payload(&mut self, length: u64) {
        #[allow(clippy::cast_possible_truncation)]
        let size = length as usize;
        let mut message = Message::with_size(size);
        message.set_flags(self.msg_flags);
        self.next_step(Step::Payload { message }, size);
    }

    fn message_ready(&mut self, message: Message) -> Result<(), DecodeError> {
        let Some(sink) = self.sink.as_mut() else {
            // Keep the message pending; a sink may be attached later.
            self.step = Step::Payload { message };
            return Err(DecodeError::NoSink);
        };

        match sink.push(message) {
            Ok(()) => {
                self.next_step(Step::Flags, FLAGS_LEN);
                Ok(())
            }
            Err(refused) => {
                let kind = refused.kind;
                self.step = Step::Payload {
                    message: refused.message,
                };
                match kind {
                    PushErrorKind::WouldBlock => Err(self.fail(DecodeError::SinkBackpressure)),
                    PushErrorKind::Rejected => Err(DecodeError::SinkRejected),
                }
            }
        }
    }

    fn fail(&mut self, err: DecodeError) -> DecodeError {
        self.terminal = Some(err);
        err
    }
}

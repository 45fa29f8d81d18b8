use crate::message::Message;

/// Downstream consumer of fully decoded messages.
///
/// `push` transfers ownership of the message on success. On failure the
/// message travels back inside [`PushError`], so the caller keeps it
/// and can retry or discard — nothing is cloned or reference-counted
/// across the hand-off.
///
/// ```text
/// Decode path:
///   payload complete ──▶ sink.push(msg) ──▶ Ok(())           message is the sink's
///                                       └─▶ Err(PushError)   message comes back
/// ```
///
/// The error kind distinguishes backpressure (`WouldBlock`) from every
/// other rejection cause; consumers that can be temporarily full must
/// report `WouldBlock` rather than a generic rejection, because the two
/// have different consequences upstream.
pub trait MessageSink {
    /// Accept a completed message.
    ///
    /// # Errors
    ///
    /// Returns [`PushError`] carrying the rejected message and the
    /// rejection kind.
    fn push(&mut self, msg: Message) -> Result<(), PushError>;
}

/// Why a sink refused a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushErrorKind {
    /// The sink is applying backpressure and cannot accept the message
    /// right now.
    WouldBlock,

    /// Any other sink-side rejection.
    Rejected,
}

/// A refused push: the rejection kind plus the message itself, returned
/// to the caller unchanged.
#[derive(Debug, thiserror::Error)]
#[error("sink refused message ({kind:?}, {} bytes)", .message.len())]
pub struct PushError {
    pub message: Message,
    pub kind: PushErrorKind,
}

impl PushError {
    #[must_use]
    pub fn would_block(message: Message) -> Self {
        Self {
            message,
            kind: PushErrorKind::WouldBlock,
        }
    }

    #[must_use]
    pub fn rejected(message: Message) -> Self {
        Self {
            message,
            kind: PushErrorKind::Rejected,
        }
    }
}

/// Sink that accepts everything and keeps the messages in order.
///
/// The standard sink for tests, tooling, and any consumer that just
/// wants the decoded sequence in memory.
#[derive(Debug, Default)]
pub struct CollectSink {
    messages: Vec<Message>,
}

impl CollectSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Consume the sink and take the collected messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl MessageSink for CollectSink {
    fn push(&mut self, msg: Message) -> Result<(), PushError> {
        self.messages.push(msg);
        Ok(())
    }
}

#![warn(clippy::pedantic)]

pub mod message;
pub mod sink;

pub use message::Message;
pub use sink::{CollectSink, MessageSink, PushError, PushErrorKind};

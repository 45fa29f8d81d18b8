#![warn(clippy::pedantic)]

pub mod decoder;
pub mod error;

pub use decoder::FrameDecoder;
pub use error::DecodeError;

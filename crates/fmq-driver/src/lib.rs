#![warn(clippy::pedantic)]

pub mod config;
pub mod driver;
pub mod error;
pub mod streaming;

pub use config::DriverConfig;
pub use driver::ReadDriver;
pub use error::DriverError;
pub use streaming::AsyncReadDriver;

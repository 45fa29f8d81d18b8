/// Configuration for a read driver.
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────────────┐
/// │ Field            │ Purpose                                          │
/// ├──────────────────┼──────────────────────────────────────────────────┤
/// │ read_buffer_size │ Staging buffer capacity; also the cutover point  │
/// │                  │ above which reads land directly in the message   │
/// │ max_message_size │ Largest accepted payload; negative = unlimited   │
/// └──────────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DriverConfig {
    /// Capacity of the staging buffer that batches small socket reads.
    /// When the decoder asks for at least this many bytes in one go,
    /// the driver bypasses staging and reads into the declared target
    /// directly.
    pub read_buffer_size: usize,

    /// Maximum accepted payload length, handed to the decoder.
    /// Negative means unlimited.
    pub max_message_size: i64,
}

impl Default for DriverConfig {
    /// 8 KiB staging buffer, no message size limit.
    fn default() -> Self {
        Self {
            read_buffer_size: 8192,
            max_message_size: -1,
        }
    }
}

impl DriverConfig {
    #[must_use]
    pub fn with_max_message_size(mut self, max_message_size: i64) -> Self {
        self.max_message_size = max_message_size;
        self
    }

    #[must_use]
    pub fn with_read_buffer_size(mut self, read_buffer_size: usize) -> Self {
        self.read_buffer_size = read_buffer_size;
        self
    }
}

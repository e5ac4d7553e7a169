//! Writer construction options

use serde::{Deserialize, Serialize};

/// Default initial buffer capacity in bytes
pub const DEFAULT_INITIAL_SIZE: usize = 1024;

/// How the buffer grows when a write does not fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GrowthStrategy {
    /// Double the capacity, or grow to the required size if doubling is not enough
    #[default]
    Doubling,
    /// Grow to exactly the required size
    ExactFit,
}

impl GrowthStrategy {
    /// Compute the new capacity for a buffer that must hold `required` bytes
    pub fn next_capacity(self, current: usize, required: usize) -> usize {
        match self {
            GrowthStrategy::Doubling => current.saturating_mul(2).max(required),
            GrowthStrategy::ExactFit => required,
        }
    }
}

/// Writer options
///
/// Recognized keys when deserialized: `initialSize` and `growthStrategy`.
/// Missing keys take their defaults.
///
/// # Usage Example
///
/// ```rust
/// use ber_writer::{BerWriter, GrowthStrategy, WriterOptions};
///
/// let options = WriterOptions::new()
///     .initial_size(64)
///     .growth_strategy(GrowthStrategy::ExactFit);
/// let writer = BerWriter::with_options(options);
/// assert_eq!(writer.capacity(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WriterOptions {
    /// Initial buffer capacity in bytes
    pub initial_size: usize,
    /// Buffer growth policy
    pub growth_strategy: GrowthStrategy,
}

impl WriterOptions {
    /// Create options with default settings
    ///
    /// # Default Settings
    /// - Initial size: 1024 bytes
    /// - Growth strategy: doubling
    pub fn new() -> Self {
        Self {
            initial_size: DEFAULT_INITIAL_SIZE,
            growth_strategy: GrowthStrategy::Doubling,
        }
    }

    /// Set the initial buffer capacity
    pub fn initial_size(mut self, size: usize) -> Self {
        self.initial_size = size;
        self
    }

    /// Set the buffer growth policy
    pub fn growth_strategy(mut self, strategy: GrowthStrategy) -> Self {
        self.growth_strategy = strategy;
        self
    }
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self::new()
    }
}

//! Store configuration.

/// How `begin_transaction` behaves while a transaction is already open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionMode {
    /// One transaction level. Beginning while active is an error.
    #[default]
    SingleLevel,
    /// Each `begin_transaction` pushes a new overlay layer.
    Nested,
}

/// Configuration for creating a store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Transaction nesting behaviour.
    pub mode: TransactionMode,

    /// Maximum number of open layers in nested mode (`None` = unlimited).
    ///
    /// Ignored in single-level mode, where the limit is always 1.
    pub max_depth: Option<usize>,

    /// Whether to maintain operation counters.
    pub track_stats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: TransactionMode::SingleLevel,
            max_depth: None,
            track_stats: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with nested transactions enabled.
    #[must_use]
    pub fn nested() -> Self {
        Self::default().mode(TransactionMode::Nested)
    }

    /// Sets the transaction mode.
    #[must_use]
    pub const fn mode(mut self, mode: TransactionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets whether to maintain operation counters.
    #[must_use]
    pub const fn track_stats(mut self, value: bool) -> Self {
        self.track_stats = value;
        self
    }

    /// Returns the number of layers that may be open at once.
    ///
    /// A nested limit of zero is treated as one.
    #[must_use]
    pub fn depth_limit(&self) -> Option<usize> {
        match self.mode {
            TransactionMode::SingleLevel => Some(1),
            TransactionMode::Nested => self.max_depth.map(|depth| depth.max(1)),
        }
    }
}

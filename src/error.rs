use thiserror::Error;

/// Errors raised while planning or replaying an isogeny chain strategy.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// There is no tree to build for a chain of length zero.
    #[error("chain length must be at least one, got {n}")]
    InvalidInput { n: usize },

    /// No (M, S, I) constants were registered for the requested bucket.
    #[error("no field cost constants for bucket {0}")]
    MissingCostBucket(usize),

    /// The optimiser did not record a split the conversion walk needs.
    #[error("no checkpoint recorded at height {height} (leftmost: {leftmost})")]
    MissingCheckpoint { leftmost: bool, height: usize },

    /// The modelled cost of every strategy reaches `u64::MAX` nanoseconds.
    #[error("cost of a chain of length {n} does not fit in 64 bits")]
    CostOverflow { n: usize },

    /// A doubling schedule does not describe a chain of the expected length.
    #[error("malformed doubling schedule: {0}")]
    MalformedSchedule(String),

    /// Calibration needs at least one timing sample.
    #[error("calibration needs at least one sample")]
    InvalidSampleCount,

    /// A cost table could not be parsed.
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

use thiserror::Error;

/// Errors raised by line encoders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineCodeError {
    /// A direct code outside the line code's symbol set. Caller bug.
    #[error("Incorrect input value {0}")]
    InvalidSymbol(i32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    #[error("trace capacity must be even and non-zero, got {0}")]
    InvalidCapacity(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("idle ratio must be at least 1 (one idle in N ticks), got {0}")]
    InvalidIdleRatio(u32),
    #[error("tick period must be non-zero")]
    ZeroTickPeriod,
    #[error(transparent)]
    Trace(#[from] TraceError),
}

/// Top-level error for a running session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    LineCode(#[from] LineCodeError),
    #[error("renderer failed: {0}")]
    Render(#[from] std::io::Error),
}

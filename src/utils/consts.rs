/// 日志级别（可被 RUST_LOG 覆盖）
pub const LOG_LEVEL: &str = "info";

/// 程序名称
pub const APP_NAME: &str = "pam5-scope";

// ============================================================================
// Trace window
// ============================================================================

/// Waveform samples kept in the trace window (two per symbol)
pub const CACHE_SIZE: usize = 512;

/// Time advanced per accepted symbol
pub const SYMBOL_DURATION: f64 = 1.0;

/// Constant Y position of the decoded label track
pub const LABEL_TRACK_LEVEL: f64 = -3.0;

/// Text used for placeholder and idle labels
pub const BLANK_LABEL: &str = " ";

// Axis geometry
pub const Y_MAX_VALUE: f64 = 3.0;
pub const Y_MIN_VALUE: f64 = -3.5;
pub const X_MAX_VALUE: f64 = 20.0;
pub const X_MIN_VALUE: f64 = 0.0;

/// Scroll once the newest sample gets this close to the right edge
pub const AXIS_SCROLL_MARGIN: f64 = 2.0;

/// Width of the visible X span
pub const AXIS_SPAN: f64 = 20.0;

// ============================================================================
// Timer / generator
// ============================================================================

/// Auto-fill timer period (毫秒)
pub const TICK_PERIOD_MS: u64 = 500;

/// One idle symbol per this many random ticks on average
pub const IDLE_ONE_IN: u32 = 20;

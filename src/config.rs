use std::time::Duration;

use crate::error::{ConfigError, TraceError};
use crate::line_coding::LineCodingKind;
use crate::utils::consts::*;

/// Session settings for the controller.
#[derive(Clone, Debug)]
pub struct ControllerConfig {
    pub line_coding: LineCodingKind,
    /// Waveform samples kept in the window (two per symbol)
    pub capacity: usize,
    pub tick_period: Duration,
    /// Feed the trace from the timer
    pub auto_fill: bool,
    /// Random symbols on timer ticks instead of idle
    pub randomize: bool,
    /// One idle gap per this many random ticks on average
    pub idle_one_in: u32,
    pub seed: Option<u64>,
    /// Stop the session after this many timer ticks
    pub max_ticks: Option<u64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            line_coding: LineCodingKind::default(),
            capacity: CACHE_SIZE,
            tick_period: Duration::from_millis(TICK_PERIOD_MS),
            auto_fill: false,
            randomize: false,
            idle_one_in: IDLE_ONE_IN,
            seed: None,
            max_ticks: None,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 || self.capacity % 2 != 0 {
            return Err(TraceError::InvalidCapacity(self.capacity).into());
        }
        if self.tick_period.is_zero() {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.idle_one_in == 0 {
            return Err(ConfigError::InvalidIdleRatio(self.idle_one_in));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.capacity, 512);
        assert_eq!(config.tick_period, Duration::from_millis(500));
        assert_eq!(config.idle_one_in, 20);
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = ControllerConfig {
            capacity: 3,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Trace(TraceError::InvalidCapacity(3)))
        );

        let config = ControllerConfig {
            tick_period: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickPeriod));

        let config = ControllerConfig {
            idle_one_in: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidIdleRatio(0)));
    }
}

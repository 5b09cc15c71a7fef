//! Rotation driver for gallery displays.
//!
//! [`RotationDriver`] pulls samples from a [`CollectionSource`](crate::CollectionSource)
//! and pushes them to a [`GallerySink`]. After the first render it re-samples
//! every [`RotationConfig::period`] and swaps the displayed set. Hovering
//! pauses rotation; leaving resumes it with the default limit.

mod driver;
mod sink;
mod state;

use std::time::Duration;

use crate::{FeedError, Result};

pub use driver::RotationDriver;
pub use sink::GallerySink;
pub use state::{RotationState, Transition};

/// Default rotation period.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(8_000);

/// Default number of tokens shown.
pub const DEFAULT_LIMIT: usize = 12;

/// Rotation driver settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationConfig {
    /// Re-sample on a timer after the first render (default: true).
    pub enabled: bool,
    /// Time between rotations (default: 8 s).
    pub period: Duration,
    /// Limit used by hover resume and retry (default: 12).
    pub default_limit: usize,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            period: DEFAULT_PERIOD,
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl RotationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Check the settings a timer can run with. A zero period is rejected.
    pub fn validate(&self) -> Result<()> {
        if self.period.is_zero() {
            return Err(FeedError::Configuration(
                "rotation period must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RotationConfig::default();
        assert!(config.enabled);
        assert_eq!(config.period, Duration::from_secs(8));
        assert_eq!(config.default_limit, 12);
    }

    #[test]
    fn zero_period_is_rejected() {
        let err = RotationConfig::new().period(Duration::ZERO).validate().unwrap_err();
        assert!(matches!(err, FeedError::Configuration(_)));
        assert!(RotationConfig::default().validate().is_ok());
    }

    #[test]
    fn state_display() {
        assert_eq!(RotationState::Paused.to_string(), "paused");
        assert_eq!(RotationState::default(), RotationState::Idle);
    }
}

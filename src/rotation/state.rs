//! Rotation driver states and render transitions.

use std::fmt;

/// Where the driver is in its lifecycle.
///
/// ```text
/// Idle ─► Loading ─► Displaying ⇄ Rotating
///            │           │  ▲
///            ▼           ▼  │ hover out
///          Error       Paused
///
/// any state ─► Destroyed (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationState {
    /// Created, nothing rendered yet.
    #[default]
    Idle,
    /// Placeholder shown, waiting for the first sample.
    Loading,
    /// Tokens (or the empty state) on screen; timer running if enabled.
    Displaying,
    /// Timer fired, fetching the next sample.
    Rotating,
    /// Timer cancelled by a hover; content kept.
    Paused,
    /// Initial load produced nothing renderable; waiting for `retry()`.
    Error,
    /// Timer cancelled and sink detached. Terminal.
    Destroyed,
}

impl RotationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Displaying => "displaying",
            Self::Rotating => "rotating",
            Self::Paused => "paused",
            Self::Error => "error",
            Self::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for RotationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a sink should bring new content on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Replace immediately (initial render).
    None,
    /// Animated swap of the previous set (timer-driven rotation).
    Swap,
}

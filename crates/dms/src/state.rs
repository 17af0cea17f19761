//! Per-face alert state

use serde::{Deserialize, Serialize};

/// Debounced drowsiness state of one face
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertState {
    #[default]
    Awake,
    /// Violating, but not yet for long enough
    Warning,
    /// Violation sustained for the required number of frames
    Alert,
}

impl AlertState {
    /// Level implied by a violation counter
    pub fn from_counter(counter: u32, required: u32) -> Self {
        if counter == 0 {
            AlertState::Awake
        } else if counter < required {
            AlertState::Warning
        } else {
            AlertState::Alert
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertState::Awake => "AWAKE",
            AlertState::Warning => "WARNING",
            AlertState::Alert => "ALERT",
        }
    }
}

/// Result of feeding one observation to a face's state.
///
/// Carries both the level (`current`) and what it was before, so consumers
/// can act on edges instead of re-triggering every frame an alert is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub previous: AlertState,
    pub current: AlertState,
    /// Consecutive violating frames after this update
    pub counter: u32,
}

impl StateUpdate {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }

    /// Edge into ALERT
    pub fn entered_alert(&self) -> bool {
        self.current == AlertState::Alert && self.previous != AlertState::Alert
    }

    /// Edge out of ALERT
    pub fn cleared_alert(&self) -> bool {
        self.previous == AlertState::Alert && self.current != AlertState::Alert
    }

    /// ALERT level held from the previous frame
    pub fn holding_alert(&self) -> bool {
        self.previous == AlertState::Alert && self.current == AlertState::Alert
    }
}

/// Violation counter and current state for one tracked face.
///
/// Plain data with a single owner: distinct faces can be updated on
/// different threads, but updates to one face must not interleave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackedFaceState {
    counter: u32,
    state: AlertState,
}

impl TrackedFaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn state(&self) -> AlertState {
        self.state
    }

    /// Advance by one frame. A violating frame bumps the counter up to
    /// `required`; any clean frame drops it straight back to zero.
    pub fn observe(&mut self, violating: bool, required: u32) -> StateUpdate {
        let required = required.max(1);
        let previous = self.state;

        self.counter = if violating {
            self.counter.saturating_add(1).min(required)
        } else {
            0
        };
        self.state = AlertState::from_counter(self.counter, required);

        StateUpdate {
            previous,
            current: self.state,
            counter: self.counter,
        }
    }

    /// Return to AWAKE with an empty counter
    pub fn reset(&mut self) -> StateUpdate {
        let previous = self.state;
        *self = Self::default();
        StateUpdate {
            previous,
            current: AlertState::Awake,
            counter: 0,
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two states of the intersection's traffic light.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightState {
    #[default]
    Red,
    Green,
}

impl LightState {
    /// The state the light switches to next.
    pub fn toggled(self) -> Self {
        match self {
            LightState::Red => LightState::Green,
            LightState::Green => LightState::Red,
        }
    }
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightState::Red => write!(f, "Red"),
            LightState::Green => write!(f, "Green"),
        }
    }
}

/// Why a pass attempt ended in a crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrashReason {
    RanRedLight,
    HitCarInFront,
}

impl fmt::Display for CrashReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrashReason::RanRedLight => write!(f, "tried to run a red light"),
            CrashReason::HitCarInFront => write!(f, "hit a car in front of it"),
        }
    }
}

/// Result of a single pass attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassAttemptResult {
    pub is_success: bool,
    /// Set only when `is_success` is false.
    pub crash_reason: Option<CrashReason>,
}

impl PassAttemptResult {
    pub fn passed() -> Self {
        Self {
            is_success: true,
            crash_reason: None,
        }
    }

    pub fn crashed(reason: CrashReason) -> Self {
        Self {
            is_success: false,
            crash_reason: Some(reason),
        }
    }
}

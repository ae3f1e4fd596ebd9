//! Timing profiles for the reveal animation

use serde::{Deserialize, Serialize};

/// Timing profile for a reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RevealProfile {
    /// Reference gameplay timing
    #[default]
    Normal,
    /// Fast mode
    Turbo,
    /// Near-instant, for tests and tooling
    Studio,
    /// Custom scaled timing
    Custom,
}

/// Reveal timing configuration.
///
/// The roll duration doubles as the engine's completion timer: the visual
/// transition and the state transition are declared from the same number,
/// which is what keeps them in lockstep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RevealTiming {
    pub profile: RevealProfile,
    /// Scroll duration from roll start to landing (ms)
    pub roll_duration_ms: f64,
}

impl RevealTiming {
    /// Reference timing: 6.3 s scroll matching the declared easing curve
    pub fn normal() -> Self {
        Self {
            profile: RevealProfile::Normal,
            roll_duration_ms: 6300.0,
        }
    }

    /// Fast mode
    pub fn turbo() -> Self {
        Self {
            profile: RevealProfile::Turbo,
            roll_duration_ms: 1500.0,
        }
    }

    /// Near-instant reveals for tests and tooling
    pub fn studio() -> Self {
        Self {
            profile: RevealProfile::Studio,
            roll_duration_ms: 10.0,
        }
    }

    pub fn from_profile(profile: RevealProfile) -> Self {
        match profile {
            RevealProfile::Normal | RevealProfile::Custom => Self::normal(),
            RevealProfile::Turbo => Self::turbo(),
            RevealProfile::Studio => Self::studio(),
        }
    }

    /// Scale the duration by a factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            profile: RevealProfile::Custom,
            roll_duration_ms: self.roll_duration_ms * factor,
        }
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self::normal()
    }
}

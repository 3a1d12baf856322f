use std::fmt;
use std::str::FromStr;

use crate::foundation::error::ScanwipeError;

const BACK_C1: f64 = 1.70158;
const BACK_C3: f64 = BACK_C1 + 1.0;

/// Easing curve applied to a phase's local progress.
///
/// Outputs are not clamped: the `*Back` curves overshoot `[0, 1]`, which shows up as the glow line
/// briefly travelling past its endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    /// `x`
    #[default]
    Linear,
    /// `x²`
    EaseIn,
    /// `1 - (1-x)²`
    EaseOut,
    /// Quadratic in for the first half, quadratic out for the second.
    EaseInOut,
    /// Cubic anticipation: dips below 0 before accelerating.
    EaseInBack,
    /// Cubic overshoot: passes 1 before settling.
    EaseOutBack,
}

impl Ease {
    /// All supported curves, in declaration order.
    pub const ALL: [Ease; 6] = [
        Ease::Linear,
        Ease::EaseIn,
        Ease::EaseOut,
        Ease::EaseInOut,
        Ease::EaseInBack,
        Ease::EaseOutBack,
    ];

    /// Map normalized progress `t` to eased progress.
    ///
    /// `t` is clamped to `[0, 1]`; the result is not.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::EaseInBack => BACK_C3 * t * t * t - BACK_C1 * t * t,
            Self::EaseOutBack => {
                1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2)
            }
        }
    }

    /// Stable camelCase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "easeIn",
            Self::EaseOut => "easeOut",
            Self::EaseInOut => "easeInOut",
            Self::EaseInBack => "easeInBack",
            Self::EaseOutBack => "easeOutBack",
        }
    }
}

impl FromStr for Ease {
    type Err = ScanwipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ScanwipeError::validation(format!("unknown easing '{wanted}'")))
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;

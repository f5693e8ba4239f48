/// Easing curves applied to a normalized segment position in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    /// No easing.
    Linear,
    /// `t²`.
    InQuad,
    /// Quadratic deceleration.
    OutQuad,
    /// Quadratic acceleration, then deceleration.
    InOutQuad,
    /// `t³`.
    InCubic,
    /// Cubic deceleration.
    OutCubic,
    /// Cubic acceleration, then deceleration.
    InOutCubic,
    /// Cubic ease-in for the first half, quadratic ease-out for the second half.
    ///
    /// Used for audio fades: quiet start, smooth tail.
    InCubicOutQuad,
}

impl Ease {
    /// Eased value of `t`, clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InCubicOutQuad => {
                if t < 0.5 {
                    t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;

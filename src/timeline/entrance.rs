use crate::{
    animation::interp::{Curve, interpolate, lerp},
    animation::spring::SpringParams,
    foundation::core::Fps,
    foundation::error::{ReelError, ReelResult},
};

/// How an item's entrance progress advances after its trigger frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntranceStrategy {
    /// Spring physics. Items with `index < fast_count` use `fast`, the rest `slow`.
    Spring {
        /// Spring for the opening items.
        fast: SpringParams,
        /// Spring for later items.
        slow: SpringParams,
        /// Items below this index use `fast`.
        fast_count: usize,
    },
    /// Plain ramp over `duration_frames`.
    Linear {
        /// Ramp length in frames.
        duration_frames: u32,
    },
}

impl Default for EntranceStrategy {
    fn default() -> Self {
        Self::Spring {
            fast: SpringParams::FAST,
            slow: SpringParams::SLOW,
            fast_count: 2,
        }
    }
}

impl EntranceStrategy {
    /// Spring parameters must be valid and a linear duration non-zero.
    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Spring { fast, slow, .. } => {
                fast.validate()?;
                slow.validate()
            }
            Self::Linear { duration_frames } => {
                if *duration_frames == 0 {
                    return Err(ReelError::validation(
                        "linear entrance duration must be > 0 frames",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Spring driving item `index`, or `None` for a linear entrance.
    pub fn spring_for(&self, index: usize) -> Option<SpringParams> {
        match *self {
            Self::Spring {
                fast,
                slow,
                fast_count,
            } => Some(if index < fast_count { fast } else { slow }),
            Self::Linear { .. } => None,
        }
    }

    /// Progress in `[0, 1]`, flat at its starting value for `frame <= trigger_frame`.
    pub fn progress(&self, frame: i64, trigger_frame: i64, index: usize, fps: Fps) -> f64 {
        match *self {
            Self::Spring { .. } => self
                .spring_for(index)
                .map_or(0.0, |s| s.progress(frame, trigger_frame, fps)),
            Self::Linear { duration_frames } => linear_progress(frame, trigger_frame, duration_frames),
        }
    }
}

/// `clamp((frame - trigger_frame) / duration_frames, 0, 1)`.
///
/// A zero duration jumps straight to 1 at the trigger frame.
pub fn linear_progress(frame: i64, trigger_frame: i64, duration_frames: u32) -> f64 {
    let elapsed = frame.saturating_sub(trigger_frame) as f64;
    interpolate(elapsed, [0.0, f64::from(duration_frames)], [0.0, 1.0])
}

/// Opacity as a function of entrance progress (or of local frames, for [`OpacityCurve::Ramp`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OpacityCurve {
    /// `opacity = progress`.
    Linear,
    /// Reaches 0.7 at 10% progress, then eases to 1.
    #[default]
    PopIn,
    /// Independent fade over `duration_frames` after the trigger.
    Ramp {
        /// Fade length in frames.
        duration_frames: u32,
    },
}

impl OpacityCurve {
    const POP_IN_INPUTS: [f64; 3] = [0.0, 0.1, 1.0];
    const POP_IN_OUTPUTS: [f64; 3] = [0.0, 0.7, 1.0];

    /// Opacity in `[0, 1]`.
    pub fn opacity(&self, progress: f64, local_frame: i64) -> f64 {
        let v = match *self {
            Self::Linear => lerp(0.0, 1.0, progress),
            Self::PopIn => {
                let [x0, x1, x2] = Self::POP_IN_INPUTS;
                let [y0, y1, y2] = Self::POP_IN_OUTPUTS;
                if progress <= x1 {
                    interpolate(progress, [x0, x1], [y0, y1])
                } else {
                    interpolate(progress, [x1, x2], [y1, y2])
                }
            }
            Self::Ramp { duration_frames } => {
                linear_progress(local_frame, 0, duration_frames)
            }
        };
        v.clamp(0.0, 1.0)
    }

    /// The pop-in mapping as a reusable curve.
    pub fn pop_in_curve() -> ReelResult<Curve> {
        Curve::new(&Self::POP_IN_INPUTS, &Self::POP_IN_OUTPUTS)
    }
}

/// Extra vertical settle wobble added on top of the slide.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BounceWobble {
    /// Spring shaping the decay.
    pub spring: SpringParams,
    /// Pixel offset at the trigger frame, decaying to 0.
    pub amplitude: f64,
}

impl Default for BounceWobble {
    fn default() -> Self {
        Self {
            spring: SpringParams::BOUNCE,
            amplitude: 20.0,
        }
    }
}

impl BounceWobble {
    /// Wobble offset at `local_frame` frames after the trigger.
    pub fn offset(&self, local_frame: i64, fps: Fps) -> f64 {
        (1.0 - self.spring.position(local_frame as f64, fps)) * self.amplitude
    }
}

/// Everything that shapes an item's entrance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EntranceConfig {
    /// How progress advances.
    pub strategy: EntranceStrategy,
    /// How opacity follows progress.
    pub opacity: OpacityCurve,
    /// Slide-in distance in pixels (start offset below the resting position).
    pub slide_distance: f64,
    /// Slide-in distance for intro-tier items, when it differs.
    pub intro_slide_distance: Option<f64>,
    /// Optional settle wobble.
    pub bounce: Option<BounceWobble>,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            strategy: EntranceStrategy::default(),
            opacity: OpacityCurve::PopIn,
            slide_distance: 120.0,
            intro_slide_distance: None,
            bounce: None,
        }
    }
}

impl EntranceConfig {
    /// Player-list entrance: 30-frame slide for the opening cards only, 40-frame fade, bounce.
    pub fn player_list(opacity_transition_frames: u32) -> Self {
        Self {
            strategy: EntranceStrategy::Linear {
                duration_frames: 30,
            },
            opacity: OpacityCurve::Ramp {
                duration_frames: opacity_transition_frames,
            },
            slide_distance: 0.0,
            intro_slide_distance: Some(200.0),
            bounce: Some(BounceWobble::default()),
        }
    }

    /// Check the strategy, opacity ramp, distances and bounce.
    pub fn validate(&self) -> ReelResult<()> {
        self.strategy.validate()?;
        if let OpacityCurve::Ramp { duration_frames: 0 } = self.opacity {
            return Err(ReelError::validation("opacity ramp must be > 0 frames"));
        }
        for d in std::iter::once(self.slide_distance).chain(self.intro_slide_distance) {
            if !d.is_finite() {
                return Err(ReelError::validation("slide distance must be finite"));
            }
        }
        if let Some(b) = self.bounce {
            b.spring.validate()?;
            if !b.amplitude.is_finite() {
                return Err(ReelError::validation("bounce amplitude must be finite"));
            }
        }
        Ok(())
    }

    /// Slide distance for an item in or out of the intro tier.
    pub fn slide_distance_for(&self, intro_tier: bool) -> f64 {
        match (intro_tier, self.intro_slide_distance) {
            (true, Some(d)) => d,
            _ => self.slide_distance,
        }
    }

    /// `lerp(distance, 0, progress)`.
    pub fn translate_y(&self, progress: f64, intro_tier: bool) -> f64 {
        lerp(self.slide_distance_for(intro_tier), 0.0, progress)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/entrance.rs"]
mod tests;

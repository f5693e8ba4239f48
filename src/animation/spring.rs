use crate::{
    foundation::core::Fps,
    foundation::error::{ReelError, ReelResult},
};

/// Longest simulated step per frame. Low frame rates advance the spring by at most this much
/// per frame, matching hosts that cap their physics delta time.
const MAX_STEP_SECS: f64 = 0.064;

/// Damped harmonic oscillator driving a value from 0 toward 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringParams {
    /// Damping coefficient, `>= 0`.
    pub damping: f64,
    /// Mass, `> 0`.
    pub mass: f64,
    /// Spring constant, `> 0`.
    pub stiffness: f64,
    /// Stop at the target instead of overshooting it.
    #[serde(default)]
    pub overshoot_clamping: bool,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            damping: 10.0,
            mass: 1.0,
            stiffness: 100.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringParams {
    /// Snappy preset for the first cards on screen.
    pub const FAST: Self = Self {
        damping: 13.0,
        mass: 1.1,
        stiffness: 110.0,
        overshoot_clamping: false,
    };

    /// Heavier preset for the rest of the list.
    pub const SLOW: Self = Self {
        damping: 15.0,
        mass: 1.4,
        stiffness: 90.0,
        overshoot_clamping: false,
    };

    /// Light, bouncy preset used for the settle wobble after a slide-in.
    pub const BOUNCE: Self = Self {
        damping: 10.0,
        mass: 0.5,
        stiffness: 90.0,
        overshoot_clamping: false,
    };

    /// Reject non-finite or non-physical parameters.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(ReelError::validation("spring mass must be > 0"));
        }
        if !self.stiffness.is_finite() || self.stiffness <= 0.0 {
            return Err(ReelError::validation("spring stiffness must be > 0"));
        }
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(ReelError::validation("spring damping must be >= 0"));
        }
        Ok(())
    }

    /// Damping ratio ζ. Below 1 the spring overshoots.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Spring value after `elapsed_frames` frames, starting at rest at 0 with target 1.
    ///
    /// Negative elapsed time is treated as zero. The value may exceed 1 unless
    /// `overshoot_clamping` is set.
    pub fn position(&self, elapsed_frames: f64, fps: Fps) -> f64 {
        let frames = if elapsed_frames.is_nan() {
            0.0
        } else {
            elapsed_frames.max(0.0)
        };
        let t = frames * step_secs(fps);

        let zeta = self.damping_ratio();
        let omega0 = self.natural_frequency();

        // Displacement from target at t=0 is 1, initial velocity is 0.
        let x = if zeta < 1.0 {
            let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega0 * t).exp();
            envelope * ((omega1 * t).sin() * (zeta * omega0 / omega1) + (omega1 * t).cos())
        } else {
            (-omega0 * t).exp() * (1.0 + omega0 * t)
        };

        let value = 1.0 - x;
        if self.overshoot_clamping {
            value.min(1.0)
        } else {
            value
        }
    }

    /// Entrance progress at global `frame` for an animation that starts at `trigger_frame`.
    ///
    /// Flat at 0 until triggered, always within `[0, 1]`.
    pub fn progress(&self, frame: i64, trigger_frame: i64, fps: Fps) -> f64 {
        let elapsed = frame.saturating_sub(trigger_frame).max(0);
        self.position(elapsed as f64, fps).clamp(0.0, 1.0)
    }
}

fn step_secs(fps: Fps) -> f64 {
    fps.frame_duration_secs().min(MAX_STEP_SECS)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;

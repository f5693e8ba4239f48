use crate::{
    animation::{ease::Ease, interp::Curve},
    foundation::error::{ReelError, ReelResult},
};

/// Background-music volume as a keyframed curve over the main sequence.
///
/// Frames are main-sequence local frames; the curve is clamped on both sides, so the volume
/// before the first stop and after the last stop holds the boundary value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct VolumeEnvelope {
    curve: Curve,
}

/// Named envelope shapes selectable from composition configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumePreset {
    /// Long, slow swell, then a two-step fade over the last 15 seconds.
    #[default]
    Gentle,
    /// Half-volume plateau with a 30-frame fade in and a 10-second fade out.
    Simple,
    /// No music.
    Mute,
}

impl VolumeEnvelope {
    /// Wrap `curve`, whose outputs must lie in `[0, 1]`.
    pub fn new(curve: Curve) -> ReelResult<Self> {
        if curve.outputs().iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Err(ReelError::validation("volume stops must be within [0, 1]"));
        }
        Ok(Self { curve })
    }

    /// Eased swell over the first 240 frames, a hold, then a fade over the last 15 seconds.
    pub fn gentle(total_frames: u64, fps: u32) -> ReelResult<Self> {
        let total = total_frames as f64;
        let fps = f64::from(fps);
        let inputs = [
            0.0,
            40.0,
            80.0,
            120.0,
            160.0,
            200.0,
            240.0,
            total - 15.0 * fps,
            total - 5.0 * fps,
            total,
        ];
        let outputs = [0.0, 0.03, 0.08, 0.15, 0.25, 0.4, 0.6, 0.6, 0.3, 0.0];
        Self::from_stops(&inputs, &outputs, Ease::InCubicOutQuad)
    }

    /// Linear fade to half volume, hold, and a 10-second fade out.
    pub fn simple(total_frames: u64, fps: u32) -> ReelResult<Self> {
        let total = total_frames as f64;
        let inputs = [0.0, 30.0, total - 10.0 * f64::from(fps), total];
        Self::from_stops(&inputs, &[0.0, 0.5, 0.5, 0.0], Ease::Linear)
    }

    /// Envelope for `preset`; `None` for [`VolumePreset::Mute`].
    pub fn preset(preset: VolumePreset, total_frames: u64, fps: u32) -> ReelResult<Option<Self>> {
        match preset {
            VolumePreset::Gentle => Self::gentle(total_frames, fps).map(Some),
            VolumePreset::Simple => Self::simple(total_frames, fps).map(Some),
            VolumePreset::Mute => Ok(None),
        }
    }

    fn from_stops(inputs: &[f64], outputs: &[f64], ease: Ease) -> ReelResult<Self> {
        let curve = Curve::new(inputs, outputs).map_err(|e| {
            ReelError::validation(format!(
                "composition too short for the volume envelope: {e}"
            ))
        })?;
        Self::new(curve.with_ease(ease))
    }

    /// Volume in `[0, 1]` at a main-sequence local frame.
    pub fn volume_at(&self, local_frame: i64) -> f64 {
        self.curve.sample(local_frame as f64).clamp(0.0, 1.0)
    }

    /// Underlying keyframe curve.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/volume.rs"]
mod tests;

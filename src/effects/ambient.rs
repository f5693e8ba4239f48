//! Decorative, configuration-driven curves layered over the card strip.

use crate::{
    animation::interp::interpolate,
    foundation::error::{ReelError, ReelResult},
};

/// Watermark rotation in degrees: one full turn over `duration_frames`, scaled by `speed`.
pub fn watermark_rotation_deg(frame: i64, duration_frames: u64, speed: f64) -> f64 {
    interpolate(
        frame as f64 * speed,
        [0.0, duration_frames as f64],
        [0.0, 360.0],
    )
}

/// Fade-in of the ending sequence over its first 30 frames.
pub fn ending_fade(frame_since_ending: i64) -> f64 {
    interpolate(frame_since_ending as f64, [0.0, 30.0], [0.0, 1.0])
}

/// Character-by-character reveal of a short message.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypedText {
    glyphs: Vec<String>,
}

impl TypedText {
    /// Split `text` into reveal units. Spaces that are not the last character widen to two
    /// spaces so word gaps stay readable in a monospaced reveal.
    pub fn new(text: &str) -> Self {
        let count = text.chars().count();
        let glyphs = text
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if c == ' ' && i + 1 < count {
                    "  ".to_string()
                } else {
                    c.to_string()
                }
            })
            .collect();
        Self { glyphs }
    }

    /// Glyphs in reveal order.
    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    /// Fractional reveal position: `interpolate(frame, [0, duration], [0, char_count])`.
    pub fn reveal_progress(&self, frame: i64, duration_frames: u64) -> f64 {
        interpolate(
            frame as f64,
            [0.0, duration_frames as f64],
            [0.0, self.glyphs.len() as f64],
        )
    }

    /// Number of glyphs shown (glyph `i` is shown while `i < reveal_progress`).
    pub fn visible_chars(&self, frame: i64, duration_frames: u64) -> usize {
        let p = self.reveal_progress(frame, duration_frames);
        (p.ceil().max(0.0) as usize).min(self.glyphs.len())
    }

    /// Revealed text at `frame`.
    pub fn visible_text(&self, frame: i64, duration_frames: u64) -> String {
        self.glyphs[..self.visible_chars(frame, duration_frames)].concat()
    }
}

/// Periodic overlay badge (e.g. a channel handle) shown in short windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OverlayWindow {
    /// First frame the overlay may appear.
    pub start: i64,
    /// Frames between window starts.
    pub interval: u32,
    /// Window length in frames.
    pub window: u32,
    /// Slide/fade length at each end of the window.
    pub ramp: u32,
}

/// Overlay appearance at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct OverlayState {
    /// Whether `frame` lies inside a window.
    pub visible: bool,
    /// Fade envelope in `[0, 1]`.
    pub opacity: f64,
    /// Vertical slide in pixels: -60 when hidden above the frame, 0 when in place.
    pub offset_y: f64,
}

impl OverlayState {
    const HIDDEN_OFFSET: f64 = -60.0;

    fn hidden() -> Self {
        Self {
            visible: false,
            opacity: 0.0,
            offset_y: Self::HIDDEN_OFFSET,
        }
    }
}

impl OverlayWindow {
    /// Every `interval_secs` seconds for `window_secs` seconds, starting `first_secs` after
    /// `start`, with 10-frame ramps.
    pub fn every(start: i64, fps: u32, first_secs: u32, interval_secs: u32, window_secs: u32) -> Self {
        Self {
            start: start.saturating_add(i64::from(first_secs) * i64::from(fps)),
            interval: interval_secs.saturating_mul(fps),
            window: window_secs.saturating_mul(fps),
            ramp: 10,
        }
    }

    /// Interval and window must be non-zero, and the window must fit in the interval.
    pub fn validate(&self) -> ReelResult<()> {
        if self.interval == 0 {
            return Err(ReelError::validation("overlay interval must be > 0 frames"));
        }
        if self.window == 0 || self.window > self.interval {
            return Err(ReelError::validation(
                "overlay window must be within 1..=interval frames",
            ));
        }
        if u64::from(self.ramp) * 2 > u64::from(self.window) {
            return Err(ReelError::validation(
                "overlay ramps must fit inside the window",
            ));
        }
        Ok(())
    }

    /// Frame offset inside the current window, if any.
    fn phase(&self, frame: i64) -> Option<i64> {
        if frame < self.start || self.interval == 0 {
            return None;
        }
        let phase = (frame - self.start).rem_euclid(i64::from(self.interval));
        (phase < i64::from(self.window)).then_some(phase)
    }

    /// `frame >= start && (frame - start) mod interval < window`.
    pub fn is_visible(&self, frame: i64) -> bool {
        self.phase(frame).is_some()
    }

    /// Opacity `0 -> 1 -> 1 -> 0` and slide `-60 -> 0 -> 0 -> -60` across the window.
    pub fn envelope(&self, frame: i64) -> OverlayState {
        let Some(phase) = self.phase(frame) else {
            return OverlayState::hidden();
        };
        let phase = phase as f64;
        let window = f64::from(self.window);
        let ramp = f64::from(self.ramp);

        let opacity = if phase < window / 2.0 {
            interpolate(phase, [0.0, ramp], [0.0, 1.0])
        } else {
            interpolate(phase, [window - ramp, window], [1.0, 0.0])
        };
        OverlayState {
            visible: true,
            opacity,
            offset_y: OverlayState::HIDDEN_OFFSET * (1.0 - opacity),
        }
    }
}

/// Slide offsets (percent of element height) of the intro title block.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct IntroTitle {
    /// Logo drop, `0 -> 5` over 15 frames.
    pub logo_offset: f64,
    /// Title rise, `100 -> 0` over 25 frames.
    pub title_offset: f64,
    /// Subtitle rise, `100 -> 0` between frames 15 and 40.
    pub subtitle_offset: f64,
}

impl IntroTitle {
    /// Offsets at intro-local `frame`.
    pub fn at(frame: i64) -> Self {
        let f = frame as f64;
        Self {
            logo_offset: interpolate(f, [0.0, 15.0], [0.0, 5.0]),
            title_offset: interpolate(f, [0.0, 25.0], [100.0, 0.0]),
            subtitle_offset: interpolate(f, [15.0, 40.0], [100.0, 0.0]),
        }
    }
}

/// Profile image reveal inside a card.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ProfileImageState {
    /// Highlight sweep position in percent, `-100 -> 100`.
    pub gradient_position: f64,
    /// Ring fill in percent, `0 -> 100`.
    pub border_fill: f64,
    /// Fade in over 20 frames.
    pub opacity: f64,
    /// Zoom, `0.8 -> 1` over 30 frames.
    pub scale: f64,
}

/// Profile image reveal at card-local `local_frame` for a card shown `duration_frames`.
pub fn profile_image(local_frame: i64, duration_frames: u32) -> ProfileImageState {
    let f = local_frame.max(0) as f64;
    let d = f64::from(duration_frames);
    ProfileImageState {
        gradient_position: interpolate(f, [0.0, d], [-100.0, 100.0]),
        border_fill: interpolate(f, [0.0, d], [0.0, 100.0]),
        opacity: interpolate(f, [0.0, 20.0], [0.0, 1.0]),
        scale: interpolate(f, [0.0, 30.0], [0.8, 1.0]),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/ambient.rs"]
mod tests;

use crate::{
    animation::interp::interpolate,
    foundation::error::{ReelError, ReelResult},
};

/// Horizontal card strip geometry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Card width plus gap; also the scroll step.
    pub item_width: f64,
    /// Distance from screen center back to the first card.
    pub start_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            item_width: 650.0,
            start_offset: 1300.0,
        }
    }
}

impl LayoutConfig {
    /// Item width must be positive and both values finite.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.item_width.is_finite() || self.item_width <= 0.0 {
            return Err(ReelError::validation("item width must be > 0"));
        }
        if !self.start_offset.is_finite() {
            return Err(ReelError::validation("start offset must be finite"));
        }
        Ok(())
    }

    /// `screen_width / 2 - start_offset + index * item_width`.
    pub fn static_position(&self, index: usize, screen_width: f64) -> f64 {
        screen_width / 2.0 - self.start_offset + (index as f64) * self.item_width
    }

    /// Offset at which the strip rests after scrolling past all but the last card.
    pub fn scroll_extent(&self, item_count: usize) -> f64 {
        -self.item_width * (item_count.saturating_sub(1) as f64)
    }
}

/// When the strip scrolls, on the same frame axis the caller evaluates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScrollConfig {
    /// Frames of entrance animation before scrolling starts.
    pub main_animation_frames: i64,
    /// Length of the scroll, at least one frame.
    pub scroll_duration_frames: u32,
}

impl ScrollConfig {
    /// Entrance phase of `initial_delay + 4 * card_entry`, then scroll for the rest of
    /// `total_main_frames` (at least one frame).
    pub fn from_durations(total_main_frames: u64, initial_delay: u32, card_entry: u32) -> Self {
        let main_animation_frames = i64::from(initial_delay) + 4 * i64::from(card_entry);
        let remaining = i64::try_from(total_main_frames)
            .unwrap_or(i64::MAX)
            .saturating_sub(main_animation_frames);
        Self {
            main_animation_frames,
            scroll_duration_frames: u32::try_from(remaining.max(1)).unwrap_or(u32::MAX),
        }
    }

    /// Same window moved later by `frames`.
    pub fn shifted(self, frames: i64) -> Self {
        Self {
            main_animation_frames: self.main_animation_frames.saturating_add(frames),
            ..self
        }
    }

    /// Scroll duration must be non-zero.
    pub fn validate(&self) -> ReelResult<()> {
        if self.scroll_duration_frames == 0 {
            return Err(ReelError::validation("scroll duration must be > 0 frames"));
        }
        Ok(())
    }

    /// Horizontal strip offset at `frame`: 0 until the entrance phase ends, then linearly
    /// down to `layout.scroll_extent(item_count)`, flat afterwards.
    pub fn scroll_offset(&self, frame: i64, layout: &LayoutConfig, item_count: usize) -> f64 {
        let extent = layout.scroll_extent(item_count);
        if extent == 0.0 {
            return 0.0;
        }
        let elapsed = frame.saturating_sub(self.main_animation_frames) as f64;
        interpolate(
            elapsed,
            [0.0, f64::from(self.scroll_duration_frames)],
            [0.0, extent],
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/layout.rs"]
mod tests;

use crate::{
    foundation::core::Fps,
    foundation::error::{ReelError, ReelResult},
    timeline::entrance::EntranceConfig,
    timeline::item::ItemTimelineState,
    timeline::layout::{LayoutConfig, ScrollConfig},
    timeline::schedule::{Spacing, TriggerSchedule},
};

/// Immutable per-composition timing configuration.
///
/// Build with [`TimelineConfig::new`] (or deserialize and call [`TimelineConfig::validate`]);
/// every query method is total afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineConfig {
    /// Frames before the main sequence starts. May be zero or negative.
    pub intro_delay_frames: i64,
    /// See [`Spacing::card_entry`].
    pub card_entry_duration_frames: u32,
    /// See [`Spacing::stagger`].
    pub stagger_delay_frames: u32,
    /// Integer frame rate driving the springs.
    pub fps: Fps,
    /// Number of cards.
    pub item_count: usize,
    #[serde(default)]
    /// Trigger frame policy.
    pub schedule: TriggerSchedule,
    #[serde(default)]
    /// Entrance shaping.
    pub entrance: EntranceConfig,
    #[serde(default)]
    /// Static positions.
    pub layout: LayoutConfig,
    /// Scroll window.
    pub scroll: ScrollConfig,
}

impl TimelineConfig {
    /// Validated configuration with the default tiered schedule, spring entrance and layout.
    pub fn new(
        fps: Fps,
        item_count: usize,
        intro_delay_frames: i64,
        spacing: Spacing,
        scroll: ScrollConfig,
    ) -> ReelResult<Self> {
        let cfg = Self {
            intro_delay_frames,
            card_entry_duration_frames: spacing.card_entry,
            stagger_delay_frames: spacing.stagger,
            fps,
            item_count,
            schedule: TriggerSchedule::default(),
            entrance: EntranceConfig::default(),
            layout: LayoutConfig::default(),
            scroll,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Replace the trigger schedule.
    pub fn with_schedule(mut self, schedule: TriggerSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Replace the entrance after validating it.
    pub fn with_entrance(mut self, entrance: EntranceConfig) -> ReelResult<Self> {
        entrance.validate()?;
        self.entrance = entrance;
        Ok(self)
    }

    /// Replace the layout after validating it.
    pub fn with_layout(mut self, layout: LayoutConfig) -> ReelResult<Self> {
        layout.validate()?;
        self.layout = layout;
        Ok(self)
    }

    /// Check every part. Fractional frame rates are rejected.
    pub fn validate(&self) -> ReelResult<()> {
        self.fps.validate()?;
        if self.fps.den != 1 {
            return Err(ReelError::validation("timeline fps must be an integer rate"));
        }
        self.spacing().validate()?;
        self.entrance.validate()?;
        self.layout.validate()?;
        self.scroll.validate()
    }

    /// Spacing units as one value.
    pub fn spacing(&self) -> Spacing {
        Spacing {
            card_entry: self.card_entry_duration_frames,
            stagger: self.stagger_delay_frames,
        }
    }

    /// Global frame at which item `index` starts entering.
    pub fn trigger_frame(&self, index: usize) -> i64 {
        self.schedule
            .trigger_frame(index, self.intro_delay_frames, self.spacing())
    }

    /// Trigger frames for every item, in index order.
    pub fn trigger_frames(&self) -> Vec<i64> {
        (0..self.item_count).map(|i| self.trigger_frame(i)).collect()
    }

    /// Entrance progress in `[0, 1]` for item `index` at global `frame`.
    pub fn entrance_progress(&self, frame: i64, trigger_frame: i64, index: usize) -> f64 {
        self.entrance
            .strategy
            .progress(frame, trigger_frame, index, self.fps)
    }

    /// Strip offset at global `frame`.
    pub fn scroll_offset(&self, frame: i64) -> f64 {
        self.scroll
            .scroll_offset(frame, &self.layout, self.item_count)
    }

    /// Unscrolled x position of item `index`.
    pub fn static_position(&self, index: usize, screen_width: f64) -> f64 {
        self.layout.static_position(index, screen_width)
    }

    /// Full visual state of item `index` at global `frame`.
    pub fn item_state(&self, index: usize, frame: i64, screen_width: f64) -> ItemTimelineState {
        ItemTimelineState::evaluate(self, index, frame, screen_width)
    }

    /// States for every item at `frame`.
    pub fn item_states(&self, frame: i64, screen_width: f64) -> Vec<ItemTimelineState> {
        (0..self.item_count)
            .map(|i| self.item_state(i, frame, screen_width))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/config.rs"]
mod tests;

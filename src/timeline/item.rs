use crate::{
    foundation::core::{Transform2D, Vec2},
    timeline::config::TimelineConfig,
};

const CARD_SCALE: f64 = 1.0;

/// Per-frame visual state of one item. Recomputed from scratch every frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ItemTimelineState {
    /// Item index.
    pub index: usize,
    /// Frame the entrance starts.
    pub trigger_frame: i64,
    /// `max(0, frame - trigger_frame)`.
    pub local_frame: i64,
    /// Entrance progress in `[0, 1]`.
    pub progress: f64,
    /// Whether the item belongs to the opening group.
    pub intro_tier: bool,
    /// Layout position plus scroll offset, in pixels.
    pub x: f64,
    /// Downward offset from the resting position, in pixels.
    pub translate_y: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Card scale. Cards enter by sliding and fading only, so this stays `1.0`; the profile
    /// image zoom inside a card comes from [`crate::profile_image`].
    pub scale: f64,
}

impl ItemTimelineState {
    pub(crate) fn evaluate(
        cfg: &TimelineConfig,
        index: usize,
        frame: i64,
        screen_width: f64,
    ) -> Self {
        let trigger_frame = cfg.trigger_frame(index);
        let local_frame = frame.saturating_sub(trigger_frame).max(0);
        let progress = cfg.entrance_progress(frame, trigger_frame, index);
        let intro_tier = cfg.schedule.is_intro_tier(index);

        let mut translate_y = cfg.entrance.translate_y(progress, intro_tier);
        if let Some(bounce) = cfg.entrance.bounce {
            translate_y += bounce.offset(local_frame, cfg.fps);
        }

        Self {
            index,
            trigger_frame,
            local_frame,
            progress,
            intro_tier,
            x: cfg.static_position(index, screen_width) + cfg.scroll_offset(frame),
            translate_y,
            opacity: cfg.entrance.opacity.opacity(progress, local_frame),
            scale: CARD_SCALE,
        }
    }

    /// Whether the item has started entering.
    pub fn is_triggered(&self, frame: i64) -> bool {
        frame >= self.trigger_frame
    }

    /// Whether the item contributes anything to the frame.
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Card transform at this frame.
    pub fn transform(&self) -> Transform2D {
        Transform2D {
            translate: Vec2::new(self.x, self.translate_y),
            scale: Vec2::new(self.scale, self.scale),
            ..Transform2D::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/item.rs"]
mod tests;

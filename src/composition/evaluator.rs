use crate::{
    composition::model::{CompositionPlan, Sequence},
    effects::ambient::{IntroTitle, OverlayState, ending_fade, watermark_rotation_deg},
    foundation::core::FrameIndex,
    foundation::error::{ReelError, ReelResult},
    timeline::item::ItemTimelineState,
};

/// Everything the presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EvaluatedFrame {
    /// Global frame.
    pub frame: FrameIndex,
    /// Segment containing `frame`.
    pub sequence: Sequence,
    /// Frame relative to the start of `sequence`.
    pub local_frame: FrameIndex,
    /// Visible cards in index order. Empty outside the main sequence.
    pub items: Vec<ItemTimelineState>,
    /// Watermark rotation. Zero during the intro.
    pub watermark_rotation_deg: f64,
    /// Overlay badge, main sequence only.
    pub overlay: Option<OverlayState>,
    /// Title block offsets, intro only.
    pub intro: Option<IntroTitle>,
    /// Composition title, intro only.
    pub title: Option<String>,
    /// Caption drawn beside the watermark, when one is configured. Absent during the intro.
    pub watermark_text: Option<String>,
    /// Closing text state, ending only.
    pub ending: Option<EndingState>,
    /// Background music volume in `[0, 1]`.
    pub volume: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Closing sequence state.
pub struct EndingState {
    /// Text block opacity.
    pub fade: f64,
    /// Text revealed so far.
    pub text: String,
    /// Glyphs revealed so far.
    pub visible_chars: usize,
}

/// Maps a [`CompositionPlan`] and a frame to an [`EvaluatedFrame`].
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(plan))]
    /// Evaluate one global frame. Frames at or past the end are an evaluation error.
    pub fn eval_frame(plan: &CompositionPlan, frame: FrameIndex) -> ReelResult<EvaluatedFrame> {
        let cfg = &plan.config;
        let Some((sequence, local)) = cfg.sequence_at(frame) else {
            return Err(ReelError::evaluation(format!(
                "frame {} is out of bounds (total {})",
                frame.0,
                cfg.total_frames()
            )));
        };
        let local_i = local.as_i64();

        let mut out = EvaluatedFrame {
            frame,
            sequence,
            local_frame: local,
            items: Vec::new(),
            watermark_rotation_deg: 0.0,
            overlay: None,
            intro: None,
            title: None,
            watermark_text: None,
            ending: None,
            volume: 0.0,
        };

        match sequence {
            Sequence::Intro => {
                out.intro = Some(IntroTitle::at(local_i));
                out.title = Some(cfg.title.clone());
            }
            Sequence::Main => {
                let global = frame.as_i64();
                let width = f64::from(cfg.width);
                out.items = (0..plan.timeline.item_count)
                    .map(|i| plan.timeline.item_state(i, global, width))
                    .filter(ItemTimelineState::is_visible)
                    .collect();
                out.watermark_rotation_deg =
                    watermark_rotation_deg(local_i, cfg.main_duration(), cfg.watermark_speed);
                out.watermark_text = cfg.watermark_text.clone();
                out.overlay = plan.overlay.map(|w| w.envelope(global));
                out.volume = plan.volume.as_ref().map_or(0.0, |v| v.volume_at(local_i));
            }
            Sequence::Ending => {
                let duration = cfg.ending_frames();
                let visible_chars = plan.ending_text.visible_chars(local_i, duration);
                out.watermark_rotation_deg =
                    watermark_rotation_deg(local_i, duration, cfg.watermark_speed);
                out.watermark_text = cfg.watermark_text.clone();
                out.ending = Some(EndingState {
                    fade: ending_fade(local_i),
                    text: plan.ending_text.glyphs()[..visible_chars].concat(),
                    visible_chars,
                });
            }
        }

        Ok(out)
    }

    /// Evaluate each of `frames` in order, stopping at the first error.
    pub fn eval_range(
        plan: &CompositionPlan,
        frames: impl IntoIterator<Item = FrameIndex>,
    ) -> ReelResult<Vec<EvaluatedFrame>> {
        frames
            .into_iter()
            .map(|f| Self::eval_frame(plan, f))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/evaluator.rs"]
mod tests;

//! cardreel schedules and evaluates leaderboard-style "card list" videos.
//!
//! Every visual value is a pure function of `(frame, item index, configuration)`:
//!
//! - Load a [`CompositionConfig`] and a dataset of [`EntityRecord`]s
//! - Build a [`CompositionPlan`] (ordering, selection, derived [`TimelineConfig`])
//! - Evaluate any frame with [`Evaluator::eval_frame`], rasterize a storyboard with
//!   [`render_preview`], or export captions with [`build_cues`] / [`write_srt`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod audio;
pub(crate) mod captions;
pub(crate) mod composition;
pub(crate) mod dataset;
pub(crate) mod effects;
pub(crate) mod render;
pub(crate) mod timeline;

pub use crate::foundation::core::{
    Affine, Canvas, Fps, FrameIndex, FrameRange, Rgba8Premul, Transform2D, Vec2,
};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::interp::{Curve, interpolate, lerp};
pub use crate::animation::spring::SpringParams;
pub use crate::audio::volume::{VolumeEnvelope, VolumePreset};
pub use crate::captions::srt::{
    CaptionOptions, ClosingCue, Cue, Pacing, auto_pacing, build_cues, format_timestamp,
    write_srt,
};
pub use crate::composition::evaluator::{EndingState, EvaluatedFrame, Evaluator};
pub use crate::composition::model::{
    CompositionConfig, CompositionPlan, DataSources, OverlaySettings, RecordOrder, Sequence,
    Theme, ThemeMode,
};
pub use crate::dataset::order::{
    compare_leaderboard, order_by_join_date, order_leaderboard, select_cards,
};
pub use crate::dataset::record::{EntityRecord, clean_text, load_records, parse_date};
pub use crate::effects::ambient::{
    IntroTitle, OverlayState, OverlayWindow, ProfileImageState, TypedText, ending_fade,
    profile_image, watermark_rotation_deg,
};
pub use crate::render::preview::{FrameRGBA, PreviewOptions, PreviewRenderer, render_preview};
pub use crate::timeline::config::TimelineConfig;
pub use crate::timeline::entrance::{
    BounceWobble, EntranceConfig, EntranceStrategy, OpacityCurve, linear_progress,
};
pub use crate::timeline::item::ItemTimelineState;
pub use crate::timeline::layout::{LayoutConfig, ScrollConfig};
pub use crate::timeline::schedule::{Spacing, TailGap, TriggerSchedule, tiered_trigger_frame};

use std::io::Read;

use crate::{
    audio::volume::{VolumeEnvelope, VolumePreset},
    dataset::{
        order::{order_by_join_date, order_leaderboard},
        record::EntityRecord,
    },
    effects::ambient::{OverlayWindow, TypedText},
    foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8Premul},
    foundation::error::{ReelError, ReelResult},
    timeline::{
        config::TimelineConfig,
        entrance::{EntranceConfig, OpacityCurve},
        layout::{LayoutConfig, ScrollConfig},
        schedule::{Spacing, TailGap, TriggerSchedule},
    },
};

/// Fallback dataset path when no source is configured.
pub const DEFAULT_DATA_SOURCE: &str = "gaming/rrq_hoshi.json";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Background palette selector.
pub enum ThemeMode {
    #[default]
    /// Dark background (`#212121` by default).
    Dark,
    /// Light background (`#FFFFFF` by default).
    Light,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Background colors for both modes and the one in use.
pub struct Theme {
    /// Which background applies.
    pub mode: ThemeMode,
    /// Hex color used in [`ThemeMode::Dark`].
    pub dark_background: String,
    /// Hex color used in [`ThemeMode::Light`].
    pub light_background: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Dark,
            dark_background: "#212121".to_string(),
            light_background: "#FFFFFF".to_string(),
        }
    }
}

impl Theme {
    /// Hex string of the active background.
    pub fn background_hex(&self) -> &str {
        match self.mode {
            ThemeMode::Dark => &self.dark_background,
            ThemeMode::Light => &self.light_background,
        }
    }

    /// Active background as a color. Fails on a malformed hex string.
    pub fn background(&self) -> ReelResult<Rgba8Premul> {
        Rgba8Premul::from_hex(self.background_hex())
    }
}

/// Candidate dataset paths, resolved in priority order gaming > youtube > instagram.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DataSources {
    /// Highest-priority source.
    pub gaming: Option<String>,
    /// Used when `gaming` is unset or blank.
    pub youtube: Option<String>,
    /// Used when both other sources are unset or blank.
    pub instagram: Option<String>,
}

impl DataSources {
    /// First non-blank source, or [`DEFAULT_DATA_SOURCE`].
    pub fn active(&self) -> &str {
        [&self.gaming, &self.youtube, &self.instagram]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_DATA_SOURCE)
    }
}

/// How records are ordered before the first `cards_to_show` are taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrder {
    #[default]
    /// Unknown follower counts first, then ascending followers, newest join date, name.
    Leaderboard,
    /// Most recent join date first.
    JoinDate,
    /// Keep dataset order.
    AsLoaded,
}

/// Overlay badge timing in seconds, relative to the start of the main sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Delay before the first window.
    pub first_seconds: u32,
    /// How long each window stays open.
    pub window_seconds: u32,
    /// Repeat period; `None` shows the overlay once.
    pub interval_seconds: Option<u32>,
    /// Fade in/out length at each window edge.
    pub ramp_frames: u32,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            first_seconds: 10,
            window_seconds: 2,
            interval_seconds: None,
            ramp_frames: 10,
        }
    }
}

impl OverlaySettings {
    /// Overlay schedule on the global frame axis, for a main sequence starting at `main_start`.
    pub fn window(&self, main_start: i64, fps: u32) -> OverlayWindow {
        let mut w = OverlayWindow::every(
            main_start,
            fps,
            self.first_seconds,
            self.interval_seconds.unwrap_or(0),
            self.window_seconds,
        );
        if self.interval_seconds.is_none() {
            w.interval = u32::MAX;
        }
        w.ramp = self.ramp_frames;
        w
    }
}

/// File-level composition settings. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    /// Integer frame rate.
    pub fps: u32,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Maximum number of cards taken from the ordered dataset.
    pub cards_to_show: usize,
    /// Main-sequence time budget per card.
    pub seconds_per_card: u32,
    /// Intro length in frames.
    pub intro_delay: u32,
    /// Closing sequence length.
    pub ending_seconds: u32,
    /// Frames into the main sequence before the entrance phase starts.
    pub initial_delay: u32,
    /// Spacing between early cards, in frames.
    pub card_entry_duration: u32,
    /// Spacing between later cards, in frames.
    pub stagger_delay: u32,
    /// Fade length of the player-list entrance, in frames.
    pub opacity_transition_duration: u32,
    /// Gap between tail-tier cards of the tiered schedule.
    pub tail_gap: TailGap,
    /// Title shown during the intro.
    pub title: String,
    /// Caption drawn next to the watermark.
    pub watermark_text: Option<String>,
    /// Text typed out during the ending.
    pub ending_text: String,
    /// Watermark turns per sequence. Must be finite and non-negative.
    pub watermark_speed: f64,
    /// Background palette.
    pub theme: Theme,
    /// Where the dataset comes from when no path is given.
    pub data_source: DataSources,
    /// Record ordering before selection.
    pub order: RecordOrder,
    /// Background music envelope.
    pub volume: VolumePreset,
    /// Static card positions.
    pub layout: LayoutConfig,
    /// Trigger schedule override. Defaults to tiered with `tail_gap`.
    pub schedule: Option<TriggerSchedule>,
    /// Entrance override. See [`CompositionConfig::entrance_config`].
    pub entrance: Option<EntranceConfig>,
    /// Opacity curve override, applied on top of the entrance.
    pub opacity: Option<OpacityCurve>,
    /// Overlay badge timing. `None` disables the overlay.
    pub overlay: Option<OverlaySettings>,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            width: 2560,
            height: 1440,
            cards_to_show: 32,
            seconds_per_card: 6,
            intro_delay: 120,
            ending_seconds: 5,
            initial_delay: 30,
            card_entry_duration: 42,
            stagger_delay: 200,
            opacity_transition_duration: 40,
            tail_gap: TailGap::Frames(440),
            title: "MPL Indonesia".to_string(),
            watermark_text: None,
            ending_text: "Terima Kasih...".to_string(),
            watermark_speed: 1.0,
            theme: Theme::default(),
            data_source: DataSources::default(),
            order: RecordOrder::Leaderboard,
            volume: VolumePreset::Gentle,
            layout: LayoutConfig::default(),
            schedule: None,
            entrance: None,
            opacity: None,
            overlay: Some(OverlaySettings::default()),
        }
    }
}

/// Top-level segment of the composition timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sequence {
    /// Title sequence, `intro_delay` frames.
    Intro,
    /// Card sequence.
    Main,
    /// Closing sequence, `ending_seconds` long.
    Ending,
}

impl CompositionConfig {
    /// Parse JSON and validate.
    pub fn from_reader(reader: impl Read) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject zero sizes and rates, bad colors and invalid overrides.
    pub fn validate(&self) -> ReelResult<()> {
        Fps::integer(self.fps)?;
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        if self.cards_to_show == 0 {
            return Err(ReelError::validation("cards_to_show must be > 0"));
        }
        if self.seconds_per_card == 0 {
            return Err(ReelError::validation("seconds_per_card must be > 0"));
        }
        self.spacing().validate()?;
        if self.opacity_transition_duration == 0 {
            return Err(ReelError::validation(
                "opacity_transition_duration must be > 0 frames",
            ));
        }
        if !self.watermark_speed.is_finite() || self.watermark_speed < 0.0 {
            return Err(ReelError::validation(
                "watermark_speed must be finite and >= 0",
            ));
        }
        self.theme.background()?;
        self.layout.validate()?;
        if let Some(e) = &self.entrance {
            e.validate()?;
        }
        if let Some(o) = &self.overlay {
            o.window(self.main_start(), self.fps).validate()?;
        }
        Ok(())
    }

    /// Frame rate as [`Fps`].
    pub fn fps(&self) -> ReelResult<Fps> {
        Fps::integer(self.fps)
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Spacing units for the trigger schedule.
    pub fn spacing(&self) -> Spacing {
        Spacing {
            card_entry: self.card_entry_duration,
            stagger: self.stagger_delay,
        }
    }

    /// `seconds_per_card` in frames.
    pub fn frames_per_card(&self) -> u64 {
        u64::from(self.seconds_per_card) * u64::from(self.fps)
    }

    /// Main sequence length: one card slot per shown card.
    pub fn main_duration(&self) -> u64 {
        (self.cards_to_show as u64).saturating_mul(self.frames_per_card())
    }

    /// Ending length in frames.
    pub fn ending_frames(&self) -> u64 {
        u64::from(self.ending_seconds) * u64::from(self.fps)
    }

    /// `intro + main + ending` frames.
    pub fn total_frames(&self) -> u64 {
        u64::from(self.intro_delay)
            .saturating_add(self.main_duration())
            .saturating_add(self.ending_frames())
    }

    fn main_start(&self) -> i64 {
        i64::from(self.intro_delay)
    }

    /// Global frames of the intro.
    pub fn intro_range(&self) -> FrameRange {
        FrameRange::with_len(0, u64::from(self.intro_delay))
    }

    /// Global frames of the main sequence.
    pub fn main_range(&self) -> FrameRange {
        FrameRange::with_len(u64::from(self.intro_delay), self.main_duration())
    }

    /// Global frames of the ending.
    pub fn ending_range(&self) -> FrameRange {
        FrameRange::with_len(self.main_range().end.0, self.ending_frames())
    }

    /// Sequence containing `frame` and the frame relative to its start, or `None` past the end.
    pub fn sequence_at(&self, frame: FrameIndex) -> Option<(Sequence, FrameIndex)> {
        [
            (Sequence::Intro, self.intro_range()),
            (Sequence::Main, self.main_range()),
            (Sequence::Ending, self.ending_range()),
        ]
        .into_iter()
        .find(|(_, r)| r.contains(frame))
        .map(|(s, r)| (s, r.local(frame)))
    }

    /// Configured schedule, or tiered with `tail_gap`.
    pub fn trigger_schedule(&self) -> TriggerSchedule {
        self.schedule.unwrap_or(TriggerSchedule::Tiered {
            tail_gap: self.tail_gap,
        })
    }

    /// Entrance shaping for the cards.
    ///
    /// Without an explicit `entrance`, a staggered schedule gets the player-list entrance
    /// (fade over `opacity_transition_duration`) and the tiered schedule gets the card-list
    /// default. An `opacity` override replaces the curve either way.
    pub fn entrance_config(&self) -> EntranceConfig {
        let mut entrance = match (self.entrance, self.trigger_schedule()) {
            (Some(e), _) => e,
            (None, TriggerSchedule::Staggered { .. }) => {
                EntranceConfig::player_list(self.opacity_transition_duration)
            }
            (None, TriggerSchedule::Tiered { .. }) => EntranceConfig::default(),
        };
        if let Some(opacity) = self.opacity {
            entrance.opacity = opacity;
        }
        entrance
    }

    /// Timeline for `item_count` cards on the global frame axis.
    ///
    /// Trigger frames include the intro delay; the scroll window opens once the entrance phase
    /// (`initial_delay + 4 * card_entry`) has elapsed inside the main sequence.
    pub fn to_timeline(&self, item_count: usize) -> ReelResult<TimelineConfig> {
        let scroll = ScrollConfig::from_durations(
            self.main_duration(),
            self.initial_delay,
            self.card_entry_duration,
        )
        .shifted(self.main_start());

        TimelineConfig::new(
            self.fps()?,
            item_count,
            self.main_start(),
            self.spacing(),
            scroll,
        )?
        .with_schedule(self.trigger_schedule())
        .with_entrance(self.entrance_config())?
        .with_layout(self.layout)
    }
}

/// Validated configuration, the records it shows, and everything derived from them.
#[derive(Clone, Debug)]
pub struct CompositionPlan {
    /// Validated configuration.
    pub config: CompositionConfig,
    /// Ordered records, truncated to `cards_to_show`. Index 0 is the intro lead.
    pub records: Vec<EntityRecord>,
    /// Card timeline for `records`.
    pub timeline: TimelineConfig,
    /// Music envelope over main-local frames. `None` when muted.
    pub volume: Option<VolumeEnvelope>,
    /// Overlay schedule on the global axis.
    pub overlay: Option<OverlayWindow>,
    /// Closing text split into glyphs.
    pub ending_text: TypedText,
}

impl CompositionPlan {
    /// Order and select `records`, then derive the timeline and ambient curves.
    pub fn new(config: CompositionConfig, mut records: Vec<EntityRecord>) -> ReelResult<Self> {
        config.validate()?;

        match config.order {
            RecordOrder::Leaderboard => order_leaderboard(&mut records),
            RecordOrder::JoinDate => order_by_join_date(&mut records),
            RecordOrder::AsLoaded => {}
        }
        records.truncate(config.cards_to_show);

        let timeline = config.to_timeline(records.len())?;
        let volume = VolumeEnvelope::preset(config.volume, config.main_duration(), config.fps)?;
        let overlay = config
            .overlay
            .map(|o| o.window(config.main_start(), config.fps));
        let ending_text = TypedText::new(&config.ending_text);

        tracing::debug!(
            cards = records.len(),
            intro = config.intro_delay,
            main = config.main_duration(),
            ending = config.ending_frames(),
            total = config.total_frames(),
            "composition plan derived"
        );

        Ok(Self {
            config,
            records,
            timeline,
            volume,
            overlay,
            ending_text,
        })
    }

    /// See [`CompositionConfig::total_frames`].
    pub fn total_frames(&self) -> u64 {
        self.config.total_frames()
    }

    /// Intro lead record, the first selected one.
    pub fn lead(&self) -> Option<&EntityRecord> {
        self.records.first()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;

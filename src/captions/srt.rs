use std::fmt;

use crate::{
    dataset::{order::select_cards, record::EntityRecord},
    foundation::error::{ReelError, ReelResult},
};

const UNKNOWN: &str = "unknown";

/// How many cards a caption track covers and how long each stays on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pacing {
    /// Card cues to emit, capped by the records available.
    pub cards_to_show: usize,
    /// Length of each card slot.
    pub seconds_per_card: u32,
}

/// Fewer records get longer slots; large datasets are capped.
pub fn auto_pacing(record_count: usize) -> Pacing {
    let (cards_to_show, seconds_per_card) = match record_count {
        0..=5 => (record_count, 8),
        6..=10 => (record_count.min(8), 7),
        11..=20 => (record_count.min(12), 6),
        21..=30 => (record_count.min(15), 5),
        _ => (record_count.min(20), 4),
    };
    Pacing {
        cards_to_show,
        seconds_per_card,
    }
}

/// Thank-you cue shown after the last card.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClosingCue {
    /// Cue text.
    pub text: String,
    /// Cue length.
    pub seconds: u32,
}

impl Default for ClosingCue {
    fn default() -> Self {
        Self {
            text: "Terima kasih sudah menonton!".to_string(),
            seconds: 5,
        }
    }
}

/// Layout of a caption track: opening title, one slot per card, optional closing cue.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionOptions {
    /// Opening cue text.
    pub title: String,
    /// Opening cue length.
    pub opening_seconds: u32,
    /// Card slot layout.
    pub pacing: Pacing,
    /// `None` ends the track with the last card.
    #[serde(default)]
    pub ending: Option<ClosingCue>,
}

impl CaptionOptions {
    /// Card slots and a present closing cue must have non-zero length.
    pub fn validate(&self) -> ReelResult<()> {
        if self.pacing.seconds_per_card == 0 {
            return Err(ReelError::validation("seconds per card must be > 0"));
        }
        if self.ending.as_ref().is_some_and(|e| e.seconds == 0) {
            return Err(ReelError::validation("closing cue must last > 0 seconds"));
        }
        Ok(())
    }
}

/// One subtitle cue. Times are in milliseconds from the start of the video.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Cue {
    /// 1-based sequence number.
    pub index: usize,
    /// Start time.
    pub start_ms: u64,
    /// End time, exclusive.
    pub end_ms: u64,
    /// Text lines, in display order.
    pub lines: Vec<String>,
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(
            f,
            "{} --> {}",
            format_timestamp(self.start_ms),
            format_timestamp(self.end_ms)
        )?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// `HH:MM:SS,mmm`.
pub fn format_timestamp(ms: u64) -> String {
    let (secs, millis) = (ms / 1000, ms % 1000);
    let (mins, secs) = (secs / 60, secs % 60);
    let (hours, mins) = (mins / 60, mins % 60);
    format!("{hours:02}:{mins:02}:{secs:02},{millis:03}")
}

/// Opening title cue, one cue per shown card, then the closing cue if configured.
///
/// The closing cue starts when the last card cue ends, so short datasets leave no gap.
pub fn build_cues(records: &[EntityRecord], opts: &CaptionOptions) -> ReelResult<Vec<Cue>> {
    opts.validate()?;

    let opening_ms = u64::from(opts.opening_seconds) * 1000;
    let slot_ms = u64::from(opts.pacing.seconds_per_card) * 1000;
    let team = records
        .first()
        .and_then(|r| r.team.as_deref())
        .unwrap_or(UNKNOWN);

    let mut cues = Vec::with_capacity(opts.pacing.cards_to_show + 1);
    cues.push(Cue {
        index: 1,
        start_ms: 0,
        end_ms: opening_ms,
        lines: vec![opts.title.clone()],
    });

    for (i, rec) in select_cards(records, opts.pacing.cards_to_show)
        .iter()
        .enumerate()
    {
        let start_ms = opening_ms + i as u64 * slot_ms;
        cues.push(Cue {
            index: cues.len() + 1,
            start_ms,
            end_ms: start_ms + slot_ms,
            lines: vec![headline(rec), detail_line(rec, team)],
        });
    }

    if let Some(ending) = &opts.ending {
        let start_ms = cues.last().map_or(opening_ms, |c| c.end_ms);
        cues.push(Cue {
            index: cues.len() + 1,
            start_ms,
            end_ms: start_ms + u64::from(ending.seconds) * 1000,
            lines: vec![ending.text.clone()],
        });
    }
    Ok(cues)
}

fn headline(rec: &EntityRecord) -> String {
    format!(
        "{} ({})",
        rec.usable_name().unwrap_or(UNKNOWN),
        rec.nation.as_deref().unwrap_or(UNKNOWN)
    )
}

fn detail_line(rec: &EntityRecord, team: &str) -> String {
    let joined = match rec.parsed_date() {
        Some(d) => d.format("%d %B %Y").to_string(),
        None => rec.date.clone().unwrap_or_else(|| UNKNOWN.to_string()),
    };
    let roles = if rec.roles.is_empty() {
        UNKNOWN.to_string()
    } else {
        rec.roles.join(", ")
    };
    format!(
        "Name: {} | Joined {team}: {joined} | Roles: [{roles}]",
        rec.full_name.as_deref().unwrap_or(UNKNOWN)
    )
}

/// Render cues as an SRT document.
pub fn write_srt(cues: &[Cue]) -> String {
    cues.iter().map(|c| format!("{c}\n")).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/captions/srt.rs"]
mod tests;

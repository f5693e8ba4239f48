use crate::foundation::error::{ReelError, ReelResult};

/// Offset of the second card after the lead card.
const SECOND_ITEM_OFFSET: i64 = 60;
/// Offset of the first tiered card (index 2) after the lead card.
const TIERED_BASE: i64 = 200;
/// `[start, end)` index ranges with their per-card gap, in order.
const TIERS: [(usize, usize, i64); 2] = [(2, 5, 370), (5, 11, 420)];
/// First index of the open-ended tail tier.
const TAIL_START: usize = 11;

/// Spacing units shared by every schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Spacing {
    /// Nominal spacing for early items.
    pub card_entry: u32,
    /// Spacing for later items.
    pub stagger: u32,
}

impl Spacing {
    /// Both spacings must be non-zero.
    pub fn validate(self) -> ReelResult<()> {
        if self.card_entry == 0 {
            return Err(ReelError::validation("card entry duration must be > 0 frames"));
        }
        if self.stagger == 0 {
            return Err(ReelError::validation("stagger delay must be > 0 frames"));
        }
        Ok(())
    }
}

/// Gap between consecutive items of the tail tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailGap {
    /// Fixed gap in frames.
    Frames(u32),
    /// Reuse [`Spacing::stagger`].
    StaggerDelay,
}

impl TailGap {
    /// Gap in frames.
    pub fn resolve(self, spacing: Spacing) -> u32 {
        match self {
            Self::Frames(n) => n,
            Self::StaggerDelay => spacing.stagger,
        }
    }
}

/// Policy assigning each item the global frame at which its entrance starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerSchedule {
    /// Hand-tuned tiers: lead, second, indices 2-4, 5-10, then an open tail.
    Tiered {
        /// Gap between items of the open tail tier.
        tail_gap: TailGap,
    },
    /// The first `main_count` items enter `card_entry` apart after `initial_delay`, the rest
    /// follow `stagger` apart.
    Staggered {
        /// Frames after the intro before the first item.
        initial_delay: u32,
        /// Size of the opening group.
        main_count: usize,
    },
}

impl Default for TriggerSchedule {
    fn default() -> Self {
        Self::Tiered {
            tail_gap: TailGap::Frames(440),
        }
    }
}

impl TriggerSchedule {
    /// Global trigger frame of item `index`.
    pub fn trigger_frame(&self, index: usize, intro_delay: i64, spacing: Spacing) -> i64 {
        match *self {
            Self::Tiered { tail_gap } => {
                tiered_trigger_frame(index, intro_delay, tail_gap.resolve(spacing))
            }
            Self::Staggered {
                initial_delay,
                main_count,
            } => {
                let entry = i64::from(spacing.card_entry);
                let offset = if index < main_count {
                    as_i64(index).saturating_mul(entry)
                } else {
                    as_i64(main_count)
                        .saturating_mul(entry)
                        .saturating_add(as_i64(index - main_count).saturating_mul(i64::from(spacing.stagger)))
                };
                intro_delay
                    .saturating_add(i64::from(initial_delay))
                    .saturating_add(offset)
            }
        }
    }

    /// Items that belong to the opening group and get the longer slide-in.
    pub fn is_intro_tier(&self, index: usize) -> bool {
        match *self {
            Self::Tiered { .. } => index < TIERS[0].0,
            Self::Staggered { main_count, .. } => index < main_count,
        }
    }
}

/// Tiered trigger frame for `index` with an explicit tail gap.
///
/// | index | frame |
/// |---|---|
/// | 0 | `intro_delay` |
/// | 1 | `intro_delay + 60` |
/// | 2..=4 | `intro_delay + 200 + (index-2) * 370` |
/// | 5..=10 | `intro_delay + 200 + 3*370 + (index-5) * 420` |
/// | 11.. | `intro_delay + 200 + 3*370 + 6*420 + (index-11) * tail_gap` |
pub fn tiered_trigger_frame(index: usize, intro_delay: i64, tail_gap: u32) -> i64 {
    match index {
        0 => intro_delay,
        1 => intro_delay.saturating_add(SECOND_ITEM_OFFSET),
        _ => {
            let mut frame = intro_delay.saturating_add(TIERED_BASE);
            for (start, end, gap) in TIERS {
                let steps = as_i64(index.min(end) - start);
                frame = frame.saturating_add(steps.saturating_mul(gap));
                if index < end {
                    return frame;
                }
            }
            frame.saturating_add(as_i64(index - TAIL_START).saturating_mul(i64::from(tail_gap)))
        }
    }
}

fn as_i64(v: usize) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/schedule.rs"]
mod tests;

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::dataset::record::EntityRecord;

/// Date assumed for records whose join date is missing or unparseable.
pub fn fallback_join_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Leaderboard order, a total order over records.
///
/// 1. Records without a follower count come first, then the rest by follower count ascending,
///    so the biggest account is revealed last.
/// 2. Newer join dates first. A record with a date precedes one without.
/// 3. Name, case-insensitively, missing names sorting as the empty string. Names that differ
///    only in case fall back to byte order.
pub fn compare_leaderboard(a: &EntityRecord, b: &EntityRecord) -> Ordering {
    compare_followers(a.followers_count, b.followers_count)
        .then_with(|| compare_dates(a.parsed_date(), b.parsed_date()))
        .then_with(|| compare_names(a.name.as_deref(), b.name.as_deref()))
}

fn compare_followers(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(fa), Some(fb)) => fa.total_cmp(&fb),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_names(a: Option<&str>, b: Option<&str>) -> Ordering {
    let (a, b) = (a.unwrap_or(""), b.unwrap_or(""));
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

/// Stable sort by [`compare_leaderboard`].
pub fn order_leaderboard(records: &mut [EntityRecord]) {
    records.sort_by(compare_leaderboard);
}

/// Stable sort by join date, newest first.
pub fn order_by_join_date(records: &mut [EntityRecord]) {
    let fallback = fallback_join_date();
    records.sort_by_key(|r| std::cmp::Reverse(r.parsed_date().unwrap_or(fallback)));
}

/// The first `n` records; index 0 is the lead item the intro presents.
pub fn select_cards(records: &[EntityRecord], n: usize) -> &[EntityRecord] {
    &records[..n.min(records.len())]
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/order.rs"]
mod tests;

//! SRS (Spaced Repetition System) library for the mental-math trainer
//!
//! This crate provides an SM-2 style scheduler for skill reviews: answer quality
//! grading, interval/ease updates, review urgency and the randomized pick among
//! the most urgent skills.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ease factor given to a skill that has never been reviewed
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Lower bound for the ease factor
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Urgency of a skill that has never been reviewed
pub const MAX_URGENCY: f64 = 100.0;

/// How many of the most urgent candidates the random pick draws from
pub const SELECTION_POOL: usize = 3;

/// Longest review interval, about a century
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Per-skill SM-2 state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepetitionRecord {
    /// Growth multiplier applied to the interval after each passed review
    pub ease_factor: f64,
    /// Days until the next review
    pub interval_days: u32,
    /// Consecutive passed reviews
    pub repetitions: u32,
    /// When the skill was last reviewed
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// When the skill is next due (`None` until the first review)
    pub next_due_at: Option<DateTime<Utc>>,
}

impl Default for RepetitionRecord {
    fn default() -> Self {
        Self {
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: 0,
            repetitions: 0,
            last_reviewed_at: None,
            next_due_at: None,
        }
    }
}

impl RepetitionRecord {
    /// Whether the skill has been through at least one review
    pub fn is_reviewed(&self) -> bool {
        self.next_due_at.is_some()
    }
}

/// Grade an answer on the 1-5 SM-2 quality scale.
///
/// * Incorrect: 1
/// * Correct within 3s: 5
/// * Correct within 8s: 4
/// * Correct within 15s: 3
/// * Correct but slower: 2
pub fn quality_of(correct: bool, time_ms: u32) -> u8 {
    if !correct {
        return 1;
    }

    match time_ms {
        t if t <= 3_000 => 5,
        t if t <= 8_000 => 4,
        t if t <= 15_000 => 3,
        _ => 2,
    }
}

/// Apply one SM-2 review to `record`, returning the updated record.
///
/// # Algorithm
///
/// * Pass (quality ≥ 3): interval goes 1 day, then 6 days, then
///   `round(interval * ease_factor)`; repetitions increase by one.
/// * Fail: repetitions reset to 0 and the interval to 1 day.
/// * Ease factor moves by `0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)` and never
///   drops below [`MIN_EASE_FACTOR`].
///
/// The interval is capped at [`MAX_INTERVAL_DAYS`]. The next due date is
/// `now + interval` days, saturating at the latest representable instant.
pub fn update(record: &RepetitionRecord, quality: u8, now: DateTime<Utc>) -> RepetitionRecord {
    let quality = quality.min(5);

    let (interval_days, repetitions) = if quality >= 3 {
        let interval = match record.repetitions {
            0 => 1,
            1 => 6,
            _ => (f64::from(record.interval_days) * record.ease_factor)
                .round()
                .min(f64::from(MAX_INTERVAL_DAYS)) as u32,
        };
        (interval.min(MAX_INTERVAL_DAYS), record.repetitions.saturating_add(1))
    } else {
        (1, 0)
    };

    let lapse = f64::from(5 - quality);
    let ease_factor =
        (record.ease_factor + (0.1 - lapse * (0.08 + lapse * 0.02))).max(MIN_EASE_FACTOR);

    RepetitionRecord {
        ease_factor,
        interval_days,
        repetitions,
        last_reviewed_at: Some(now),
        next_due_at: Some(
            now.checked_add_signed(Duration::days(i64::from(interval_days)))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        ),
    }
}

/// Review priority of a skill, from 0 (nothing to do) to 100 (most urgent).
///
/// * Absent or never-reviewed: 100
/// * Overdue: `50 + min(days_overdue * 10, 50)`, saturating 5 days past due
/// * Not yet due: `max(0, 20 - days_until_due * 5)`
pub fn urgency(record: Option<&RepetitionRecord>, now: DateTime<Utc>) -> f64 {
    let Some(next_due_at) = record.and_then(|r| r.next_due_at) else {
        return MAX_URGENCY;
    };

    let days_past = (now - next_due_at).num_milliseconds() as f64 / MS_PER_DAY;

    if days_past > 0.0 {
        50.0 + (days_past * 10.0).min(50.0)
    } else {
        (20.0 - days_past.abs() * 5.0).max(0.0)
    }
}

/// Pick one of the [`SELECTION_POOL`] most urgent candidates uniformly at random.
///
/// Candidates are `(item, urgency)` pairs. Equal urgencies keep their input
/// order. Returns `None` for an empty candidate list.
pub fn select_among<T, R>(mut candidates: Vec<(T, f64)>, rng: &mut R) -> Option<T>
where
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return None;
    }

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates.truncate(SELECTION_POOL);

    let index = rng.gen_range(0..candidates.len());
    Some(candidates.swap_remove(index).0)
}

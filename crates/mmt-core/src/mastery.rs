//! Per-skill mastery state machine.
//!
//! [`assess`] folds one answer into a [`MasteryRecord`]: mastery moves with
//! correctness and speed, and crossing the upper or lower threshold moves the
//! skill one difficulty level up or down with a partial mastery reset.

use chrono::{DateTime, Utc};
use mmt_store::{AssessmentNote, MAX_LEVEL, MAX_MASTERY, MIN_LEVEL, MasteryRecord};
use serde::{Deserialize, Serialize};

/// Mastery at which a skill moves up a level
pub const LEVEL_UP_THRESHOLD: u8 = 80;
/// Mastery after moving up a level
pub const LEVEL_UP_RESET: u8 = 60;
/// Mastery at or below which a skill drops a level
pub const LEVEL_DOWN_THRESHOLD: u8 = 30;
/// Mastery after dropping a level
pub const LEVEL_DOWN_RESET: u8 = 50;
/// Mastery lost on a wrong answer
pub const MISS_PENALTY: u8 = 8;
/// Average answer time assumed before any answer is recorded
pub const BOOTSTRAP_AVG_TIME_MS: u32 = 5_000;
/// Answers slower than this show a hint even when correct
pub const HINT_TIME_MS: u32 = 15_000;
/// Mastery below which the visual model stays on screen
pub const VISUAL_SUPPORT_BELOW: u8 = 40;

/// Direction of a level transition caused by one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelChange {
    /// Mastery reached [`LEVEL_UP_THRESHOLD`] below [`MAX_LEVEL`]
    Up,
    /// Mastery fell to [`LEVEL_DOWN_THRESHOLD`] above [`MIN_LEVEL`]
    Down,
}

/// What the UI needs to know right after an answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessOutcome {
    pub correct: bool,
    /// Mastery after the answer and any level reset
    pub new_mastery: u8,
    pub new_level: u8,
    pub assessment_note: AssessmentNote,
    /// Answer was wrong or slower than [`HINT_TIME_MS`]
    pub should_show_hint: bool,
    /// Mastery is below [`VISUAL_SUPPORT_BELOW`]
    pub should_show_visual: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_change: Option<LevelChange>,
}

/// Mastery gained by a correct answer given in `time_ms` with the post-answer `streak`
pub fn mastery_gain(time_ms: u32, streak: u32) -> u8 {
    let base = match time_ms {
        t if t <= 3_000 => 8,
        t if t <= 8_000 => 4,
        _ => 2,
    };

    if streak >= 5 { base + 2 } else { base }
}

/// Label for a post-answer accuracy and average time, strongest first
pub fn assessment_note(accuracy: f64, avg_time_ms: u32) -> AssessmentNote {
    if accuracy >= 0.9 && avg_time_ms < 3_000 {
        AssessmentNote::Mastered
    } else if accuracy >= 0.75 {
        AssessmentNote::BuildingFluency
    } else if accuracy >= 0.5 {
        AssessmentNote::Developing
    } else {
        AssessmentNote::Struggling
    }
}

/// Incremental mean of answer times
fn running_average(prev_avg: u32, prev_count: u32, time_ms: u32) -> u32 {
    let prev_avg = if prev_count == 0 {
        BOOTSTRAP_AVG_TIME_MS
    } else {
        prev_avg
    };

    let total = f64::from(prev_avg) * f64::from(prev_count) + f64::from(time_ms);
    (total / (f64::from(prev_count) + 1.0)).round() as u32
}

/// Fold one answer into `record`, returning the new record and the outcome.
///
/// The input record is left untouched; persisting the result is the caller's job.
pub fn assess(
    record: &MasteryRecord,
    correct: bool,
    time_ms: u32,
    now: DateTime<Utc>,
) -> (MasteryRecord, AssessOutcome) {
    let mut next = record.clone();
    let mut level_change = None;

    next.avg_time_ms = running_average(record.avg_time_ms, record.total_attempts, time_ms);
    next.total_attempts += 1;
    next.last_practiced_at = Some(now);

    if correct {
        next.total_correct += 1;
        next.streak += 1;
        next.best_streak = next.best_streak.max(next.streak);

        let gain = mastery_gain(time_ms, next.streak);
        next.mastery = next.mastery.saturating_add(gain).min(MAX_MASTERY);

        if next.mastery >= LEVEL_UP_THRESHOLD && next.level < MAX_LEVEL {
            next.level += 1;
            next.mastery = LEVEL_UP_RESET;
            level_change = Some(LevelChange::Up);
        }
    } else {
        next.streak = 0;
        next.mastery = next.mastery.saturating_sub(MISS_PENALTY);

        if next.mastery <= LEVEL_DOWN_THRESHOLD && next.level > MIN_LEVEL {
            next.level -= 1;
            next.mastery = LEVEL_DOWN_RESET;
            level_change = Some(LevelChange::Down);
        }
    }

    let note = assessment_note(next.accuracy(), next.avg_time_ms);
    next.assessment_note = Some(note);

    let outcome = AssessOutcome {
        correct,
        new_mastery: next.mastery,
        new_level: next.level,
        assessment_note: note,
        should_show_hint: !correct || time_ms > HINT_TIME_MS,
        should_show_visual: !correct || next.mastery < VISUAL_SUPPORT_BELOW,
        level_change,
    };

    (next, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 10, 16, 30, 0).unwrap()
    }

    fn record() -> MasteryRecord {
        MasteryRecord::new("doubles")
    }

    #[test]
    fn test_mastery_gain_tiers() {
        assert_eq!(mastery_gain(2_000, 1), 8);
        assert_eq!(mastery_gain(3_000, 1), 8);
        assert_eq!(mastery_gain(5_000, 1), 4);
        assert_eq!(mastery_gain(8_001, 1), 2);
        assert_eq!(mastery_gain(2_000, 5), 10);
        assert_eq!(mastery_gain(20_000, 7), 4);
    }

    #[test]
    fn test_first_correct_answer() {
        let (next, outcome) = assess(&record(), true, 2_500, now());

        assert_eq!(next.mastery, 8);
        assert_eq!(next.level, 1);
        assert_eq!(next.total_attempts, 1);
        assert_eq!(next.total_correct, 1);
        assert_eq!(next.streak, 1);
        assert_eq!(next.best_streak, 1);
        assert_eq!(next.avg_time_ms, 2_500);
        assert_eq!(next.last_practiced_at, Some(now()));
        assert_eq!(next.assessment_note, Some(AssessmentNote::Mastered));

        assert!(outcome.correct);
        assert!(!outcome.should_show_hint);
        assert!(outcome.should_show_visual);
        assert_eq!(outcome.level_change, None);
    }

    #[test]
    fn test_streak_bonus_on_fifth_correct() {
        let start = MasteryRecord {
            streak: 4,
            best_streak: 4,
            mastery: 20,
            total_attempts: 4,
            total_correct: 4,
            avg_time_ms: 2_000,
            ..record()
        };

        let (next, _) = assess(&start, true, 2_000, now());
        assert_eq!(next.streak, 5);
        assert_eq!(next.best_streak, 5);
        assert_eq!(next.mastery, 30);
    }

    #[test]
    fn test_level_up_resets_to_sixty() {
        let start = MasteryRecord {
            mastery: 75,
            level: 2,
            ..record()
        };

        let (next, outcome) = assess(&start, true, 1_000, now());
        assert_eq!(next.level, 3);
        assert_eq!(next.mastery, LEVEL_UP_RESET);
        assert_eq!(outcome.level_change, Some(LevelChange::Up));
    }

    #[test]
    fn test_no_level_up_below_threshold() {
        let start = MasteryRecord {
            mastery: 71,
            ..record()
        };

        let (next, outcome) = assess(&start, true, 1_000, now());
        assert_eq!(next.mastery, 79);
        assert_eq!(next.level, 1);
        assert_eq!(outcome.level_change, None);
    }

    #[test]
    fn test_top_level_caps_at_hundred() {
        let start = MasteryRecord {
            mastery: 96,
            level: MAX_LEVEL,
            ..record()
        };

        let (next, outcome) = assess(&start, true, 1_000, now());
        assert_eq!(next.level, MAX_LEVEL);
        assert_eq!(next.mastery, MAX_MASTERY);
        assert_eq!(outcome.level_change, None);
    }

    #[test]
    fn test_incorrect_demotes_and_resets_to_fifty() {
        let start = MasteryRecord {
            mastery: 25,
            level: 2,
            streak: 3,
            ..record()
        };

        let (next, outcome) = assess(&start, false, 4_000, now());
        assert_eq!(next.level, 1);
        assert_eq!(next.mastery, LEVEL_DOWN_RESET);
        assert_eq!(next.streak, 0);
        assert_eq!(outcome.level_change, Some(LevelChange::Down));
        assert!(outcome.should_show_hint);
        assert!(outcome.should_show_visual);
    }

    #[test]
    fn test_incorrect_at_level_one_floors_at_zero() {
        let start = MasteryRecord {
            mastery: 5,
            ..record()
        };

        let (next, outcome) = assess(&start, false, 4_000, now());
        assert_eq!(next.level, 1);
        assert_eq!(next.mastery, 0);
        assert_eq!(outcome.level_change, None);
    }

    #[test]
    fn test_incorrect_above_threshold_keeps_level() {
        let start = MasteryRecord {
            mastery: 45,
            level: 3,
            ..record()
        };

        let (next, _) = assess(&start, false, 4_000, now());
        assert_eq!(next.mastery, 37);
        assert_eq!(next.level, 3);
    }

    #[test]
    fn test_slow_correct_answer_shows_hint() {
        let (_, outcome) = assess(&record(), true, 15_001, now());
        assert!(outcome.should_show_hint);

        let (_, outcome) = assess(&record(), true, 15_000, now());
        assert!(!outcome.should_show_hint);
    }

    #[test]
    fn test_average_time_is_running_mean() {
        let times = [1_000, 2_000, 3_000, 6_000, 8_000];
        let (record, _) = times.iter().fold(
            (record(), None),
            |(r, _), &t| {
                let (next, outcome) = assess(&r, true, t, now());
                (next, Some(outcome))
            },
        );

        assert_eq!(record.total_attempts, 5);
        assert_eq!(record.avg_time_ms, 4_000);
    }

    #[test]
    fn test_assessment_note_precedence() {
        assert_eq!(assessment_note(0.95, 2_000), AssessmentNote::Mastered);
        assert_eq!(assessment_note(0.95, 3_000), AssessmentNote::BuildingFluency);
        assert_eq!(assessment_note(0.75, 9_000), AssessmentNote::BuildingFluency);
        assert_eq!(assessment_note(0.5, 1_000), AssessmentNote::Developing);
        assert_eq!(assessment_note(0.49, 1_000), AssessmentNote::Struggling);
    }

    #[test]
    fn test_bounds_hold_over_long_runs() {
        let mut current = record();
        for i in 0..500u32 {
            let correct = i % 7 != 3 && i % 11 != 5;
            let time = (i * 1_337) % 20_000;
            let (next, _) = assess(&current, correct, time, now());
            assert!(next.mastery <= MAX_MASTERY);
            assert!((MIN_LEVEL..=MAX_LEVEL).contains(&next.level));
            assert!(next.total_correct <= next.total_attempts);
            current = next;
        }
    }
}

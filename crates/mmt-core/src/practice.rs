//! Answer recording and the per-player progress read model.

use chrono::{DateTime, Utc};
use mmt_store::{MasteryRecord, PlayerId, ProgressStore, Question};
use serde::{Deserialize, Serialize};

use crate::{
    config::Settings,
    error::CoreError,
    mastery::{self, AssessOutcome, LevelChange},
    selector,
    skills::SkillDescriptor,
};

/// One answered question as reported by the session runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub skill_id: String,
    pub question: Question,
    pub correct: bool,
    /// Time from question shown to answer submitted
    pub time_ms: u32,
    /// The question was served from a flagged-retry slot
    #[serde(default)]
    pub was_retry: bool,
}

/// Result of [`record_answer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    #[serde(flatten)]
    pub assessment: AssessOutcome,
    /// Next review due date, only tracked with spaced repetition enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_at: Option<DateTime<Utc>>,
    /// The question was queued for a later retry
    pub flagged: bool,
    /// A previously flagged question was answered correctly and cleared
    pub cleared_flag: bool,
}

/// Fold one answer into the player's stored progress.
///
/// Updates the mastery record, then the repetition record when spaced
/// repetition is on. A wrong answer flags the question for retry; a correct
/// answer on a retry slot clears it.
pub fn record_answer<S, T>(
    store: &mut S,
    settings: &T,
    player: PlayerId,
    submission: &AnswerSubmission,
    now: DateTime<Utc>,
) -> Result<AnswerOutcome, CoreError>
where
    S: ProgressStore + ?Sized,
    T: Settings + ?Sized,
{
    let skill_id = submission.skill_id.as_str();

    let record = store.mastery_or_default(player, skill_id)?;
    let (record, assessment) =
        mastery::assess(&record, submission.correct, submission.time_ms, now);
    store.put_mastery_record(player, skill_id, record)?;

    let next_review_at = if settings.is_spaced_repetition_enabled() {
        let quality = mmt_srs::quality_of(submission.correct, submission.time_ms);
        let repetition = mmt_srs::update(
            &store.repetition_or_default(player, skill_id)?,
            quality,
            now,
        );
        let due = repetition.next_due_at;
        store.put_repetition_record(player, skill_id, repetition)?;
        due
    } else {
        None
    };

    let mut flagged = false;
    let mut cleared_flag = false;
    if !submission.correct {
        flagged = store.flag_question(player, skill_id, submission.question.clone(), now)?;
    } else if submission.was_retry {
        cleared_flag = store.unflag_question(player, skill_id, &submission.question.text)?;
    }

    match assessment.level_change {
        Some(LevelChange::Up) => tracing::info!(
            %player,
            skill = skill_id,
            level = assessment.new_level,
            "Skill levelled up"
        ),
        Some(LevelChange::Down) => tracing::info!(
            %player,
            skill = skill_id,
            level = assessment.new_level,
            "Skill dropped a level"
        ),
        None => {}
    }

    Ok(AnswerOutcome {
        assessment,
        next_review_at,
        flagged,
        cleared_flag,
    })
}

/// Progress on one skill as shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillProgress {
    pub name: String,
    /// Prerequisite mastered, or no prerequisite
    pub unlocked: bool,
    #[serde(flatten)]
    pub record: MasteryRecord,
    pub accuracy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_at: Option<DateTime<Utc>>,
    pub flagged_count: usize,
}

/// Result of [`progress_summary`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub player_id: PlayerId,
    pub skills: Vec<SkillProgress>,
}

/// Progress on every skill in `skills`, in registry order. Skills the player
/// never practiced show a fresh record.
pub fn progress_summary<S, T>(
    store: &S,
    settings: &T,
    player: PlayerId,
    skills: &[SkillDescriptor],
) -> Result<ProgressSummary, CoreError>
where
    S: ProgressStore + ?Sized,
    T: Settings + ?Sized,
{
    let mut entries = Vec::with_capacity(skills.len());

    for skill in skills {
        let record = store.mastery_or_default(player, &skill.id)?;
        let next_review_at = store
            .get_repetition_record(player, &skill.id)?
            .and_then(|r| r.next_due_at);

        entries.push(SkillProgress {
            name: skill.name.clone(),
            unlocked: selector::is_unlocked(store, settings, player, skill)?,
            accuracy: record.accuracy(),
            next_review_at,
            flagged_count: store.get_flagged_questions(player, &skill.id)?.len(),
            record,
        });
    }

    Ok(ProgressSummary {
        player_id: player,
        skills: entries,
    })
}

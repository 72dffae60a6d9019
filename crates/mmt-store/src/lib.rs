//! Progress records and the store contract used by the practice core.
//!
//! The core never talks to a database directly: it reads and writes records
//! through [`ProgressStore`], keyed by player and skill id. Missing records are
//! not errors; callers lazily fall back to fresh defaults.

pub mod memory;
pub mod models;

pub use memory::InMemoryProgressStore;
pub use mmt_srs::RepetitionRecord;
pub use models::{
    AssessmentNote, FlaggedQuestion, MasteryRecord, PlayerId, Question, MAX_LEVEL, MAX_MASTERY,
    MIN_LEVEL,
};

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Progress store unavailable: {0}")]
    Unavailable(String),
}

/// Keyed record store mapping (player, skill) to progress records
pub trait ProgressStore {
    fn get_mastery_record(
        &self,
        player: PlayerId,
        skill_id: &str,
    ) -> Result<Option<MasteryRecord>, StoreError>;

    fn put_mastery_record(
        &mut self,
        player: PlayerId,
        skill_id: &str,
        record: MasteryRecord,
    ) -> Result<(), StoreError>;

    fn get_repetition_record(
        &self,
        player: PlayerId,
        skill_id: &str,
    ) -> Result<Option<RepetitionRecord>, StoreError>;

    fn put_repetition_record(
        &mut self,
        player: PlayerId,
        skill_id: &str,
        record: RepetitionRecord,
    ) -> Result<(), StoreError>;

    /// Flagged questions for a skill, oldest first
    fn get_flagged_questions(
        &self,
        player: PlayerId,
        skill_id: &str,
    ) -> Result<Vec<FlaggedQuestion>, StoreError>;

    /// Queue a missed question for retry. Returns `false` if a question with the
    /// same text is already flagged.
    fn flag_question(
        &mut self,
        player: PlayerId,
        skill_id: &str,
        question: Question,
        flagged_at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    /// Remove a flagged question by its text. Returns whether anything was removed.
    fn unflag_question(
        &mut self,
        player: PlayerId,
        skill_id: &str,
        question_text: &str,
    ) -> Result<bool, StoreError>;

    /// Mastery record for the skill, or a fresh one if the player never practiced it
    fn mastery_or_default(
        &self,
        player: PlayerId,
        skill_id: &str,
    ) -> Result<MasteryRecord, StoreError> {
        Ok(self
            .get_mastery_record(player, skill_id)?
            .unwrap_or_else(|| MasteryRecord::new(skill_id)))
    }

    /// Repetition record for the skill, or a fresh one if it was never reviewed
    fn repetition_or_default(
        &self,
        player: PlayerId,
        skill_id: &str,
    ) -> Result<RepetitionRecord, StoreError> {
        Ok(self
            .get_repetition_record(player, skill_id)?
            .unwrap_or_default())
    }
}

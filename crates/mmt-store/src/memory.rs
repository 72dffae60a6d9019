use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{
    FlaggedQuestion, MasteryRecord, PlayerId, ProgressStore, Question, RepetitionRecord,
    StoreError,
};

type Key = (PlayerId, String);

/// Process-local [`ProgressStore`] backed by hash maps.
///
/// Used by the HTTP session runner and by tests. Nothing is persisted across
/// restarts.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProgressStore {
    mastery: HashMap<Key, MasteryRecord>,
    repetition: HashMap<Key, RepetitionRecord>,
    flagged: HashMap<Key, Vec<FlaggedQuestion>>,
}

impl InMemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(player: PlayerId, skill_id: &str) -> Key {
        (player, skill_id.to_string())
    }
}

impl ProgressStore for InMemoryProgressStore {
    fn get_mastery_record(
        &self,
        player: PlayerId,
        skill_id: &str,
    ) -> Result<Option<MasteryRecord>, StoreError> {
        Ok(self.mastery.get(&Self::key(player, skill_id)).cloned())
    }

    fn put_mastery_record(
        &mut self,
        player: PlayerId,
        skill_id: &str,
        record: MasteryRecord,
    ) -> Result<(), StoreError> {
        self.mastery.insert(Self::key(player, skill_id), record);
        Ok(())
    }

    fn get_repetition_record(
        &self,
        player: PlayerId,
        skill_id: &str,
    ) -> Result<Option<RepetitionRecord>, StoreError> {
        Ok(self.repetition.get(&Self::key(player, skill_id)).cloned())
    }

    fn put_repetition_record(
        &mut self,
        player: PlayerId,
        skill_id: &str,
        record: RepetitionRecord,
    ) -> Result<(), StoreError> {
        self.repetition.insert(Self::key(player, skill_id), record);
        Ok(())
    }

    fn get_flagged_questions(
        &self,
        player: PlayerId,
        skill_id: &str,
    ) -> Result<Vec<FlaggedQuestion>, StoreError> {
        Ok(self
            .flagged
            .get(&Self::key(player, skill_id))
            .cloned()
            .unwrap_or_default())
    }

    fn flag_question(
        &mut self,
        player: PlayerId,
        skill_id: &str,
        question: Question,
        flagged_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let queue = self.flagged.entry(Self::key(player, skill_id)).or_default();

        if queue.iter().any(|f| f.question.text == question.text) {
            return Ok(false);
        }

        tracing::debug!(%player, skill_id, question = %question.text, "Flagged question for retry");
        queue.push(FlaggedQuestion {
            question,
            flagged_at,
        });
        Ok(true)
    }

    fn unflag_question(
        &mut self,
        player: PlayerId,
        skill_id: &str,
        question_text: &str,
    ) -> Result<bool, StoreError> {
        let Some(queue) = self.flagged.get_mut(&Self::key(player, skill_id)) else {
            return Ok(false);
        };

        let before = queue.len();
        queue.retain(|f| f.question.text != question_text);
        Ok(queue.len() != before)
    }
}

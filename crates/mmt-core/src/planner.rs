//! Builds the ordered list of question slots for one practice session.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use mmt_store::{PlayerId, ProgressStore, Question};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{
    config::PracticeConfig,
    error::CoreError,
    selector,
    skills::{QuestionSource, SkillDescriptor},
};

/// One position in a session, before a question is attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSlot {
    pub skill_id: String,
    /// Replays a flagged question instead of generating a fresh one
    pub is_flagged_retry: bool,
}

impl QuestionSlot {
    fn normal(skill_id: impl Into<String>) -> Self {
        Self {
            skill_id: skill_id.into(),
            is_flagged_retry: false,
        }
    }

    fn retry(skill_id: impl Into<String>) -> Self {
        Self {
            skill_id: skill_id.into(),
            is_flagged_retry: true,
        }
    }
}

/// Ordered slots of one practice session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPlan {
    /// Focus skill of the session
    pub primary_skill_id: String,
    /// Warmups first, then retries, then normal focus slots
    pub slots: Vec<QuestionSlot>,
}

/// A slot with the concrete question the learner will see
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedQuestion {
    #[serde(flatten)]
    pub slot: QuestionSlot,
    pub question: Question,
}

/// Plan a session for `player`.
///
/// The focus skill is `explicit_skill` when given, otherwise the selector's pick.
/// Slots are filled in order:
///
/// * the first `warmup_slots` slots get a fresh selector pick each, but only
///   when no skill was requested explicitly;
/// * then up to `max_retry_slots` retries of flagged questions on the focus skill,
///   never more than there are flagged questions;
/// * every remaining slot is a normal question on the focus skill.
pub fn plan<S, R>(
    store: &S,
    config: &PracticeConfig,
    player: PlayerId,
    skills: &[SkillDescriptor],
    explicit_skill: Option<&str>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<SessionPlan, CoreError>
where
    S: ProgressStore + ?Sized,
    R: RngCore + ?Sized,
{
    let main_skill = match explicit_skill {
        Some(id) => skills
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::UnknownSkill(id.to_string()))?,
        None => selector::select_next(store, config, player, skills, now, rng)?,
    };

    let flagged = store.get_flagged_questions(player, &main_skill.id)?.len();
    let retry_cap = config.max_retry_slots.min(flagged);

    let mut slots = Vec::with_capacity(config.session_length);
    let mut retries = 0;

    for i in 0..config.session_length {
        if explicit_skill.is_none() && i < config.warmup_slots {
            let warmup = selector::select_next(store, config, player, skills, now, rng)?;
            slots.push(QuestionSlot::normal(&warmup.id));
        } else if retries < retry_cap {
            slots.push(QuestionSlot::retry(&main_skill.id));
            retries += 1;
        } else {
            slots.push(QuestionSlot::normal(&main_skill.id));
        }
    }

    tracing::debug!(
        %player,
        skill = %main_skill.id,
        explicit = explicit_skill.is_some(),
        retries,
        slots = slots.len(),
        "Planned session"
    );

    Ok(SessionPlan {
        primary_skill_id: main_skill.id.clone(),
        slots,
    })
}

impl SessionPlan {
    /// Number of flagged-retry slots
    pub fn retry_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_flagged_retry).count()
    }

    /// Attach a concrete question to every slot.
    ///
    /// Normal slots ask `source` for a question at the skill's current level.
    /// Retry slots replay flagged questions oldest first, falling back to a fresh
    /// question if the flagged pool ran dry since planning.
    pub fn materialize<S, Q, R>(
        &self,
        store: &S,
        source: &Q,
        player: PlayerId,
        rng: &mut R,
    ) -> Result<Vec<PlannedQuestion>, CoreError>
    where
        S: ProgressStore + ?Sized,
        Q: QuestionSource + ?Sized,
        R: RngCore,
    {
        let mut levels: HashMap<&str, u8> = HashMap::new();
        let mut flagged: HashMap<&str, VecDeque<Question>> = HashMap::new();
        let mut planned = Vec::with_capacity(self.slots.len());

        for slot in &self.slots {
            let skill_id = slot.skill_id.as_str();

            let replay = if slot.is_flagged_retry {
                if !flagged.contains_key(skill_id) {
                    let queue = store
                        .get_flagged_questions(player, skill_id)?
                        .into_iter()
                        .map(|f| f.question)
                        .collect();
                    flagged.insert(skill_id, queue);
                }
                flagged.get_mut(skill_id).and_then(VecDeque::pop_front)
            } else {
                None
            };

            let question = match replay {
                Some(question) => question,
                None => {
                    let level = match levels.get(skill_id) {
                        Some(level) => *level,
                        None => {
                            let level = store.mastery_or_default(player, skill_id)?.level;
                            levels.insert(skill_id, level);
                            level
                        }
                    };
                    source.generate(skill_id, level, rng)?
                }
            };

            planned.push(PlannedQuestion {
                slot: slot.clone(),
                question,
            });
        }

        Ok(planned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::SkillRegistry;
    use chrono::TimeZone;
    use mmt_store::{InMemoryProgressStore, MasteryRecord};
    use rand::{SeedableRng, rngs::StdRng};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 2, 15, 0, 0).unwrap()
    }

    fn question(text: &str) -> Question {
        Question {
            text: text.to_string(),
            answer: 12,
            hint: String::new(),
            meta: serde_json::Value::Null,
        }
    }

    fn flag(store: &mut InMemoryProgressStore, player: PlayerId, skill: &str, texts: &[&str]) {
        for text in texts {
            store
                .flag_question(player, skill, question(text), now())
                .unwrap();
        }
    }

    #[test]
    fn test_explicit_skill_with_three_flagged() {
        let registry = SkillRegistry::with_default_skills();
        let mut store = InMemoryProgressStore::new();
        let player = Uuid::new_v4();
        flag(&mut store, player, "doubles", &["6 + 6 = ?", "7 + 7 = ?", "9 + 9 = ?"]);

        let mut rng = StdRng::seed_from_u64(1);
        let plan = plan(
            &store,
            &PracticeConfig::default(),
            player,
            registry.skills(),
            Some("doubles"),
            now(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(plan.primary_skill_id, "doubles");
        assert_eq!(plan.slots.len(), 10);
        assert_eq!(plan.retry_count(), 2);
        assert!(plan.slots[0].is_flagged_retry);
        assert!(plan.slots[1].is_flagged_retry);
        assert!(plan.slots[2..].iter().all(|s| !s.is_flagged_retry));
        assert!(plan.slots.iter().all(|s| s.skill_id == "doubles"));
    }

    #[test]
    fn test_single_flagged_question_gives_single_retry() {
        let registry = SkillRegistry::with_default_skills();
        let mut store = InMemoryProgressStore::new();
        let player = Uuid::new_v4();
        flag(&mut store, player, "make-ten", &["3 + ? = 10"]);

        let mut rng = StdRng::seed_from_u64(1);
        let plan = plan(
            &store,
            &PracticeConfig::default(),
            player,
            registry.skills(),
            Some("make-ten"),
            now(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(plan.retry_count(), 1);
        assert!(plan.slots[0].is_flagged_retry);
    }

    #[test]
    fn test_unknown_explicit_skill() {
        let registry = SkillRegistry::with_default_skills();
        let store = InMemoryProgressStore::new();
        let mut rng = StdRng::seed_from_u64(1);

        let result = plan(
            &store,
            &PracticeConfig::default(),
            Uuid::new_v4(),
            registry.skills(),
            Some("times-7"),
            now(),
            &mut rng,
        );
        assert!(matches!(result, Err(CoreError::UnknownSkill(id)) if id == "times-7"));
    }

    #[test]
    fn test_warmup_slots_use_unlocked_skills() {
        let registry = SkillRegistry::with_default_skills();
        let store = InMemoryProgressStore::new();
        let player = Uuid::new_v4();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = plan(
                &store,
                &PracticeConfig::default(),
                player,
                registry.skills(),
                None,
                now(),
                &mut rng,
            )
            .unwrap();

            assert_eq!(plan.slots.len(), 10);
            assert_eq!(plan.retry_count(), 0);
            for slot in &plan.slots {
                assert!(["doubles", "make-ten"].contains(&slot.skill_id.as_str()));
            }
            assert!(
                plan.slots[2..]
                    .iter()
                    .all(|s| s.skill_id == plan.primary_skill_id)
            );
        }
    }

    #[test]
    fn test_retries_follow_warmup() {
        let mut registry = SkillRegistry::new();
        registry.register(
            SkillDescriptor::new("only", "Only"),
            std::sync::Arc::new(crate::facts::Doubles),
        );
        let mut store = InMemoryProgressStore::new();
        let player = Uuid::new_v4();
        flag(&mut store, player, "only", &["1 + 1 = ?", "2 + 2 = ?"]);

        let mut rng = StdRng::seed_from_u64(4);
        let plan = plan(
            &store,
            &PracticeConfig::default(),
            player,
            registry.skills(),
            None,
            now(),
            &mut rng,
        )
        .unwrap();

        let retries: Vec<bool> = plan.slots.iter().map(|s| s.is_flagged_retry).collect();
        assert_eq!(
            retries,
            [false, false, true, true, false, false, false, false, false, false]
        );
    }

    #[test]
    fn test_materialize_replays_flagged_and_uses_level() {
        let registry = SkillRegistry::with_default_skills();
        let mut store = InMemoryProgressStore::new();
        let player = Uuid::new_v4();
        flag(&mut store, player, "doubles", &["6 + 6 = ?", "7 + 7 = ?"]);
        store
            .put_mastery_record(
                player,
                "doubles",
                MasteryRecord {
                    level: 2,
                    ..MasteryRecord::new("doubles")
                },
            )
            .unwrap();

        let mut rng = StdRng::seed_from_u64(8);
        let plan = plan(
            &store,
            &PracticeConfig::default(),
            player,
            registry.skills(),
            Some("doubles"),
            now(),
            &mut rng,
        )
        .unwrap();
        let questions = plan
            .materialize(&store, &registry, player, &mut rng)
            .unwrap();

        assert_eq!(questions.len(), 10);
        assert_eq!(questions[0].question.text, "6 + 6 = ?");
        assert_eq!(questions[1].question.text, "7 + 7 = ?");
        for planned in &questions[2..] {
            let a = planned.question.meta["a"].as_i64().unwrap();
            assert!(a <= 10, "level 2 doubles go up to 10, got {a}");
        }
    }
}

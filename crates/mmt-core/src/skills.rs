//! Skill catalogue and the question-source seam.
//!
//! Skills are registered explicitly at startup in a [`SkillRegistry`], each with
//! the [`FactGenerator`] that produces its questions. The registry order is the
//! order skills are presented in and the order ties are resolved in.

use std::{collections::HashMap, fmt, sync::Arc};

use mmt_store::Question;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{error::CoreError, facts};

/// A practicable skill and its unlock prerequisite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDescriptor {
    pub id: String,
    pub name: String,
    /// Skill that must reach the unlock threshold before this one is offered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_requires: Option<String>,
}

impl SkillDescriptor {
    /// Skill with no prerequisite
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unlock_requires: None,
        }
    }

    /// Lock this skill behind `skill_id`
    pub fn unlocked_by(mut self, skill_id: impl Into<String>) -> Self {
        self.unlock_requires = Some(skill_id.into());
        self
    }
}

/// Produces questions for one skill at a given difficulty level
pub trait FactGenerator: Send + Sync {
    /// A question at `level`, clamped into the supported level range
    fn generate(&self, level: u8, rng: &mut dyn RngCore) -> Question;
}

/// Produces questions for any skill id
pub trait QuestionSource {
    /// Fails with [`CoreError::NoQuestionSource`] for an unregistered skill
    fn generate(
        &self,
        skill_id: &str,
        level: u8,
        rng: &mut dyn RngCore,
    ) -> Result<Question, CoreError>;
}

/// Ordered skills and their generators
#[derive(Default, Clone)]
pub struct SkillRegistry {
    skills: Vec<SkillDescriptor>,
    generators: HashMap<String, Arc<dyn FactGenerator>>,
}

impl fmt::Debug for SkillRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkillRegistry")
            .field("skills", &self.skills)
            .finish_non_exhaustive()
    }
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in addition and subtraction fact families
    pub fn with_default_skills() -> Self {
        let mut registry = Self::new();
        registry.register(
            SkillDescriptor::new("doubles", "Doubles"),
            Arc::new(facts::Doubles),
        );
        registry.register(
            SkillDescriptor::new("near-doubles", "Near doubles").unlocked_by("doubles"),
            Arc::new(facts::NearDoubles),
        );
        registry.register(
            SkillDescriptor::new("make-ten", "Make ten"),
            Arc::new(facts::MakeTen),
        );
        registry.register(
            SkillDescriptor::new("add-within-100", "Addition within 100").unlocked_by("make-ten"),
            Arc::new(facts::AddWithin100),
        );
        registry.register(
            SkillDescriptor::new("subtract-within-100", "Subtraction within 100")
                .unlocked_by("add-within-100"),
            Arc::new(facts::SubtractWithin100),
        );
        registry
    }

    /// Add a skill, replacing any skill already registered under the same id
    pub fn register(&mut self, skill: SkillDescriptor, generator: Arc<dyn FactGenerator>) {
        self.generators.insert(skill.id.clone(), generator);

        match self.skills.iter_mut().find(|s| s.id == skill.id) {
            Some(existing) => *existing = skill,
            None => self.skills.push(skill),
        }
    }

    pub fn skills(&self) -> &[SkillDescriptor] {
        &self.skills
    }

    pub fn get(&self, skill_id: &str) -> Option<&SkillDescriptor> {
        self.skills.iter().find(|s| s.id == skill_id)
    }

    pub fn contains(&self, skill_id: &str) -> bool {
        self.get(skill_id).is_some()
    }
}

impl QuestionSource for SkillRegistry {
    fn generate(
        &self,
        skill_id: &str,
        level: u8,
        rng: &mut dyn RngCore,
    ) -> Result<Question, CoreError> {
        let generator = self
            .generators
            .get(skill_id)
            .ok_or_else(|| CoreError::NoQuestionSource(skill_id.to_string()))?;

        Ok(generator.generate(level, rng))
    }
}

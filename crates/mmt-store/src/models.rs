use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Players are identified by a UUID
pub type PlayerId = Uuid;

/// Lowest difficulty level of a skill
pub const MIN_LEVEL: u8 = 1;
/// Highest difficulty level of a skill
pub const MAX_LEVEL: u8 = 5;
/// Upper bound of the mastery score
pub const MAX_MASTERY: u8 = 100;

/// Qualitative label derived from accuracy and average answer time
///
/// Serialized as the same text as [`AssessmentNote::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentNote {
    #[serde(rename = "mastered")]
    Mastered,
    #[serde(rename = "building fluency")]
    BuildingFluency,
    #[serde(rename = "developing, needs scaffolding")]
    Developing,
    #[serde(rename = "struggling, needs visual aids")]
    Struggling,
}

impl AssessmentNote {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mastered => "mastered",
            Self::BuildingFluency => "building fluency",
            Self::Developing => "developing, needs scaffolding",
            Self::Struggling => "struggling, needs visual aids",
        }
    }
}

impl fmt::Display for AssessmentNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mastery state of one player on one skill
///
/// Invariants: `mastery <= 100`, `1 <= level <= 5`, `total_correct <= total_attempts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasteryRecord {
    /// Skill this record tracks
    pub skill_id: String,
    /// Competence score, 0-100
    pub mastery: u8,
    /// Difficulty tier, 1-5
    pub level: u8,
    /// Number of answers given
    pub total_attempts: u32,
    /// Number of correct answers given
    pub total_correct: u32,
    /// Current run of correct answers
    pub streak: u32,
    /// Longest run of correct answers so far
    pub best_streak: u32,
    /// Rolling mean answer time in milliseconds (0 until the first answer)
    pub avg_time_ms: u32,
    /// Last time the skill was practiced (None for new records)
    pub last_practiced_at: Option<DateTime<Utc>>,
    /// Label computed by the last assessment
    pub assessment_note: Option<AssessmentNote>,
}

impl MasteryRecord {
    /// Fresh record for a skill that has never been practiced
    pub fn new(skill_id: impl Into<String>) -> Self {
        Self {
            skill_id: skill_id.into(),
            mastery: 0,
            level: MIN_LEVEL,
            total_attempts: 0,
            total_correct: 0,
            streak: 0,
            best_streak: 0,
            avg_time_ms: 0,
            last_practiced_at: None,
            assessment_note: None,
        }
    }

    /// Fraction of correct answers, 0.0 when nothing has been answered yet
    pub fn accuracy(&self) -> f64 {
        if self.total_attempts == 0 {
            0.0
        } else {
            f64::from(self.total_correct) / f64::from(self.total_attempts)
        }
    }
}

/// A concrete question produced by a question source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// What the learner sees, e.g. "7 + 7 = ?"
    pub text: String,
    /// Expected answer
    pub answer: i64,
    /// Strategy hint shown after a miss or a slow answer
    pub hint: String,
    /// Generator-specific details (operands, operator, ...)
    #[serde(default)]
    pub meta: serde_json::Value,
}

/// A previously missed question queued for a forced retry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedQuestion {
    pub question: Question,
    pub flagged_at: DateTime<Utc>,
}

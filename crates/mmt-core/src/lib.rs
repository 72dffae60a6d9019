//! Adaptive practice core: mastery tracking, skill selection, session planning
//! and mental-math method recommendation.
//!
//! Every operation takes its collaborators explicitly: a [`ProgressStore`] for
//! records, a [`Settings`] view of the configuration, a random source and a
//! single `now` timestamp read from a [`Clock`] by the caller.
//!
//! [`ProgressStore`]: mmt_store::ProgressStore

pub mod clock;
pub mod config;
pub mod error;
pub mod facts;
pub mod mastery;
pub mod methods;
pub mod planner;
pub mod practice;
pub mod selector;
pub mod skills;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{PracticeConfig, Settings};
pub use error::CoreError;
pub use mastery::{AssessOutcome, LevelChange, assess};
pub use methods::{
    ArithmeticProblem, ComfortLevel, ComfortMap, MethodCandidate, MethodComfort, MethodRegistry,
    Operator, Recommendation, SolvingMethod,
};
pub use planner::{PlannedQuestion, QuestionSlot, SessionPlan, plan};
pub use practice::{
    AnswerOutcome, AnswerSubmission, ProgressSummary, SkillProgress, progress_summary,
    record_answer,
};
pub use selector::select_next;
pub use skills::{FactGenerator, QuestionSource, SkillDescriptor, SkillRegistry};

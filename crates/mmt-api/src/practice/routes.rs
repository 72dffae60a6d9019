use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use mmt_core::{AnswerOutcome, AnswerSubmission, PlannedQuestion, practice, planner};
use mmt_store::{PlayerId, Question};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{ApiState, error::ApiError, metrics};

/// Longest answer time accepted, one hour
const MAX_ANSWER_TIME_MS: u32 = 3_600_000;

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/players/{player_id}/sessions", post(start_session))
        .route("/players/{player_id}/answers", post(submit_answer))
}

#[derive(Debug, Default, Deserialize, Validate)]
struct SessionRequest {
    /// Practice this skill instead of letting the selector choose
    #[serde(default)]
    #[validate(length(min = 1))]
    skill_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    primary_skill_id: String,
    retry_count: usize,
    questions: Vec<PlannedQuestion>,
}

async fn start_session(
    State(state): State<ApiState>,
    Path(player_id): Path<PlayerId>,
    Json(payload): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    payload.validate()?;

    let now = state.clock.now();
    let mut rng = rand::thread_rng();
    let store = state.lock_store()?;

    let plan = planner::plan(
        &*store,
        &state.practice,
        player_id,
        state.skills.skills(),
        payload.skill_id.as_deref(),
        now,
        &mut rng,
    )?;
    let questions = plan.materialize(&*store, state.skills.as_ref(), player_id, &mut rng)?;
    drop(store);

    metrics::record_session_planned(payload.skill_id.is_some());
    tracing::info!(
        player = %player_id,
        skill = %plan.primary_skill_id,
        retries = plan.retry_count(),
        "Session started"
    );

    Ok(Json(SessionResponse {
        retry_count: plan.retry_count(),
        primary_skill_id: plan.primary_skill_id,
        questions,
    }))
}

#[derive(Debug, Deserialize, Validate)]
struct AnswerRequest {
    #[validate(length(min = 1))]
    skill_id: String,
    question: Question,
    correct: bool,
    #[validate(range(max = MAX_ANSWER_TIME_MS))]
    time_ms: u32,
    #[serde(default)]
    was_retry: bool,
}

impl From<AnswerRequest> for AnswerSubmission {
    fn from(req: AnswerRequest) -> Self {
        Self {
            skill_id: req.skill_id,
            question: req.question,
            correct: req.correct,
            time_ms: req.time_ms,
            was_retry: req.was_retry,
        }
    }
}

async fn submit_answer(
    State(state): State<ApiState>,
    Path(player_id): Path<PlayerId>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerOutcome>, ApiError> {
    payload.validate()?;

    if !state.skills.contains(&payload.skill_id) {
        return Err(ApiError::NotFound(format!(
            "Unknown skill: {}",
            payload.skill_id
        )));
    }

    let submission = AnswerSubmission::from(payload);
    let now = state.clock.now();
    let outcome = {
        let mut store = state.lock_store()?;
        practice::record_answer(&mut *store, &state.practice, player_id, &submission, now)?
    };

    metrics::record_answer(&submission.skill_id, submission.correct);
    if let Some(change) = outcome.assessment.level_change {
        metrics::record_level_change(&submission.skill_id, change);
    }

    Ok(Json(outcome))
}

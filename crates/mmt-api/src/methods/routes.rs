use axum::{Json, Router, extract::State, routing::post};
use mmt_core::{ArithmeticProblem, ComfortMap, Operator, Recommendation};
use serde::Deserialize;
use validator::Validate;

use crate::{ApiState, error::ApiError};

const MAX_OPERAND: i64 = 100_000;

pub fn routes() -> Router<ApiState> {
    Router::new().route("/methods/recommend", post(recommend))
}

#[derive(Debug, Deserialize, Validate)]
struct RecommendRequest {
    #[validate(range(min = 0, max = MAX_OPERAND))]
    a: i64,
    op: Operator,
    #[validate(range(min = 0, max = MAX_OPERAND))]
    b: i64,
    /// Per-method comfort keyed by method id
    #[serde(default)]
    comfort: ComfortMap,
}

/// Rank the methods for a problem and solve it with the best one
async fn recommend(
    State(state): State<ApiState>,
    Json(payload): Json<RecommendRequest>,
) -> Result<Json<Recommendation>, ApiError> {
    payload.validate()?;

    let problem = ArithmeticProblem::new(payload.a, payload.op, payload.b);
    let recommendation = state
        .methods
        .recommend(&problem, &payload.comfort)
        .ok_or_else(|| ApiError::NotFound(format!("No method applies to {problem}")))?;

    tracing::debug!(
        %problem,
        method = %recommendation.method_id,
        candidates = recommendation.candidates.len(),
        "Method recommended"
    );

    Ok(Json(recommendation))
}

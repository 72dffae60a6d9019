use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use mmt_core::{ProgressSummary, practice};
use mmt_store::PlayerId;

use crate::{ApiState, error::ApiError};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/players/{player_id}/progress", get(get_progress))
}

async fn get_progress(
    State(state): State<ApiState>,
    Path(player_id): Path<PlayerId>,
) -> Result<Json<ProgressSummary>, ApiError> {
    let store = state.lock_store()?;
    let summary =
        practice::progress_summary(&*store, &state.practice, player_id, state.skills.skills())?;

    Ok(Json(summary))
}

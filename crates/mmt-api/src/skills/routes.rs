use axum::{Json, Router, extract::State, routing::get};
use mmt_core::SkillDescriptor;

use crate::ApiState;

pub fn routes() -> Router<ApiState> {
    Router::new().route("/skills", get(list_skills))
}

/// Registered skills in registry order
async fn list_skills(State(state): State<ApiState>) -> Json<Vec<SkillDescriptor>> {
    Json(state.skills.skills().to_vec())
}

use std::sync::Arc;

use axum::{extract::State, Json};
use thatnightsky_catalogue::CatalogueSummary;

use crate::state::AppState;

pub async fn catalogue_summary(State(state): State<Arc<AppState>>) -> Json<CatalogueSummary> {
    Json(CatalogueSummary::from_catalogue(state.catalogue()))
}

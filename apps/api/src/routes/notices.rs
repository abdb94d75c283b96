use axum::{extract::State, Json};

use crate::notices::Notice;
use crate::state::AppState;

/// GET /api/v1/notices
/// Recent export notices, oldest first.
pub async fn handle_list_notices(State(state): State<AppState>) -> Json<Vec<Notice>> {
    Json(state.notices.recent())
}

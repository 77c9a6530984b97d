use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Local;
use gobarber_core::dashboard::DashboardCounts;
use gobarber_db::repositories::ClientRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard
///
/// Client totals, no-cut bands and upcoming birthdays as of today.
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let today = Local::now().date_naive();
    let clients = ClientRepo::list(&state.pool).await?;

    let mut counts = DashboardCounts::default();
    for client in &clients {
        counts.add_client(&client.birthday, client.last_cut.as_deref(), today);
    }

    Ok(Json(DataResponse { data: counts }))
}

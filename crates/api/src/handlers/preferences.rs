//! Handlers for the singleton notification preferences.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use gobarber_db::models::preferences::UpdatePreferences;
use gobarber_db::repositories::PreferencesRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/preferences
///
/// Current preferences, or the defaults when none were ever saved.
pub async fn get_preferences(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let prefs = PreferencesRepo::get_or_default(&state.pool).await?;

    Ok(Json(DataResponse { data: prefs }))
}

/// PUT /api/v1/preferences
///
/// Replace the preferences. Omitted fields reset to their defaults.
pub async fn update_preferences(
    State(state): State<AppState>,
    Json(input): Json<UpdatePreferences>,
) -> AppResult<impl IntoResponse> {
    let resolved = input.resolve()?;
    let prefs = PreferencesRepo::replace(&state.pool, &resolved).await?;

    tracing::info!(
        frequency = %resolved.frequency,
        notify_time = %resolved.notify_time,
        birthdays = resolved.birthdays,
        no_cut_15 = resolved.no_cut_15,
        no_cut_30 = resolved.no_cut_30,
        "Notification preferences updated",
    );

    Ok(Json(DataResponse { data: prefs }))
}

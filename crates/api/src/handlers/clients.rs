//! Handlers for the `/clients` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Local;
use gobarber_core::alerts::{NO_CUT_OVERDUE_DAYS, NO_CUT_SEVERE_DAYS};
use gobarber_core::clients::{birthday_in_month, is_overdue};
use gobarber_core::error::CoreError;
use gobarber_core::types::DbId;
use gobarber_db::models::client::{Client, CreateClient, UpdateClient};
use gobarber_db::repositories::ClientRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Accepted values for the `overdue` filter.
const OVERDUE_FILTERS: [i64; 2] = [NO_CUT_OVERDUE_DAYS, NO_CUT_SEVERE_DAYS];

/// Query parameters for `GET /clients`.
#[derive(Debug, Default, Deserialize)]
pub struct ClientListQuery {
    /// Only clients whose birthday falls in this month (1-12).
    pub birthday_month: Option<u32>,
    /// Only clients whose last cut is more than this many days ago
    /// (15 or 30). Clients without a recorded cut always match.
    pub overdue: Option<i64>,
}

impl ClientListQuery {
    fn validate(&self) -> AppResult<()> {
        if let Some(month) = self.birthday_month {
            if !(1..=12).contains(&month) {
                return Err(AppError::BadRequest(format!(
                    "birthday_month must be between 1 and 12, got {month}"
                )));
            }
        }
        if let Some(days) = self.overdue {
            if !OVERDUE_FILTERS.contains(&days) {
                return Err(AppError::BadRequest(format!(
                    "overdue must be one of {OVERDUE_FILTERS:?}, got {days}"
                )));
            }
        }
        Ok(())
    }

    fn matches(&self, client: &Client, today: chrono::NaiveDate) -> bool {
        let month_ok = self
            .birthday_month
            .map_or(true, |month| birthday_in_month(&client.birthday, month));
        let overdue_ok = self
            .overdue
            .map_or(true, |days| is_overdue(client.last_cut.as_deref(), today, days));
        month_ok && overdue_ok
    }
}

/// GET /api/v1/clients
///
/// List clients ordered by name, optionally filtered.
pub async fn list_clients(
    State(state): State<AppState>,
    Query(params): Query<ClientListQuery>,
) -> AppResult<impl IntoResponse> {
    params.validate()?;

    let today = Local::now().date_naive();
    let clients: Vec<Client> = ClientRepo::list(&state.pool)
        .await?
        .into_iter()
        .filter(|c| params.matches(c, today))
        .collect();

    Ok(Json(DataResponse { data: clients }))
}

/// GET /api/v1/clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let client = ClientRepo::find_by_id(&state.pool, client_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "client",
            id: client_id,
        }))?;

    Ok(Json(DataResponse { data: client }))
}

/// POST /api/v1/clients
pub async fn create_client(
    State(state): State<AppState>,
    Json(input): Json<CreateClient>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let client = ClientRepo::create(&state.pool, &input).await?;

    tracing::info!(client_id = client.id, name = %client.name, "Client created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// PUT /api/v1/clients/{id}
///
/// Replace every editable field of a client.
pub async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<DbId>,
    Json(input): Json<UpdateClient>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let client = ClientRepo::update(&state.pool, client_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "client",
            id: client_id,
        }))?;

    tracing::info!(client_id, "Client updated");

    Ok(Json(DataResponse { data: client }))
}

/// DELETE /api/v1/clients/{id}
pub async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ClientRepo::delete(&state.pool, client_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "client",
            id: client_id,
        }));
    }

    tracing::info!(client_id, "Client deleted");

    Ok(StatusCode::NO_CONTENT)
}

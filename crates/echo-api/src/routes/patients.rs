use axum::Json;
use axum::extract::{Path, State};
use echo_core::collections::PATIENTS;
use echo_core::models::patient::Patient;
use echo_storage::documents::load;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(load(state.store.as_ref(), PATIENTS, &id).await?))
}

use axum::Json;
use axum::extract::{Path, State};
use echo_core::ids::IdKind;
use echo_storage::counter::next_id;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct MintedId {
    pub kind: IdKind,
    pub id: String,
}

pub async fn mint_id(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<MintedId>, ApiError> {
    let kind: IdKind = kind.parse()?;
    let id = next_id(state.store.as_ref(), kind).await;
    Ok(Json(MintedId { kind, id }))
}

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use echo_core::collections::USERS;
use echo_core::ids::IdKind;
use echo_core::models::user::{ProfileUpdate, RegistrationForm, UserProfile};
use echo_storage::counter::next_id;
use echo_storage::documents::{load, load_optional, save};
use echo_storage::store::WriteMode;
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// A profile plus the completeness flags the profile page shows.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub complete: bool,
    pub missing_fields: Vec<&'static str>,
    pub license_verified: bool,
    pub title_line: String,
}

impl From<UserProfile> for ProfileView {
    fn from(profile: UserProfile) -> Self {
        Self {
            complete: profile.is_complete(),
            missing_fields: profile.missing_fields(),
            license_verified: profile.license_verified(),
            title_line: profile.title_line(),
            profile,
        }
    }
}

/// Create the profile for an already-authenticated user. Profiles are keyed
/// by the auth UID and carry a sequential `U` display ID.
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> Result<(StatusCode, Json<ProfileView>), ApiError> {
    let issues = form.issues();
    if !issues.is_empty() {
        return Err(ApiError::Registration(issues));
    }

    let store = state.store.as_ref();
    let auth_uid = form.auth_uid.trim();
    if auth_uid.is_empty() {
        return Err(ApiError::BadRequest("auth UID is missing".to_string()));
    }
    if load_optional::<UserProfile>(store, USERS, auth_uid).await?.is_some() {
        return Err(ApiError::Conflict(format!("user {auth_uid} is already registered")));
    }

    let profile = UserProfile {
        user_id: next_id(store, IdKind::User).await,
        auth_uid: auth_uid.to_string(),
        full_name: form.full_name.trim().to_string(),
        email: form.email.trim().to_string(),
        role: form.role_or_default().to_string(),
        specialty: String::new(),
        department: String::new(),
        license_id: String::new(),
        photo_url: None,
        created_at: jiff::Timestamp::now(),
    };
    save(store, USERS, auth_uid, &profile, WriteMode::Replace).await?;
    info!(user_id = %profile.user_id, "user registered");

    Ok((StatusCode::CREATED, Json(profile.into())))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<ProfileView>, ApiError> {
    let profile: UserProfile = load(state.store.as_ref(), USERS, &uid).await?;
    Ok(Json(profile.into()))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<ProfileView>, ApiError> {
    let store = state.store.as_ref();
    let mut profile: UserProfile = load(store, USERS, &uid).await?;
    profile.apply(update);
    save(store, USERS, &uid, &profile, WriteMode::Replace).await?;
    info!(user_id = %profile.user_id, "profile updated");
    Ok(Json(profile.into()))
}

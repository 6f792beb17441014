//! Handlers for the `/trips` resource.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use friendtrip_core::accounts::validate_trip_name;
use friendtrip_core::error::CoreError;
use friendtrip_core::imaging::compress_image;
use friendtrip_core::naming::{secure_upload_name, stored_photo_filename};
use friendtrip_core::trip_code::{
    generate_trip_code, normalize_trip_code, validate_trip_code, MAX_CODE_ATTEMPTS,
};
use friendtrip_core::types::DbId;
use friendtrip_core::uploads::is_allowed_file;
use friendtrip_db::models::album::AlbumSummary;
use friendtrip_db::models::photo::CreatePhoto;
use friendtrip_db::models::trip::{CreateTrip, Trip, TripMember};
use friendtrip_db::repositories::{AlbumRepo, PhotoRepo, TripRepo};
use friendtrip_db::is_unique_violation;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::require_member;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::{photo_path, remove_photo_file, store_unique};

/// Multipart field carrying uploaded photos. May repeat.
const PHOTOS_FIELD: &str = "photos";

const INVALID_CODE: &str = "Invalid Trip Code";

/// Request body for `POST /trips`.
#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    #[serde(default)]
    pub name: String,
}

/// Request body for `POST /trips/join`.
#[derive(Debug, Deserialize)]
pub struct JoinTripRequest {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct JoinTripResponse {
    pub trip: Trip,
    pub already_member: bool,
}

/// A trip page: the trip, who is in it, and one card per album.
#[derive(Debug, Serialize)]
pub struct TripDetail {
    pub trip: Trip,
    pub members: Vec<TripMember>,
    pub albums: Vec<AlbumSummary>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub count: usize,
    pub album_id: DbId,
}

/// GET /api/v1/trips
///
/// The caller's trips, newest first.
pub async fn list_trips(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Trip>>>> {
    let trips = TripRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: trips }))
}

/// POST /api/v1/trips
///
/// Create a trip with a fresh join code. The creator becomes its first member.
pub async fn create_trip(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateTripRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Trip>>)> {
    let name = validate_trip_name(&input.name)?;

    for attempt in 1..=MAX_CODE_ATTEMPTS {
        let code = generate_trip_code();
        if TripRepo::code_exists(&state.pool, &code).await? {
            tracing::debug!(attempt, "Trip code collision, retrying");
            continue;
        }

        let create = CreateTrip {
            name: name.clone(),
            code,
            created_by_id: auth.user_id,
        };
        match TripRepo::create_with_creator(&state.pool, &create).await {
            Ok(trip) => {
                tracing::info!(trip_id = trip.id, user_id = auth.user_id, code = %trip.code, "Trip created");
                return Ok((StatusCode::CREATED, Json(DataResponse { data: trip })));
            }
            // Another request took the code between the check and the insert.
            Err(e) if is_unique_violation(&e) => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::InternalError(format!(
        "No free trip code after {MAX_CODE_ATTEMPTS} attempts"
    )))
}

/// POST /api/v1/trips/join
///
/// Join a trip by its code. Joining twice is not an error.
pub async fn join_trip(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<JoinTripRequest>,
) -> AppResult<Json<JoinTripResponse>> {
    let code = normalize_trip_code(&input.code);
    let invalid = || AppError::NotFound(INVALID_CODE.into());

    // Malformed codes cannot match any trip.
    validate_trip_code(&code).map_err(|_| invalid())?;
    let trip = TripRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(invalid)?;

    let joined = TripRepo::add_member(&state.pool, trip.id, auth.user_id).await?;
    if joined {
        tracing::info!(trip_id = trip.id, user_id = auth.user_id, "User joined trip");
    }

    Ok(Json(JoinTripResponse {
        trip,
        already_member: !joined,
    }))
}

/// GET /api/v1/trips/{id}
pub async fn get_trip(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TripDetail>>> {
    let trip = find_trip(&state, id).await?;
    require_member(
        &state.pool,
        trip.id,
        auth.user_id,
        "You must join this trip to view photos.",
    )
    .await?;

    let members = TripRepo::list_members(&state.pool, trip.id).await?;
    let albums = AlbumRepo::list_summaries_for_trip(&state.pool, trip.id).await?;

    Ok(Json(DataResponse {
        data: TripDetail {
            trip,
            members,
            albums,
        },
    }))
}

/// POST /api/v1/trips/{id}/photos
///
/// Multipart upload into the caller's album for this trip. Every `photos`
/// part with an allowed extension is stored; other parts are skipped.
pub async fn upload_photos(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let trip = find_trip(&state, id).await?;
    require_member(&state.pool, trip.id, auth.user_id, "Not a member").await?;

    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some(PHOTOS_FIELD) {
            continue;
        }
        let Some(original) = field.file_name().filter(|n| !n.is_empty()).map(str::to_string)
        else {
            continue;
        };
        let data = field.bytes().await.map_err(multipart_error)?;
        files.push((original, data.to_vec()));
    }

    if files.is_empty() {
        return Err(AppError::BadRequest("No files".into()));
    }

    let album = AlbumRepo::get_or_create(&state.pool, auth.user_id, trip.id).await?;

    let mut count = 0;
    for (original, data) in files {
        if !is_allowed_file(&original) {
            tracing::debug!(filename = %original, "Skipping upload with disallowed extension");
            continue;
        }

        let base = stored_photo_filename(
            &trip.code,
            &auth.username,
            Utc::now(),
            &secure_upload_name(&original),
        );
        let filename = store_unique(&state.pool, &state.config.upload_dir, &base, &data).await?;
        let path = photo_path(&state.config.upload_dir, &filename);

        if state.config.compress_uploads {
            let target = path.clone();
            match tokio::task::spawn_blocking(move || compress_image(&target)).await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => {
                    tracing::warn!(filename = %filename, error = %e, "Compression failed, keeping original")
                }
                Err(e) => {
                    tracing::warn!(filename = %filename, error = %e, "Compression task failed, keeping original")
                }
            }
        }

        let create = CreatePhoto {
            filename: filename.clone(),
            album_id: album.id,
        };
        if let Err(e) = PhotoRepo::create(&state.pool, &create).await {
            tracing::error!(filename = %filename, error = %e, "Failed to record photo, skipping");
            if let Err(io) = remove_photo_file(&path).await {
                tracing::error!(filename = %filename, error = %io, "Failed to remove orphaned upload");
            }
            continue;
        }
        count += 1;
    }

    tracing::info!(
        trip_id = trip.id,
        album_id = album.id,
        user_id = auth.user_id,
        count,
        "Photos uploaded"
    );

    Ok(Json(UploadResponse {
        success: true,
        count,
        album_id: album.id,
    }))
}

/// Body-limit overruns surface as 413; any other framing problem is a 400.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Upload exceeds the size limit".into())
    } else {
        AppError::BadRequest(e.body_text())
    }
}

async fn find_trip(state: &AppState, id: DbId) -> AppResult<Trip> {
    TripRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Trip", id }))
}

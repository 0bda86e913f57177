use crate::domain::shared::pagination::{PaginatedResponse, PaginationRequest};
use crate::domain::track::{
    entity::Track,
    repository::{TrackMetadataUpdate, TrackRepository, TrackSort},
    value_objects::{Bpm, MusicalKey, TrackTitle},
};
use crate::infrastructure::storage::traits::StorageService;
use crate::presentation::http::{errors::AppError, state::AppState};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

/// Query parameters for the public catalog listing.
///
/// All parameters are optional with defaults chosen for first-page browsing.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Maximum number of results to return (1-100, default 50)
    #[serde(default = "default_limit")]
    limit: i64,

    /// Number of results to skip for pagination (default 0)
    #[serde(default)]
    offset: i64,

    /// Sort order: "newest" (default), "oldest", "popular"
    sort_by: Option<String>,
}

fn default_limit() -> i64 {
    50
}

pub async fn list_tracks(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> Result<Json<PaginatedResponse<Track>>, AppError> {
    let page = PaginationRequest {
        limit: params.limit,
        offset: params.offset,
    }
    .clamped();

    let sort = match params.sort_by.as_deref() {
        Some("oldest") => TrackSort::Oldest,
        Some("popular") => TrackSort::Popular,
        _ => TrackSort::Newest,
    };

    let (items, total) = state.track_repo.list(&page, sort).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        limit: page.limit,
        offset: page.offset,
    }))
}

pub async fn get_track(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Track>, AppError> {
    let track = state
        .track_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Track not found".to_string()))?;
    Ok(Json(track))
}

#[derive(Debug, Deserialize)]
pub struct UpdateTrackRequest {
    pub title: Option<String>,
    pub bpm: Option<i32>,
    pub music_key: Option<String>,
    pub description: Option<String>,
    pub for_sale: Option<bool>,
    pub price: Option<f64>,
}

/// Admin: partial metadata update. Provided fields are validated and applied;
/// absent fields keep their current value. An empty description clears it.
pub async fn update_track(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTrackRequest>,
) -> Result<Json<Track>, AppError> {
    if body.title.is_none()
        && body.bpm.is_none()
        && body.music_key.is_none()
        && body.description.is_none()
        && body.for_sale.is_none()
        && body.price.is_none()
    {
        return Err(AppError::BadRequest("No updates provided".to_string()));
    }

    let existing = state
        .track_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Track not found".to_string()))?;

    let title = match body.title {
        Some(t) => {
            TrackTitle::new(t.trim().to_string())
                .map_err(|_| AppError::ValidationError("Title must be 1-120 characters".into()))?
                .value
        }
        None => existing.title,
    };
    let bpm = match body.bpm {
        Some(b) => {
            Bpm::new(b)
                .map_err(|_| AppError::ValidationError("BPM must be between 0 and 400".into()))?
                .value
        }
        None => existing.bpm,
    };
    let music_key = match body.music_key {
        Some(k) => {
            MusicalKey::new(k.trim().to_string())
                .map_err(|_| {
                    AppError::ValidationError("Key must look like C, F#, Bbm or be empty".into())
                })?
                .value
        }
        None => existing.music_key,
    };
    let description = match body.description {
        Some(d) => {
            let trimmed = d.trim().to_string();
            if trimmed.is_empty() { None } else { Some(trimmed) }
        }
        None => existing.description,
    };
    let for_sale = body.for_sale.unwrap_or(existing.for_sale);
    let price = match body.price {
        Some(p) => {
            if !p.is_finite() || p < 0.0 {
                return Err(AppError::ValidationError(
                    "Price must be a non-negative number".into(),
                ));
            }
            Some(p)
        }
        None => existing.price,
    };

    let track = state
        .track_repo
        .update_metadata(
            id,
            TrackMetadataUpdate {
                title,
                bpm,
                music_key,
                description,
                for_sale,
                price,
            },
        )
        .await?;

    Ok(Json(track))
}

/// Admin: delete a track, its storage objects, and (by cascade) its comments
/// and purchase requests. Storage deletion is best-effort: a failed object
/// removal is logged and the row still goes away.
pub async fn delete_track(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let track = state
        .track_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Track not found".to_string()))?;

    for url in std::iter::once(&track.audio_url).chain(track.cover_url.iter()) {
        if let Some(key) = storage_key_from_url(url) {
            if let Err(e) = state.storage.delete(&key).await {
                tracing::error!("Failed to delete storage object {}: {}", key, e);
            }
        }
    }

    state.track_repo.delete(id).await?;

    tracing::info!(track_id = %id, "Track deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Recover the storage key ("audio/xxx.mp3", "covers/xxx.webp") from a public
/// URL. Keys are always exactly two path segments deep.
pub(crate) fn storage_key_from_url(url: &str) -> Option<String> {
    let mut segments = url.rsplit('/');
    let file = segments.next()?;
    let dir = segments.next()?;
    if file.is_empty() || dir.is_empty() || dir.contains(':') {
        return None;
    }
    Some(format!("{}/{}", dir, file))
}

use crate::domain::profile::{
    entity::{Profile, Socials},
    repository::{ProfileRepository, ProfileUpdate},
};
use crate::infrastructure::storage::traits::StorageService;
use crate::presentation::http::handlers::tracks::storage_key_from_url;
use crate::presentation::http::{errors::AppError, state::AppState};
use axum::{
    Json,
    extract::{Multipart, State},
};
use image::{ImageFormat, imageops::FilterType};
use std::io::Cursor;
use uuid::Uuid;

/// Maximum edge of stored profile imagery.
const PROFILE_IMAGE_MAX_EDGE: u32 = 1600;

/// Largest accepted background blur radius (px).
const MAX_BACKGROUND_BLUR: i32 = 40;

pub async fn get_profile(State(state): State<AppState>) -> Result<Json<Profile>, AppError> {
    let profile = state.profile_repo.get().await?;
    Ok(Json(profile))
}

/// One image slot of the profile form: replace, delete, or keep.
struct ImageSlot {
    upload: Option<Vec<u8>>,
    delete: bool,
}

impl ImageSlot {
    fn new() -> Self {
        Self {
            upload: None,
            delete: false,
        }
    }

    /// Resolve the slot against the currently stored URL. Replacing or
    /// deleting removes the superseded storage object best-effort.
    async fn resolve(
        self,
        state: &AppState,
        label: &str,
        current: Option<String>,
    ) -> Result<Option<String>, AppError> {
        if self.delete {
            delete_profile_object(state, current.as_deref()).await;
            return Ok(None);
        }
        match self.upload {
            Some(bytes) if !bytes.is_empty() => {
                let url = store_profile_image(state, label, &bytes).await?;
                delete_profile_object(state, current.as_deref()).await;
                Ok(Some(url))
            }
            _ => Ok(current),
        }
    }
}

async fn delete_profile_object(state: &AppState, url: Option<&str>) {
    if let Some(key) = url.and_then(storage_key_from_url) {
        if let Err(e) = state.storage.delete(&key).await {
            tracing::error!("Failed to delete storage object {}: {}", key, e);
        }
    }
}

async fn store_profile_image(
    state: &AppState,
    label: &str,
    bytes: &[u8],
) -> Result<String, AppError> {
    let img = image::load_from_memory(bytes)?;
    let mut buf = Cursor::new(Vec::new());
    img.resize(
        PROFILE_IMAGE_MAX_EDGE,
        PROFILE_IMAGE_MAX_EDGE,
        FilterType::Lanczos3,
    )
    .write_to(&mut buf, ImageFormat::WebP)
    .map_err(|e| AppError::Storage(format!("Failed to encode image to WebP: {}", e)))?;

    // UUID in the key busts CDN caches when an image is replaced.
    let url = state
        .storage
        .upload(
            &format!("profile/{}-{}.webp", label, Uuid::now_v7()),
            buf.into_inner(),
            "image/webp",
        )
        .await?;
    Ok(url)
}

/// Admin: update profile text, socials, and appearance imagery.
///
/// Multipart fields: `artist_name`, `tagline`, `instagram`, `twitter`,
/// `youtube`, `email`, `background_blur`, image files `avatar` / `banner` /
/// `background`, and flags `delete_avatar` / `delete_banner` /
/// `delete_background`. Absent fields keep their current value.
pub async fn update_profile(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Profile>, AppError> {
    let mut artist_name = None;
    let mut tagline = None;
    let mut instagram = None;
    let mut twitter = None;
    let mut youtube = None;
    let mut email = None;
    let mut background_blur = None;
    let mut avatar = ImageSlot::new();
    let mut banner = ImageSlot::new();
    let mut background = ImageSlot::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("Field error".into()))?
    {
        match field.name().unwrap_or("") {
            "artist_name" => artist_name = Some(field.text().await.unwrap_or_default()),
            "tagline" => tagline = Some(field.text().await.unwrap_or_default()),
            "instagram" => instagram = Some(field.text().await.unwrap_or_default()),
            "twitter" => twitter = Some(field.text().await.unwrap_or_default()),
            "youtube" => youtube = Some(field.text().await.unwrap_or_default()),
            "email" => email = Some(field.text().await.unwrap_or_default()),
            "background_blur" => {
                background_blur = field.text().await.unwrap_or_default().trim().parse().ok()
            }
            "avatar" => {
                avatar.upload = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|_| AppError::BadRequest("Byte error".into()))?
                        .to_vec(),
                )
            }
            "banner" => {
                banner.upload = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|_| AppError::BadRequest("Byte error".into()))?
                        .to_vec(),
                )
            }
            "background" => {
                background.upload = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|_| AppError::BadRequest("Byte error".into()))?
                        .to_vec(),
                )
            }
            "delete_avatar" => {
                avatar.delete = field.text().await.unwrap_or_default().trim() == "true"
            }
            "delete_banner" => {
                banner.delete = field.text().await.unwrap_or_default().trim() == "true"
            }
            "delete_background" => {
                background.delete = field.text().await.unwrap_or_default().trim() == "true"
            }
            _ => {}
        }
    }

    let current = state.profile_repo.get().await?;

    let artist_name = match artist_name.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => {
            if v.len() > 60 {
                return Err(AppError::ValidationError(
                    "Artist name must be 60 characters or less".into(),
                ));
            }
            v
        }
        _ => current.artist_name,
    };
    let tagline = match tagline.map(|v| v.trim().to_string()) {
        Some(v) => {
            if v.len() > 160 {
                return Err(AppError::ValidationError(
                    "Tagline must be 160 characters or less".into(),
                ));
            }
            v
        }
        None => current.tagline,
    };

    let normalize = |input: Option<String>, current: Option<String>| match input {
        Some(v) => {
            let trimmed = v.trim().to_string();
            if trimmed.is_empty() { None } else { Some(trimmed) }
        }
        None => current,
    };

    let socials = Socials {
        instagram: normalize(instagram, current.socials.instagram),
        twitter: normalize(twitter, current.socials.twitter),
        youtube: normalize(youtube, current.socials.youtube),
        email: normalize(email, current.socials.email),
    };

    let avatar_url = avatar.resolve(&state, "avatar", current.avatar_url).await?;
    let banner_url = banner.resolve(&state, "banner", current.banner_url).await?;
    let background_url = background
        .resolve(&state, "background", current.background_url)
        .await?;

    let background_blur = background_blur
        .unwrap_or(current.background_blur)
        .clamp(0, MAX_BACKGROUND_BLUR);

    let profile = state
        .profile_repo
        .update(ProfileUpdate {
            artist_name,
            tagline,
            avatar_url,
            banner_url,
            background_url,
            background_blur,
            socials,
        })
        .await?;

    tracing::info!("Profile updated");

    Ok(Json(profile))
}

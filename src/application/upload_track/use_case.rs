use super::dto::UploadTrackInput;
use crate::domain::track::entity::Track;
use crate::domain::track::errors::DomainError;
use crate::domain::track::repository::TrackRepository;
use crate::domain::track::value_objects::{Bpm, MusicalKey, TrackTitle};
use crate::infrastructure::storage::traits::StorageService;
use chrono::Utc;
use image::{ImageFormat, imageops::FilterType};
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::sync::Arc;
use uuid::Uuid;

/// Maximum edge of stored cover art; larger uploads are scaled down.
const COVER_MAX_EDGE: u32 = 1200;

pub struct UploadTrackUseCase {
    tracks: Arc<dyn TrackRepository>,
    storage: Arc<dyn StorageService>,
}

impl UploadTrackUseCase {
    pub fn new(tracks: Arc<dyn TrackRepository>, storage: Arc<dyn StorageService>) -> Self {
        Self { tracks, storage }
    }

    /// Validate, store, and register a new track.
    ///
    /// The audio file is stored verbatim under `audio/{id}.{ext}`; its SHA-256
    /// rejects byte-identical re-uploads. Cover art is decoded, bounded to
    /// 1200px, re-encoded as WebP under `covers/{id}.webp`.
    pub async fn execute(&self, input: UploadTrackInput) -> Result<Track, DomainError> {
        let title = TrackTitle::new(input.title.trim().to_string())
            .map_err(|_| DomainError::ValidationError("Title must be 1-120 characters".into()))?;
        let bpm = Bpm::new(input.bpm)
            .map_err(|_| DomainError::ValidationError("BPM must be between 0 and 400".into()))?;
        let music_key = MusicalKey::new(input.music_key.trim().to_string()).map_err(|_| {
            DomainError::ValidationError("Key must look like C, F#, Bbm or be empty".into())
        })?;

        if input.audio.bytes.is_empty() {
            return Err(DomainError::ValidationError("Audio file is empty".into()));
        }
        if let Some(price) = input.price {
            if !price.is_finite() || price < 0.0 {
                return Err(DomainError::ValidationError(
                    "Price must be a non-negative number".into(),
                ));
            }
        }

        let mut hasher = Sha256::new();
        hasher.update(&input.audio.bytes);
        let audio_hash = format!("{:x}", hasher.finalize());

        if self.tracks.find_by_audio_hash(&audio_hash).await?.is_some() {
            return Err(DomainError::ValidationError(
                "This exact audio file has already been uploaded".into(),
            ));
        }

        let id = Uuid::now_v7();
        let ext = audio_extension(&input.audio.file_name);
        let audio_url = self
            .storage
            .upload(
                &format!("audio/{}.{}", id, ext),
                input.audio.bytes,
                audio_content_type(&ext),
            )
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        let cover_url = match input.cover {
            Some(cover) if !cover.bytes.is_empty() => {
                let img = image::load_from_memory(&cover.bytes)
                    .map_err(|_| DomainError::ValidationError("Invalid cover image".into()))?;
                let mut buf = Cursor::new(Vec::new());
                img.resize(COVER_MAX_EDGE, COVER_MAX_EDGE, FilterType::Lanczos3)
                    .write_to(&mut buf, ImageFormat::WebP)
                    .map_err(|e| {
                        DomainError::InfrastructureError(format!("Cover encoding failed: {}", e))
                    })?;
                Some(
                    self.storage
                        .upload(
                            &format!("covers/{}.webp", id),
                            buf.into_inner(),
                            "image/webp",
                        )
                        .await
                        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?,
                )
            }
            _ => None,
        };

        let now = Utc::now();
        let track = Track {
            id,
            title: title.value,
            bpm: bpm.value,
            music_key: music_key.value,
            audio_url,
            cover_url,
            description: input
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            for_sale: input.for_sale,
            price: input.price,
            like_count: 0,
            dislike_count: 0,
            audio_hash: Some(audio_hash),
            created_at: now,
            updated_at: now,
        };
        self.tracks.create(&track).await?;

        tracing::info!(track_id = %track.id, title = %track.title, "Track uploaded");
        Ok(track)
    }
}

/// Sanitized lowercase extension from the uploaded file name; anything
/// suspicious collapses to "bin".
fn audio_extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or_else(|| "bin".to_string())
}

fn audio_content_type(ext: &str) -> &'static str {
    match ext {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" | "mp4" => "audio/mp4",
        "aac" => "audio/aac",
        _ => "application/octet-stream",
    }
}

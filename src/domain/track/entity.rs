use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Core domain entity representing a published track.
///
/// A track is one uploadable unit in the artist's catalog: the audio file
/// itself plus display metadata and the authoritative reaction counters.
/// BPM and musical key are supplied by the uploader (typically pre-filled by
/// the in-browser audio analysis before submission) and are display metadata
/// only; the server never derives them.
///
/// # Invariants
/// - `id` is unique across all tracks
/// - `like_count` and `dislike_count` are non-negative; every counter update
///   floors at zero
/// - `audio_url` points to an object in persistent storage
/// - `price` is only meaningful while `for_sale` is true
#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct Track {
    /// Unique identifier for this track
    pub id: Uuid,

    /// Display title
    pub title: String,

    /// Tempo in beats per minute; 0 means unknown/not provided
    pub bpm: i32,

    /// Musical key (e.g. "F#m"); empty string means unknown
    pub music_key: String,

    /// URL of the audio object in persistent storage
    pub audio_url: String,

    /// URL of the cover art object, if any
    pub cover_url: Option<String>,

    /// Free-form description shown on the track page (optional)
    pub description: Option<String>,

    /// Whether visitors may file purchase requests for this track
    pub for_sale: bool,

    /// Asking price shown alongside the purchase call-to-action (optional)
    pub price: Option<f64>,

    /// Authoritative like total (floored at zero on every update)
    pub like_count: i32,

    /// Authoritative dislike total (floored at zero on every update)
    pub dislike_count: i32,

    /// SHA-256 of the uploaded audio, used for duplicate rejection
    #[ts(skip)]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub audio_hash: Option<String>,

    /// Timestamp of the original upload
    pub created_at: DateTime<Utc>,

    /// Timestamp of the most recent modification (metadata or counters)
    pub updated_at: DateTime<Utc>,
}

use super::entity::Track;
use crate::domain::shared::pagination::PaginationRequest;
use crate::domain::track::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

/// Sort order for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackSort {
    Newest,
    Oldest,
    Popular,
}

/// Fully-resolved metadata values for an update.
///
/// Handlers resolve partial requests against the existing row first, so the
/// repository writes one complete, validated set of columns.
#[derive(Debug, Clone)]
pub struct TrackMetadataUpdate {
    pub title: String,
    pub bpm: i32,
    pub music_key: String,
    pub description: Option<String>,
    pub for_sale: bool,
    pub price: Option<f64>,
}

#[async_trait]
pub trait TrackRepository: Send + Sync {
    async fn list(
        &self,
        page: &PaginationRequest,
        sort: TrackSort,
    ) -> Result<(Vec<Track>, i64), DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Track>, DomainError>;
    async fn find_by_audio_hash(&self, audio_hash: &str) -> Result<Option<Track>, DomainError>;
    async fn create(&self, track: &Track) -> Result<(), DomainError>;
    async fn update_metadata(
        &self,
        id: Uuid,
        update: TrackMetadataUpdate,
    ) -> Result<Track, DomainError>;

    /// Apply a marginal counter adjustment with floor-at-zero clamping:
    /// `new = GREATEST(0, old + delta)` per counter, in a single statement.
    async fn apply_reaction_deltas(
        &self,
        id: Uuid,
        like_delta: i32,
        dislike_delta: i32,
    ) -> Result<Track, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

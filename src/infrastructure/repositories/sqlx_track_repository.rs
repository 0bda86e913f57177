use crate::domain::shared::pagination::PaginationRequest;
use crate::domain::track::{
    entity::Track,
    errors::DomainError,
    repository::{TrackMetadataUpdate, TrackRepository, TrackSort},
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const TRACK_COLUMNS: &str = "id, title, bpm, music_key, audio_url, cover_url, description, \
     for_sale, price, like_count, dislike_count, audio_hash, created_at, updated_at";

pub struct SqlxTrackRepository {
    pub pool: PgPool,
}

impl SqlxTrackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackRepository for SqlxTrackRepository {
    async fn list(
        &self,
        page: &PaginationRequest,
        sort: TrackSort,
    ) -> Result<(Vec<Track>, i64), DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM tracks")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM tracks", TRACK_COLUMNS));
        let order_by = match sort {
            TrackSort::Oldest => " ORDER BY created_at ASC",
            TrackSort::Popular => " ORDER BY like_count DESC, created_at DESC",
            TrackSort::Newest => " ORDER BY created_at DESC",
        };
        qb.push(order_by)
            .push(" LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let tracks: Vec<Track> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        Ok((tracks, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Track>, DomainError> {
        sqlx::query_as::<_, Track>(&format!(
            "SELECT {} FROM tracks WHERE id = $1",
            TRACK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn find_by_audio_hash(&self, audio_hash: &str) -> Result<Option<Track>, DomainError> {
        sqlx::query_as::<_, Track>(&format!(
            "SELECT {} FROM tracks WHERE audio_hash = $1",
            TRACK_COLUMNS
        ))
        .bind(audio_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn create(&self, track: &Track) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO tracks (
                id, title, bpm, music_key, audio_url, cover_url, description,
                for_sale, price, like_count, dislike_count, audio_hash, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(track.id)
        .bind(&track.title)
        .bind(track.bpm)
        .bind(&track.music_key)
        .bind(&track.audio_url)
        .bind(&track.cover_url)
        .bind(&track.description)
        .bind(track.for_sale)
        .bind(track.price)
        .bind(track.like_count)
        .bind(track.dislike_count)
        .bind(&track.audio_hash)
        .bind(track.created_at)
        .bind(track.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(())
    }

    async fn update_metadata(
        &self,
        id: Uuid,
        update: TrackMetadataUpdate,
    ) -> Result<Track, DomainError> {
        sqlx::query_as::<_, Track>(&format!(
            "UPDATE tracks
             SET title = $2, bpm = $3, music_key = $4, description = $5,
                 for_sale = $6, price = $7, updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            TRACK_COLUMNS
        ))
        .bind(id)
        .bind(&update.title)
        .bind(update.bpm)
        .bind(&update.music_key)
        .bind(&update.description)
        .bind(update.for_sale)
        .bind(update.price)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?
        .ok_or_else(|| DomainError::NotFound("Track not found".into()))
    }

    async fn apply_reaction_deltas(
        &self,
        id: Uuid,
        like_delta: i32,
        dislike_delta: i32,
    ) -> Result<Track, DomainError> {
        // Clamped add in one statement keeps delta application commutative:
        // out-of-order reconciliation calls still converge.
        sqlx::query_as::<_, Track>(&format!(
            "UPDATE tracks
             SET like_count = GREATEST(0, like_count + $2),
                 dislike_count = GREATEST(0, dislike_count + $3),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            TRACK_COLUMNS
        ))
        .bind(id)
        .bind(like_delta)
        .bind(dislike_delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?
        .ok_or_else(|| DomainError::NotFound("Track not found".into()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM tracks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Track not found".into()));
        }
        Ok(())
    }
}

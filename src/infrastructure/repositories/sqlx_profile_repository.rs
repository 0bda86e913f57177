use crate::domain::profile::{
    entity::{Profile, Socials},
    repository::{ProfileRepository, ProfileUpdate},
};
use crate::domain::track::errors::DomainError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct SqlxProfileRepository {
    pub pool: PgPool,
}

impl SqlxProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    artist_name: String,
    tagline: String,
    avatar_url: Option<String>,
    banner_url: Option<String>,
    background_url: Option<String>,
    background_blur: i32,
    instagram: Option<String>,
    twitter: Option<String>,
    youtube: Option<String>,
    email: Option<String>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(r: ProfileRow) -> Self {
        Profile {
            artist_name: r.artist_name,
            tagline: r.tagline,
            avatar_url: r.avatar_url,
            banner_url: r.banner_url,
            background_url: r.background_url,
            background_blur: r.background_blur,
            socials: Socials {
                instagram: r.instagram,
                twitter: r.twitter,
                youtube: r.youtube,
                email: r.email,
            },
            updated_at: r.updated_at,
        }
    }
}

const PROFILE_COLUMNS: &str = "artist_name, tagline, avatar_url, banner_url, background_url, \
     background_blur, instagram, twitter, youtube, email, updated_at";

#[async_trait]
impl ProfileRepository for SqlxProfileRepository {
    async fn get(&self) -> Result<Profile, DomainError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {} FROM profile WHERE id = 1",
            PROFILE_COLUMNS
        ))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        // The row is seeded by migration; fall back to defaults if it is
        // somehow absent rather than failing a public page.
        Ok(row.map(Into::into).unwrap_or_default())
    }

    async fn update(&self, update: ProfileUpdate) -> Result<Profile, DomainError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "INSERT INTO profile (
                id, artist_name, tagline, avatar_url, banner_url, background_url,
                background_blur, instagram, twitter, youtube, email, updated_at
            ) VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW())
            ON CONFLICT (id) DO UPDATE SET
                artist_name = EXCLUDED.artist_name,
                tagline = EXCLUDED.tagline,
                avatar_url = EXCLUDED.avatar_url,
                banner_url = EXCLUDED.banner_url,
                background_url = EXCLUDED.background_url,
                background_blur = EXCLUDED.background_blur,
                instagram = EXCLUDED.instagram,
                twitter = EXCLUDED.twitter,
                youtube = EXCLUDED.youtube,
                email = EXCLUDED.email,
                updated_at = NOW()
            RETURNING {}",
            PROFILE_COLUMNS
        ))
        .bind(&update.artist_name)
        .bind(&update.tagline)
        .bind(&update.avatar_url)
        .bind(&update.banner_url)
        .bind(&update.background_url)
        .bind(update.background_blur)
        .bind(&update.socials.instagram)
        .bind(&update.socials.twitter)
        .bind(&update.socials.youtube)
        .bind(&update.socials.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        Ok(row.into())
    }
}

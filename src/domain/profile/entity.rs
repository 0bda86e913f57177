use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Social links shown on the public profile. All optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Socials {
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub youtube: Option<String>,
    pub email: Option<String>,
}

/// The artist's public profile and site appearance.
///
/// Exactly one profile exists (single-artist site); it is seeded at migration
/// time and only ever updated, never created or deleted through the API.
/// `background_blur` is a CSS blur radius in pixels applied by the frontend
/// over `background_url`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Profile {
    pub artist_name: String,
    pub tagline: String,
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
    pub background_url: Option<String>,
    pub background_blur: i32,
    pub socials: Socials,
    pub updated_at: DateTime<Utc>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            artist_name: "Beatmaker".to_string(),
            tagline: "Producer".to_string(),
            avatar_url: None,
            banner_url: None,
            background_url: None,
            background_blur: 0,
            socials: Socials::default(),
            updated_at: Utc::now(),
        }
    }
}

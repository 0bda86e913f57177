use super::entity::{Profile, Socials};
use crate::domain::track::errors::DomainError;
use async_trait::async_trait;

/// Fully-resolved profile values for an update (handlers merge partial input
/// with the current row before calling this).
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub artist_name: String,
    pub tagline: String,
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
    pub background_url: Option<String>,
    pub background_blur: i32,
    pub socials: Socials,
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn get(&self) -> Result<Profile, DomainError>;
    async fn update(&self, update: ProfileUpdate) -> Result<Profile, DomainError>;
}

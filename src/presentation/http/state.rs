use crate::{
    config::Config,
    infrastructure::{
        repositories::{
            sqlx_profile_repository::SqlxProfileRepository,
            sqlx_social_repository::SqlxSocialRepository,
            sqlx_track_repository::SqlxTrackRepository,
        },
        storage::traits::StorageService,
    },
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub redis: redis::Client,
    pub storage: Arc<dyn StorageService>,
    pub config: Config,
    pub track_repo: Arc<SqlxTrackRepository>,
    pub profile_repo: Arc<SqlxProfileRepository>,
    pub social_repo: Arc<SqlxSocialRepository>,
}

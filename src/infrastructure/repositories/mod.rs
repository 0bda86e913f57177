pub mod sqlx_profile_repository;
pub mod sqlx_social_repository;
pub mod sqlx_track_repository;

use beatfolio_api::{
    config::Config,
    infrastructure::{
        database::pool::create_pool,
        repositories::{
            sqlx_profile_repository::SqlxProfileRepository,
            sqlx_social_repository::SqlxSocialRepository,
            sqlx_track_repository::SqlxTrackRepository,
        },
        storage::s3_storage_service::S3StorageService,
    },
    presentation::http::{routes::create_router, state::AppState},
};
use axum::extract::DefaultBodyLimit;
use http::{HeaderValue, Method, header};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Upload ceiling. Audio files dominate request size; 50 MiB covers a long
/// WAV master without inviting abuse.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging with safe environment filter
    // Uses RUST_LOG if set, otherwise uses sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new("info,beatfolio_api=debug,tower_http=debug")
        })
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    let mut migrator = sqlx::migrate!("./migrations");
    migrator.set_ignore_missing(config.ignore_missing_migrations);
    migrator.run(&db).await?;

    let redis = redis::Client::open(config.redis_url.clone())?;
    let storage = Arc::new(
        S3StorageService::new(
            config.s3_access_key_id.clone(),
            config.s3_secret_access_key.clone(),
            config.s3_endpoint.clone(),
            config.s3_region.clone(),
            config.s3_force_path_style,
            config.s3_bucket_name.clone(),
            config.s3_public_url.clone(),
        )
        .await?,
    );

    let state = AppState {
        db: db.clone(),
        redis,
        storage,
        config: config.clone(),
        track_repo: Arc::new(SqlxTrackRepository::new(db.clone())),
        profile_repo: Arc::new(SqlxProfileRepository::new(db.clone())),
        social_repo: Arc::new(SqlxSocialRepository::new(db)),
    };

    // Configure CORS with security in mind
    // In production, specify explicit allowed origins from config
    let cors = if cfg!(debug_assertions) {
        // Development: allow any origin
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    } else {
        // Production: restrict to configured origins
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(vec![
                // TODO: Load allowed origins from config
            ]))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    };

    let app = create_router(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("BEATFOLIO API LISTENING ON {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}

// Admin password hashing utility lives in:
// scripts/generate_admin_hash.rs
// Run with: cargo run --manifest-path scripts/Cargo.toml --bin generate_admin_hash

use crate::domain::social::repository::SocialRepository;
use crate::domain::track::repository::TrackRepository;
use crate::infrastructure::security::rate_limiter::RateLimiter;
use crate::presentation::http::{errors::AppError, state::AppState};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

pub(crate) fn extract_client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or("127.0.0.1")
        .to_string()
}

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub author: String,
    pub content: String,
}

pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<AddCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let author = body.author.trim().to_string();
    let content = body.content.trim().to_string();

    if author.is_empty() {
        return Err(AppError::BadRequest("Name is required".into()));
    }
    if author.len() > 40 {
        return Err(AppError::BadRequest(
            "Name must be 40 characters or less".into(),
        ));
    }
    if content.is_empty() {
        return Err(AppError::BadRequest("Comment cannot be empty".into()));
    }
    if content.len() > 500 {
        return Err(AppError::BadRequest(
            "Comment must be 500 characters or less".into(),
        ));
    }

    state
        .track_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Track not found".to_string()))?;

    let ip = extract_client_ip(&headers);

    // Rate limit: 1 comment per 30s per IP per track. Best-effort; a down
    // Redis never blocks commenting.
    if let Ok(mut conn) = state.redis.get_multiplexed_async_connection().await {
        let key = format!("comment_rate:{}:{}", id, ip);
        let exists: bool = redis::cmd("EXISTS")
            .arg(&key)
            .query_async(&mut conn)
            .await
            .unwrap_or(false);
        if exists {
            return Err(AppError::BadRequest(
                "Please wait before commenting again".into(),
            ));
        }
        let _: Result<(), _> = redis::cmd("SET")
            .arg(&key)
            .arg("1")
            .arg("EX")
            .arg(30)
            .query_async(&mut conn)
            .await;
    }

    let comment = state
        .social_repo
        .add_comment(id, author, content, Some(&ip))
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn get_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let comments = state.social_repo.get_comments(id).await?;
    Ok(Json(serde_json::to_value(comments).unwrap_or_default()))
}

#[derive(Debug, Deserialize)]
pub struct CreatePurchaseRequestBody {
    pub contact: String,
    pub message: Option<String>,
}

pub async fn create_purchase_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<CreatePurchaseRequestBody>,
) -> Result<impl IntoResponse, AppError> {
    let contact = body.contact.trim().to_string();
    if contact.len() < 3 || contact.len() > 120 {
        return Err(AppError::BadRequest(
            "Contact must be 3-120 characters".into(),
        ));
    }
    let message = body
        .message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());
    if message.as_deref().map(str::len).unwrap_or(0) > 1000 {
        return Err(AppError::BadRequest(
            "Message must be 1000 characters or less".into(),
        ));
    }

    let track = state
        .track_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Track not found".to_string()))?;

    if !track.for_sale {
        return Err(AppError::BadRequest(
            "This track is not for sale".to_string(),
        ));
    }

    let ip = extract_client_ip(&headers);
    let limiter = RateLimiter::new(state.redis.clone());
    if !limiter
        .check(
            &format!("purchase:{}", ip),
            state.config.rate_limit_purchase_requests_per_ip,
            86_400,
        )
        .await
    {
        return Err(AppError::RateLimited);
    }

    let request = state
        .social_repo
        .create_purchase_request(id, contact, message, Some(&ip))
        .await?;

    tracing::info!(track_id = %id, request_id = %request.id, "Purchase request filed");

    Ok((StatusCode::CREATED, Json(request)))
}

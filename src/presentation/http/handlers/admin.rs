use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use bcrypt::verify;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::shared::pagination::{PaginatedResponse, PaginationRequest};
use crate::domain::social::purchase::{PurchaseRequest, PurchaseRequestStatus};
use crate::domain::social::repository::SocialRepository;
use crate::presentation::http::{
    errors::AppError, middleware::admin::AdminClaims, state::AppState,
};

// --- DTOs ---

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct PurchaseRequestsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    pub status: Option<String>,
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Deserialize)]
pub struct UpdatePurchaseRequestBody {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_tracks: i64,
    pub total_likes: i64,
    pub total_dislikes: i64,
    pub total_comments: i64,
    pub open_purchase_requests: i64,
}

// --- Handlers ---

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if body.email != state.config.admin_email {
        return Err(AppError::Forbidden("Invalid credentials".to_string()));
    }

    let valid = verify(&body.password, &state.config.admin_password_hash)
        .map_err(|_| AppError::Internal("Password verification failed".to_string()))?;

    if !valid {
        return Err(AppError::Forbidden("Invalid credentials".to_string()));
    }

    // Issue JWT valid for 24 hours
    let exp = (chrono::Utc::now() + chrono::Duration::hours(24)).timestamp() as usize;
    let claims = AdminClaims {
        sub: body.email.clone(),
        exp,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

    tracing::info!(admin = %body.email, "Admin login");

    Ok(Json(LoginResponse { token }))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let row = sqlx::query_as::<_, (i64, i64, i64, i64, i64)>(
        "SELECT
            (SELECT COUNT(*)::bigint FROM tracks),
            (SELECT COALESCE(SUM(like_count), 0)::bigint FROM tracks),
            (SELECT COALESCE(SUM(dislike_count), 0)::bigint FROM tracks),
            (SELECT COUNT(*)::bigint FROM comments),
            (SELECT COUNT(*)::bigint FROM purchase_requests WHERE status = 'NEW')",
    )
    .fetch_one(&state.db)
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(StatsResponse {
        total_tracks: row.0,
        total_likes: row.1,
        total_dislikes: row.2,
        total_comments: row.3,
        open_purchase_requests: row.4,
    }))
}

pub async fn list_purchase_requests(
    State(state): State<AppState>,
    Query(params): Query<PurchaseRequestsQuery>,
) -> Result<Json<PaginatedResponse<PurchaseRequest>>, AppError> {
    let status = match params.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") | Some("ALL") => None,
        Some(raw) => Some(
            PurchaseRequestStatus::parse(raw)
                .ok_or_else(|| AppError::BadRequest("Unknown status filter".to_string()))?,
        ),
    };

    let page = PaginationRequest {
        limit: params.limit,
        offset: params.offset,
    }
    .clamped();

    let (items, total) = state
        .social_repo
        .list_purchase_requests(&page, status)
        .await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        limit: page.limit,
        offset: page.offset,
    }))
}

pub async fn update_purchase_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePurchaseRequestBody>,
) -> Result<Json<PurchaseRequest>, AppError> {
    let status = PurchaseRequestStatus::parse(&body.status)
        .ok_or_else(|| AppError::BadRequest("Status must be NEW, CONTACTED or CLOSED".into()))?;

    let request = state
        .social_repo
        .update_purchase_request_status(id, status)
        .await?;

    Ok(Json(request))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.social_repo.delete_comment(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Comment not found".to_string()));
    }

    tracing::info!(comment_id = %id, "Comment deleted by admin");

    Ok(StatusCode::NO_CONTENT)
}

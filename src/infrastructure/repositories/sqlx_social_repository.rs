use crate::domain::shared::pagination::PaginationRequest;
use crate::domain::social::{
    comment::Comment,
    purchase::{PurchaseRequest, PurchaseRequestStatus},
    repository::SocialRepository,
};
use crate::domain::track::errors::DomainError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, types::ipnetwork::IpNetwork};
use std::str::FromStr;
use uuid::Uuid;

pub struct SqlxSocialRepository {
    pub pool: PgPool,
}

impl SqlxSocialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SocialRepository for SqlxSocialRepository {
    async fn add_comment(
        &self,
        track_id: Uuid,
        author: String,
        content: String,
        user_ip: Option<&str>,
    ) -> Result<Comment, DomainError> {
        let ip = user_ip.and_then(|i| IpNetwork::from_str(i).ok());
        let comment = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (id, track_id, author, content, user_ip)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, track_id, author, content, user_ip, created_at",
        )
        .bind(Uuid::now_v7())
        .bind(track_id)
        .bind(&author)
        .bind(&content)
        .bind(ip)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(comment)
    }

    async fn get_comments(&self, track_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, Comment>(
            "SELECT id, track_id, author, content, user_ip, created_at
             FROM comments
             WHERE track_id = $1
             ORDER BY created_at DESC",
        )
        .bind(track_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(rows)
    }

    async fn delete_comment(&self, comment_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_purchase_request(
        &self,
        track_id: Uuid,
        contact: String,
        message: Option<String>,
        user_ip: Option<&str>,
    ) -> Result<PurchaseRequest, DomainError> {
        let ip = user_ip.and_then(|i| IpNetwork::from_str(i).ok());
        let request = sqlx::query_as::<_, PurchaseRequest>(
            "INSERT INTO purchase_requests (id, track_id, contact, message, status, user_ip)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, track_id, contact, message, status, user_ip, created_at",
        )
        .bind(Uuid::now_v7())
        .bind(track_id)
        .bind(&contact)
        .bind(&message)
        .bind(PurchaseRequestStatus::New)
        .bind(ip)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(request)
    }

    async fn list_purchase_requests(
        &self,
        page: &PaginationRequest,
        status: Option<PurchaseRequestStatus>,
    ) -> Result<(Vec<PurchaseRequest>, i64), DomainError> {
        let mut count_qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*)::bigint FROM purchase_requests");
        if let Some(ref status) = status {
            count_qb.push(" WHERE status = ").push_bind(status.clone());
        }
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, track_id, contact, message, status, user_ip, created_at
             FROM purchase_requests",
        );
        if let Some(ref status) = status {
            qb.push(" WHERE status = ").push_bind(status.clone());
        }
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let rows: Vec<PurchaseRequest> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        Ok((rows, total))
    }

    async fn update_purchase_request_status(
        &self,
        id: Uuid,
        status: PurchaseRequestStatus,
    ) -> Result<PurchaseRequest, DomainError> {
        sqlx::query_as::<_, PurchaseRequest>(
            "UPDATE purchase_requests
             SET status = $2
             WHERE id = $1
             RETURNING id, track_id, contact, message, status, user_ip, created_at",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?
        .ok_or_else(|| DomainError::NotFound("Purchase request not found".into()))
    }
}

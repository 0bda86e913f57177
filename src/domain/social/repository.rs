use super::comment::Comment;
use super::purchase::{PurchaseRequest, PurchaseRequestStatus};
use crate::domain::shared::pagination::PaginationRequest;
use crate::domain::track::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait SocialRepository: Send + Sync {
    async fn add_comment(
        &self,
        track_id: Uuid,
        author: String,
        content: String,
        user_ip: Option<&str>,
    ) -> Result<Comment, DomainError>;
    async fn get_comments(&self, track_id: Uuid) -> Result<Vec<Comment>, DomainError>;
    async fn delete_comment(&self, comment_id: Uuid) -> Result<bool, DomainError>;
    async fn create_purchase_request(
        &self,
        track_id: Uuid,
        contact: String,
        message: Option<String>,
        user_ip: Option<&str>,
    ) -> Result<PurchaseRequest, DomainError>;
    async fn list_purchase_requests(
        &self,
        page: &PaginationRequest,
        status: Option<PurchaseRequestStatus>,
    ) -> Result<(Vec<PurchaseRequest>, i64), DomainError>;
    async fn update_purchase_request_status(
        &self,
        id: Uuid,
        status: PurchaseRequestStatus,
    ) -> Result<PurchaseRequest, DomainError>;
}

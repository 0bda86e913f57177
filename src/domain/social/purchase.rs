use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::ipnetwork::IpNetwork;
use ts_rs::TS;
use uuid::Uuid;

/// A visitor's request to buy a track that is marked for sale.
///
/// The artist works the queue from the admin console: requests arrive as
/// `New`, get marked `Contacted` once the artist reaches out over the given
/// contact channel, and end up `Closed`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct PurchaseRequest {
    pub id: Uuid,
    pub track_id: Uuid,
    /// How to reach the requester: email or social handle, free-form
    pub contact: String,
    pub message: Option<String>,
    pub status: PurchaseRequestStatus,
    #[ts(skip)]
    #[serde(skip_serializing, default)]
    pub user_ip: Option<IpNetwork>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::Type, Default, PartialEq)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum PurchaseRequestStatus {
    #[default]
    New,
    Contacted,
    Closed,
}

impl PurchaseRequestStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "NEW" => Some(Self::New),
            "CONTACTED" => Some(Self::Contacted),
            "CLOSED" => Some(Self::Closed),
            _ => None,
        }
    }
}

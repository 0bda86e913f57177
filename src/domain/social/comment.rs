use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::ipnetwork::IpNetwork;
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct Comment {
    pub id: Uuid,
    pub track_id: Uuid,
    pub author: String,
    pub content: String,
    #[ts(skip)]
    #[serde(skip_serializing, default)]
    pub user_ip: Option<IpNetwork>,
    pub created_at: DateTime<Utc>,
}

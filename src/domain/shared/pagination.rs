use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaginationRequest {
    pub limit: i64,
    pub offset: i64,
}

impl PaginationRequest {
    /// Clamp to safe bounds: limit 1-100, offset non-negative.
    pub fn clamped(&self) -> PaginationRequest {
        PaginationRequest {
            limit: self.limit.clamp(1, 100),
            offset: self.offset.max(0),
        }
    }
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

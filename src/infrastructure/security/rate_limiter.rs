use redis::{AsyncCommands, Client};

/// Fixed-window counter against Redis. Fail-open: if Redis is unreachable the
/// request is allowed rather than blocking a visitor action on an outage.
pub struct RateLimiter {
    client: Client,
}

impl RateLimiter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn check(&self, key: &str, limit: u32, window_secs: i64) -> bool {
        if let Ok(mut conn) = self.client.get_multiplexed_async_connection().await {
            let k = format!("rl:{}", key);
            let count: u32 = conn.incr(&k, 1).await.unwrap_or(0);
            if count == 1 {
                let _: () = conn.expire(&k, window_secs).await.unwrap_or(());
            }
            count <= limit
        } else {
            true
        }
    }
}

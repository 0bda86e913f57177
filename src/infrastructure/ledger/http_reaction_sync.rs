use crate::domain::reaction::ledger::ReactionDelta;
use crate::domain::reaction::sync::ReactionSync;
use std::time::Duration;

/// Fire-and-forget reconciliation over HTTP.
///
/// Each dispatch spawns a task that PATCHes the marginal delta to the counter
/// endpoint and logs any failure at `warn`. No retries, no feedback into the
/// ledger, no rollback: a timed-out or rejected call just loses that delta.
/// Must be used from within a tokio runtime.
pub struct HttpReactionSync {
    http: reqwest::Client,
    base_url: String,
}

impl HttpReactionSync {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

impl ReactionSync for HttpReactionSync {
    fn dispatch(&self, track_id: &str, delta: ReactionDelta) {
        let url = format!(
            "{}/api/v1/tracks/{}/reactions",
            self.base_url.trim_end_matches('/'),
            track_id
        );
        let http = self.http.clone();
        tokio::spawn(async move {
            match http.patch(&url).json(&delta).send().await {
                Ok(res) if !res.status().is_success() => {
                    tracing::warn!(status = %res.status(), %url, "reaction sync rejected");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, %url, "reaction sync failed");
                }
            }
        });
    }
}

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use tracing::{debug, info};

/// Process-wide set of revoked token IDs, each kept until the token would have expired.
#[derive(Debug, Default)]
pub struct RevokedTokens {
    /// jti -> expiry (unix seconds)
    entries: DashMap<String, i64>,
}

impl RevokedTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revoke(&self, jti: &str, expires_at: i64) {
        self.entries.insert(jti.to_owned(), expires_at);
    }

    pub fn is_revoked(&self, jti: &str) -> bool {
        self.entries.contains_key(jti)
    }

    /// Drop entries whose token has expired by `now`. Returns the number removed.
    pub fn sweep(&self, now: i64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, expires_at| *expires_at > now);
        before - self.entries.len()
    }
}

/// Run the revocation sweep as a background task.
pub async fn run_revocation_sweeper(revoked: Arc<RevokedTokens>, interval_secs: u64) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

    info!(interval_secs, "Starting token revocation sweeper");

    loop {
        interval.tick().await;

        let removed = revoked.sweep(Utc::now().timestamp());
        if removed > 0 {
            debug!(removed, remaining = revoked.entries.len(), "Swept expired revocations");
        }
    }
}

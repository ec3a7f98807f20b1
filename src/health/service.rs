// Health lookup service - typed request/response channel to a background worker
//
// Callers hold a cheap `HealthHandle`; every request carries a correlation id
// and gets exactly one reply, a timeout, or `RuntimeUnavailable`.

use super::board::HealthBoard;
use super::HealthSource;
use crate::config::HealthConfig;
use crate::error::HealthLookupError;
use crate::scoring::HealthScoreResult;
use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

/// One queued lookup
pub struct HealthRequest {
    pub id: Uuid,
    pub slug: String,
    reply: oneshot::Sender<HealthReply>,
}

/// Outcome of one lookup, tagged with the request it answers
#[derive(Debug, Clone)]
pub struct HealthReply {
    pub id: Uuid,
    pub slug: String,
    pub result: Result<HealthScoreResult, HealthLookupError>,
}

/// Background worker that answers health requests
///
/// Each request runs as its own task, so lookups proceed concurrently and
/// finish in no particular order.
pub struct HealthService {
    source: Arc<dyn HealthSource>,
    requests: mpsc::Receiver<HealthRequest>,
}

impl HealthService {
    /// Spawn the worker on the current runtime and return a handle to it
    pub fn spawn(source: Arc<dyn HealthSource>, config: &HealthConfig) -> HealthHandle {
        let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));
        let service = Self {
            source,
            requests: rx,
        };
        tokio::spawn(service.run());

        HealthHandle {
            requests: tx,
            reply_timeout: config.reply_timeout(),
        }
    }

    async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let source = Arc::clone(&self.source);
            tokio::spawn(async move {
                let HealthRequest { id, slug, reply } = request;
                let result = source
                    .detail(&slug)
                    .await
                    .map(|detail| HealthScoreResult::from_detail(&slug, &detail, Utc::now()));

                if let Err(e) = &result {
                    tracing::warn!(%id, slug = %slug, error = %e, "health lookup failed");
                }
                // The caller may have timed out and gone away.
                let _ = reply.send(HealthReply { id, slug, result });
            });
        }
        tracing::debug!("health service stopped, all handles dropped");
    }
}

/// Handle for requesting health lookups
///
/// This handle is cheap to clone and can be used from async contexts.
#[derive(Clone)]
pub struct HealthHandle {
    requests: mpsc::Sender<HealthRequest>,
    reply_timeout: Duration,
}

impl HealthHandle {
    /// Look up the authoritative health score for one plugin
    pub async fn lookup(&self, slug: &str) -> HealthReply {
        let id = Uuid::new_v4();
        let result = self.request(id, slug).await;
        HealthReply {
            id,
            slug: slug.to_string(),
            result,
        }
    }

    async fn request(&self, id: Uuid, slug: &str) -> Result<HealthScoreResult, HealthLookupError> {
        let (tx, rx) = oneshot::channel();
        self.requests
            .send(HealthRequest {
                id,
                slug: slug.to_string(),
                reply: tx,
            })
            .await
            .map_err(|_| HealthLookupError::RuntimeUnavailable)?;

        let reply = tokio::time::timeout(self.reply_timeout, rx)
            .await
            .map_err(|_| HealthLookupError::Timeout {
                slug: slug.to_string(),
            })?
            .map_err(|_| HealthLookupError::RuntimeUnavailable)?;

        if reply.id != id {
            return Err(HealthLookupError::Lookup(format!(
                "reply {} does not answer request {}",
                reply.id, id
            )));
        }
        reply.result
    }

    /// Look up every slug concurrently and record each reply on `board` as it lands
    ///
    /// Replies for slugs the board no longer tracks are dropped.
    pub async fn fill_board(&self, board: &HealthBoard, slugs: Vec<String>) {
        let mut pending: FuturesUnordered<_> =
            slugs.iter().map(|slug| self.lookup(slug)).collect();

        while let Some(reply) = pending.next().await {
            board.apply(reply);
        }
    }
}

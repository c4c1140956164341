//! Inbound message routing.
//!
//! Delivers each incoming message to the handler of the request it answers,
//! then to the global handler.

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::messages::Response;
use super::metrics::MuxMetrics;
use super::pending::PendingTable;

/// Observer invoked for every incoming message.
pub type GlobalHandler = Arc<dyn Fn(&Response) + Send + Sync + 'static>;

/// Routes incoming frames to pending handlers and the global handler.
pub struct Router {
    pending: PendingTable,
    global: RwLock<Option<GlobalHandler>>,
    metrics: Arc<MuxMetrics>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("pending", &self.pending)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Arc::new(MuxMetrics::new()))
    }
}

impl Router {
    /// Creates a router recording into `metrics`.
    #[must_use]
    pub fn new(metrics: Arc<MuxMetrics>) -> Self {
        Self {
            pending: PendingTable::new(),
            global: RwLock::new(None),
            metrics,
        }
    }

    /// Returns the pending request table.
    #[must_use]
    pub const fn pending(&self) -> &PendingTable {
        &self.pending
    }

    /// Returns the metrics.
    #[must_use]
    pub fn metrics(&self) -> Arc<MuxMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Replaces the global handler.
    pub async fn set_global_handler(&self, handler: GlobalHandler) {
        *self.global.write().await = Some(handler);
    }

    /// Removes the global handler.
    pub async fn clear_global_handler(&self) {
        *self.global.write().await = None;
    }

    /// Returns true if a global handler is registered.
    pub async fn has_global_handler(&self) -> bool {
        self.global.read().await.is_some()
    }

    /// Parses a text frame and routes it.
    ///
    /// Frames that are not JSON objects are logged and dropped.
    pub async fn dispatch_text(&self, text: &str) {
        self.metrics.record_frame_received();

        match Response::from_text(text) {
            Ok(response) => self.route(response).await,
            Err(e) => {
                self.metrics.record_malformed();
                warn!("Dropping malformed frame: {}", e);
            }
        }
    }

    /// Routes a parsed message.
    ///
    /// The matching request handler, if any, is removed from the table and
    /// invoked first; the global handler then sees the same payload whether or
    /// not a request matched.
    pub async fn route(&self, response: Response) {
        let handler = match response.req_id() {
            Some(id) => self.pending.take(id).await,
            None => None,
        };
        let global = self.global.read().await.clone();

        match &handler {
            Some(_) => {
                self.metrics.record_routed();
                debug!(
                    req_id = response.req_id(),
                    msg_type = response.msg_type(),
                    "Routing response"
                );
            }
            None => {
                self.metrics.record_unmatched();
                debug!(
                    req_id = response.req_id(),
                    msg_type = response.msg_type(),
                    "No pending request for message"
                );
            }
        }

        match (handler, global) {
            (Some(handler), Some(global)) => {
                handler(response.clone());
                self.deliver_global(&global, &response);
            }
            (Some(handler), None) => handler(response),
            (None, Some(global)) => self.deliver_global(&global, &response),
            (None, None) => {}
        }
    }

    /// Drops every pending handler without invoking it.
    pub async fn abandon_pending(&self) -> usize {
        self.pending.abandon_all().await
    }

    fn deliver_global(&self, global: &GlobalHandler, response: &Response) {
        self.metrics.record_global_delivery();
        global(response);
    }
}

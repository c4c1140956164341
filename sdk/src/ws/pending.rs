//! Pending request table.
//!
//! Maps request ids to one-shot response handlers.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;

use super::messages::Response;

/// One-shot handler invoked with the response to a request.
pub type ResponseHandler = Box<dyn FnOnce(Response) + Send + 'static>;

/// Request ids and their outstanding handlers.
///
/// Ids come from a counter that starts at 1 and is never rewound, so an id is
/// never handed out twice for the lifetime of the table.
pub struct PendingTable {
    next_id: AtomicU64,
    handlers: Mutex<HashMap<u64, ResponseHandler>>,
}

impl Default for PendingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PendingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTable")
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl PendingTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            handlers: Mutex::new(HashMap::new()),
        }
    }

    /// Allocates the next request id.
    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Registers a handler for `id`, returning any handler it displaced.
    pub async fn insert(&self, id: u64, handler: ResponseHandler) -> Option<ResponseHandler> {
        self.handlers.lock().await.insert(id, handler)
    }

    /// Removes and returns the handler for `id`.
    pub async fn take(&self, id: u64) -> Option<ResponseHandler> {
        self.handlers.lock().await.remove(&id)
    }

    /// Returns true if a handler is registered for `id`.
    pub async fn contains(&self, id: u64) -> bool {
        self.handlers.lock().await.contains_key(&id)
    }

    /// Returns the number of outstanding handlers.
    pub async fn len(&self) -> usize {
        self.handlers.lock().await.len()
    }

    /// Returns true if no handler is outstanding.
    pub async fn is_empty(&self) -> bool {
        self.handlers.lock().await.is_empty()
    }

    /// Drops every outstanding handler without invoking it.
    ///
    /// Returns the number of handlers dropped.
    pub async fn abandon_all(&self) -> usize {
        let drained: Vec<ResponseHandler> = {
            let mut handlers = self.handlers.lock().await;
            handlers.drain().map(|(_, handler)| handler).collect()
        };
        drained.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn noop() -> ResponseHandler {
        Box::new(|_| {})
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let table = PendingTable::new();
        assert_eq!(table.next_id(), 1);
        assert_eq!(table.next_id(), 2);
        assert_eq!(table.next_id(), 3);
    }

    #[tokio::test]
    async fn test_insert_take() {
        let table = PendingTable::new();
        let id = table.next_id();

        assert!(table.insert(id, noop()).await.is_none());
        assert!(table.contains(id).await);
        assert_eq!(table.len().await, 1);

        assert!(table.take(id).await.is_some());
        assert!(!table.contains(id).await);
        assert!(table.take(id).await.is_none());
        assert!(table.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_ids_are_distinct() {
        let table = Arc::new(PendingTable::new());
        let mut tasks = Vec::new();

        for _ in 0..8 {
            let table = Arc::clone(&table);
            tasks.push(tokio::spawn(async move {
                (0..100).map(|_| table.next_id()).collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for task in tasks {
            for id in task.await.expect("task") {
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(seen.len(), 800);
    }

    #[tokio::test]
    async fn test_abandon_all_drops_without_invoking() {
        let table = PendingTable::new();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Response>();

        for _ in 0..3 {
            let tx = tx.clone();
            let handler: ResponseHandler = Box::new(move |resp| {
                let _ = tx.send(resp);
            });
            table.insert(table.next_id(), handler).await;
        }
        drop(tx);

        assert_eq!(table.abandon_all().await, 3);
        assert!(table.is_empty().await);
        assert!(rx.recv().await.is_none());
    }
}

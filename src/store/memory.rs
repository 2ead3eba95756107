//! In-process counter store: an actor owning the map, plus its client.
//!
//! # Concurrency model
//!
//! The store runs as a single tokio task that processes requests
//! sequentially from an mpsc channel. Because each increment or decrement
//! is one message, the value change and the expiry refresh happen in one
//! step with no interleaving: the actor loop is the atomic primitive the
//! [`CounterStore`] contract requires, with no `Mutex` in sight.
//!
//! Entries expire lazily: every operation first discards a dead entry for
//! its key. No background sweeper task is needed.

use crate::store::{CounterStore, Decrement, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

/// Internal request type sent to the store actor.
#[derive(Debug)]
enum StoreRequest {
    Get {
        key: String,
        ttl: Duration,
        respond_to: oneshot::Sender<Option<u64>>,
    },
    Put {
        key: String,
        value: u64,
        ttl: Duration,
        respond_to: oneshot::Sender<()>,
    },
    Incr {
        key: String,
        ttl: Duration,
        respond_to: oneshot::Sender<u64>,
    },
    Decr {
        key: String,
        ttl: Duration,
        respond_to: oneshot::Sender<Decrement>,
    },
    Remove {
        key: String,
        respond_to: oneshot::Sender<()>,
    },
    Lock {
        key: String,
        ttl: Duration,
        respond_to: oneshot::Sender<bool>,
    },
    Unlock {
        key: String,
        respond_to: oneshot::Sender<()>,
    },
}

#[derive(Debug)]
struct Entry {
    value: u64,
    expires_at: Instant,
}

impl Entry {
    fn new(value: u64, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// The actor half of the in-process counter store.
pub struct MemoryStore {
    receiver: mpsc::Receiver<StoreRequest>,
    entries: HashMap<String, Entry>,
}

impl MemoryStore {
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self {
            receiver,
            entries: HashMap::new(),
        };
        (store, StoreClient::new(sender))
    }

    /// Runs the store's event loop until every client is dropped.
    pub async fn run(mut self) {
        info!("Counter store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Get { key, ttl, respond_to } => {
                    self.purge_expired(&key);
                    let value = match self.entries.get_mut(&key) {
                        Some(entry) => {
                            entry.expires_at = Instant::now() + ttl;
                            Some(entry.value)
                        }
                        None => None,
                    };
                    debug!(%key, ?value, "Get");
                    let _ = respond_to.send(value);
                }
                StoreRequest::Put { key, value, ttl, respond_to } => {
                    debug!(%key, value, "Put");
                    self.entries.insert(key, Entry::new(value, ttl));
                    let _ = respond_to.send(());
                }
                StoreRequest::Incr { key, ttl, respond_to } => {
                    self.purge_expired(&key);
                    let value = self.live_value(&key).saturating_add(1);
                    self.entries.insert(key.clone(), Entry::new(value, ttl));
                    debug!(%key, value, "Incr");
                    let _ = respond_to.send(value);
                }
                StoreRequest::Decr { key, ttl, respond_to } => {
                    self.purge_expired(&key);
                    let current = self.live_value(&key);
                    let result = Decrement {
                        value: current.saturating_sub(1),
                        clamped: current == 0,
                    };
                    self.entries.insert(key.clone(), Entry::new(result.value, ttl));
                    debug!(%key, value = result.value, clamped = result.clamped, "Decr");
                    let _ = respond_to.send(result);
                }
                StoreRequest::Remove { key, respond_to } => {
                    debug!(%key, "Remove");
                    self.entries.remove(&key);
                    let _ = respond_to.send(());
                }
                StoreRequest::Lock { key, ttl, respond_to } => {
                    self.purge_expired(&key);
                    let acquired = if self.entries.contains_key(&key) {
                        false
                    } else {
                        self.entries.insert(key.clone(), Entry::new(1, ttl));
                        true
                    };
                    debug!(%key, acquired, "Lock");
                    let _ = respond_to.send(acquired);
                }
                StoreRequest::Unlock { key, respond_to } => {
                    debug!(%key, "Unlock");
                    self.entries.remove(&key);
                    let _ = respond_to.send(());
                }
            }
        }

        info!(size = self.entries.len(), "Counter store shut down");
    }

    fn purge_expired(&mut self, key: &str) {
        if self.entries.get(key).is_some_and(|e| !e.is_live()) {
            self.entries.remove(key);
        }
    }

    fn live_value(&self, key: &str) -> u64 {
        self.entries.get(key).map_or(0, |e| e.value)
    }
}

/// Client handle for the [`MemoryStore`] actor. Cheap to clone.
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        make: impl FnOnce(oneshot::Sender<R>) -> StoreRequest,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| StoreError::Unavailable("counter store closed".into()))?;
        response
            .await
            .map_err(|_| StoreError::Unavailable("counter store dropped response".into()))
    }
}

#[async_trait]
impl CounterStore for StoreClient {
    async fn get(&self, key: &str, ttl: Duration) -> Result<Option<u64>, StoreError> {
        let key = key.to_string();
        self.request(|respond_to| StoreRequest::Get { key, ttl, respond_to }).await
    }

    async fn put(&self, key: &str, value: u64, ttl: Duration) -> Result<(), StoreError> {
        let key = key.to_string();
        self.request(|respond_to| StoreRequest::Put { key, value, ttl, respond_to }).await
    }

    async fn incr(&self, key: &str, ttl: Duration) -> Result<u64, StoreError> {
        let key = key.to_string();
        self.request(|respond_to| StoreRequest::Incr { key, ttl, respond_to }).await
    }

    async fn decr(&self, key: &str, ttl: Duration) -> Result<Decrement, StoreError> {
        let key = key.to_string();
        self.request(|respond_to| StoreRequest::Decr { key, ttl, respond_to }).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let key = key.to_string();
        self.request(|respond_to| StoreRequest::Remove { key, respond_to }).await
    }

    async fn lock(&self, key: &str, ttl: Duration) -> Result<bool, StoreError> {
        let key = key.to_string();
        self.request(|respond_to| StoreRequest::Lock { key, ttl, respond_to }).await
    }

    async fn unlock(&self, key: &str) -> Result<(), StoreError> {
        let key = key.to_string();
        self.request(|respond_to| StoreRequest::Unlock { key, respond_to }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    fn spawn_store() -> StoreClient {
        let (store, client) = MemoryStore::new(32);
        tokio::spawn(store.run());
        client
    }

    #[tokio::test]
    async fn incr_decr_and_clamp() {
        let store = spawn_store();

        assert_eq!(store.incr("k", TTL).await.unwrap(), 1);
        assert_eq!(store.incr("k", TTL).await.unwrap(), 2);

        let d = store.decr("k", TTL).await.unwrap();
        assert_eq!(d, Decrement { value: 1, clamped: false });
        let d = store.decr("k", TTL).await.unwrap();
        assert_eq!(d, Decrement { value: 0, clamped: false });

        // Already at zero: stays there and reports the clamp.
        let d = store.decr("k", TTL).await.unwrap();
        assert_eq!(d, Decrement { value: 0, clamped: true });
    }

    #[tokio::test]
    async fn entries_expire_and_get_refreshes() {
        let store = spawn_store();
        let short = Duration::from_millis(40);

        store.put("k", 7, short).await.unwrap();
        assert_eq!(store.get("k", short).await.unwrap(), Some(7));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(store.get("k", short).await.unwrap(), None);

        // A read inside the window extends it.
        store.put("k", 7, Duration::from_millis(80)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(store.get("k", Duration::from_millis(80)).await.unwrap(), Some(7));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(store.get("k", TTL).await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn lock_is_exclusive_until_released_or_expired() {
        let store = spawn_store();

        assert!(store.lock("l", TTL).await.unwrap());
        assert!(!store.lock("l", TTL).await.unwrap());

        store.unlock("l").await.unwrap();
        assert!(store.lock("l", Duration::from_millis(30)).await.unwrap());

        // Crash recovery path: the TTL frees an abandoned lock.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(store.lock("l", TTL).await.unwrap());
    }

    #[tokio::test]
    async fn closed_store_reports_unavailable() {
        let (store, client) = MemoryStore::new(4);
        drop(store);
        assert!(matches!(
            client.get("k", TTL).await,
            Err(StoreError::Unavailable(_))
        ));
    }
}

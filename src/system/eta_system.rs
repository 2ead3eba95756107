use crate::bridge::LifecycleBridge;
use crate::cache::CounterCache;
use crate::estimator::Estimator;
use crate::model::OrderEvent;
use crate::store::{ActiveOrderSource, MemoryStore, OfferingSource};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

/// The main runtime orchestrator for the ETA engine.
///
/// `EtaSystem` is responsible for:
/// - **Lifecycle management**: starting and stopping the counter-store
///   actor and the bridge event loop
/// - **Dependency wiring**: the cache is built over the store and the
///   authoritative source, then shared by the estimator and the bridge
///   as one explicitly injected instance, no globals
///
/// The authoritative order source and the offering lookup are supplied by
/// the caller; [`OrderLedger`](crate::store::OrderLedger) and
/// [`Catalog`](crate::store::Catalog) are drop-in in-memory choices.
///
/// # Example
///
/// ```ignore
/// let system = EtaSystem::new(ledger.clone(), catalog.clone());
///
/// system.publish(ledger.create("o1", "loc_1", OrderStatus::Received).await).await?;
/// let estimate = system.estimator.estimate(&location, &items).await?;
///
/// system.shutdown().await?;
/// ```
pub struct EtaSystem {
    /// Computes estimates and load snapshots.
    pub estimator: Estimator,

    /// The shared counter cache (exposed for diagnostics and resyncs).
    pub cache: CounterCache,

    events: mpsc::Sender<OrderEvent>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl EtaSystem {
    /// Spawns the counter-store actor and the bridge loop, and wires the
    /// cache, estimator, and bridge together.
    pub fn new(source: Arc<dyn ActiveOrderSource>, offerings: Arc<dyn OfferingSource>) -> Self {
        let (store, store_client) = MemoryStore::new(64);
        let store_handle = tokio::spawn(store.run());

        let cache = CounterCache::new(Arc::new(store_client), source);
        let estimator = Estimator::new(cache.clone(), offerings);
        let bridge = LifecycleBridge::new(cache.clone());

        let (events, receiver) = mpsc::channel(64);
        let bridge_handle = tokio::spawn(bridge.run(receiver));

        Self {
            estimator,
            cache,
            events,
            handles: vec![store_handle, bridge_handle],
        }
    }

    /// A sender for delivering lifecycle events to the bridge.
    pub fn events(&self) -> mpsc::Sender<OrderEvent> {
        self.events.clone()
    }

    /// Delivers one lifecycle event to the bridge.
    pub async fn publish(&self, event: OrderEvent) -> Result<(), String> {
        self.events
            .send(event)
            .await
            .map_err(|e| format!("lifecycle bridge closed: {}", e))
    }

    /// Gracefully shuts the system down: closes the event channel, drops
    /// the store clients, and waits for both tasks to finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down ETA system...");

        // Closing the senders lets each task drain and exit its loop.
        drop(self.events);
        drop(self.estimator);
        drop(self.cache);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Task failed during shutdown");
                return Err(format!("task failed during shutdown: {}", e));
            }
        }

        info!("ETA system shut down");
        Ok(())
    }
}

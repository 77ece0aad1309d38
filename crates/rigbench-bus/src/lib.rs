//! In-process event bus carrying run progress to whoever is watching.

use async_trait::async_trait;
use futures::{stream::BoxStream, StreamExt};
use rigbench_types::{events::RunEvent, Result};
use tokio::sync::broadcast;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tracing::{debug, warn};

#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, event: RunEvent) -> Result<()>;
    fn subscribe(&self) -> BoxStream<'static, RunEvent>;
}

/// Bus backed by a broadcast channel; publishing with no subscribers is not an error.
#[derive(Clone)]
pub struct LocalBus {
    tx: broadcast::Sender<RunEvent>,
}

impl LocalBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }
}

#[async_trait]
impl EventBus for LocalBus {
    async fn publish(&self, event: RunEvent) -> Result<()> {
        if self.tx.send(event).is_err() {
            debug!("event dropped: no subscribers");
        }
        Ok(())
    }

    /// A subscriber that falls behind skips the overwritten events and keeps
    /// receiving from the oldest one still buffered.
    fn subscribe(&self) -> BoxStream<'static, RunEvent> {
        BroadcastStream::new(self.tx.subscribe())
            .filter_map(|event| async move {
                match event {
                    Ok(event) => Some(event),
                    Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                        warn!("event subscriber lagged; {skipped} events skipped");
                        None
                    }
                }
            })
            .boxed()
    }
}

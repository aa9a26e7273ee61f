//! Shared test doubles for tool tests.

use std::sync::Arc;

use async_trait::async_trait;
use docent_core::{ClientId, CommandSink, DeliveryResult, DispatchError, GuideCommand};
use parking_lot::Mutex;

/// A [`CommandSink`] that records every delivery and returns a scripted result.
pub struct RecordingSink {
    /// Commands delivered so far, with their target clients.
    pub deliveries: Mutex<Vec<(ClientId, GuideCommand)>>,
    result: Mutex<Result<DeliveryResult, String>>,
}

impl RecordingSink {
    /// Sink that reports every delivery as successful.
    pub fn delivering() -> Arc<Self> {
        Arc::new(Self {
            deliveries: Mutex::new(Vec::new()),
            result: Mutex::new(Ok(DeliveryResult::delivered())),
        })
    }

    /// Sink that reports every delivery as a soft failure with `reason`.
    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            deliveries: Mutex::new(Vec::new()),
            result: Mutex::new(Ok(DeliveryResult::failed(reason))),
        })
    }

    /// Sink whose registry store is down.
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            deliveries: Mutex::new(Vec::new()),
            result: Mutex::new(Err("store offline".into())),
        })
    }

    /// The single recorded delivery (panics unless exactly one).
    pub fn only_delivery(&self) -> (ClientId, GuideCommand) {
        let deliveries = self.deliveries.lock();
        assert_eq!(deliveries.len(), 1, "expected exactly one delivery");
        deliveries[0].clone()
    }
}

#[async_trait]
impl CommandSink for RecordingSink {
    async fn deliver(
        &self,
        client_id: &ClientId,
        command: &GuideCommand,
    ) -> Result<DeliveryResult, DispatchError> {
        self.deliveries
            .lock()
            .push((client_id.clone(), command.clone()));
        match &*self.result.lock() {
            Ok(result) => Ok(result.clone()),
            Err(message) => Err(DispatchError::RegistryUnavailable(message.clone())),
        }
    }
}

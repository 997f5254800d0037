/*
 * local.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * In-process EventBus implementation.
 */

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::traits::{BusResult, EventBus, EventHandler};

/// In-process bus that dispatches events to listeners on the caller's task.
///
/// Listeners run one after another in subscription order. The listener
/// table is only locked while it is read or updated, never while a
/// listener is running, so listeners may subscribe or issue requests of
/// their own.
#[derive(Default)]
pub struct LocalBus {
    listeners: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
}

impl LocalBus {
    /// Create a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listeners registered for an event.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event)
            .map_or(0, Vec::len)
    }

    /// Snapshot of the listeners for an event, in subscription order.
    fn listeners_for(&self, event: &str) -> Vec<Arc<dyn EventHandler>> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event)
            .cloned()
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for LocalBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        let mut counts: Vec<(&str, usize)> = listeners
            .iter()
            .map(|(event, handlers)| (event.as_str(), handlers.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("LocalBus").field("listeners", &counts).finish()
    }
}

#[async_trait]
impl EventBus for LocalBus {
    fn subscribe(&self, event: &str, handler: Arc<dyn EventHandler>) {
        tracing::trace!(event, "Subscribing listener");
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event.to_string())
            .or_default()
            .push(handler);
    }

    async fn publish(&self, event: &str, payload: Value) {
        for handler in self.listeners_for(event) {
            if let Err(error) = handler.handle(payload.clone()).await {
                tracing::warn!(event, error = %error, "Listener failed during publish");
            }
        }
    }

    async fn request(&self, event: &str, payload: Value) -> BusResult<Option<Value>> {
        let handlers = self.listeners_for(event);
        if handlers.is_empty() {
            tracing::debug!(event, "No listeners for request");
            return Ok(None);
        }

        let mut replies = Vec::new();
        for handler in handlers {
            if let Some(reply) = handler.handle(payload.clone()).await? {
                replies.push(reply);
            }
        }

        Ok(match replies.len() {
            0 => None,
            1 => replies.pop(),
            _ => Some(Value::Array(replies)),
        })
    }
}

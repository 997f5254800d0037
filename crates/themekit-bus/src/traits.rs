/*
 * traits.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Defines the EventBus and EventHandler traits and the bus error type.
 */

use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Boxed error carried across the bus boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for bus operations
pub type BusResult<T> = Result<T, BusError>;

/// Errors that can occur while dispatching an event.
#[derive(Debug, Error)]
pub enum BusError {
    /// A listener failed while handling the event.
    ///
    /// The listener's own error is kept as the source so callers can
    /// downcast it back to the concrete type.
    #[error("Listener for '{event}' failed: {source}")]
    Handler {
        event: String,
        #[source]
        source: BoxError,
    },

    /// A payload or reply could not be converted to or from JSON.
    #[error("Failed to encode payload for '{event}': {source}")]
    Encode {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BusError {
    /// Wrap a listener failure for the given event.
    pub fn handler(event: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Handler {
            event: event.into(),
            source: source.into(),
        }
    }

    /// Wrap a JSON conversion failure for the given event.
    pub fn encode(event: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Encode {
            event: event.into(),
            source,
        }
    }

    /// Name of the event that failed.
    pub fn event(&self) -> &str {
        match self {
            BusError::Handler { event, .. } | BusError::Encode { event, .. } => event,
        }
    }
}

/// A listener registered for one event name.
///
/// `Ok(None)` means the listener has nothing to say about the event. It is
/// not the same as replying with JSON `null`.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, payload: Value) -> BusResult<Option<Value>>;
}

/// The capability set plugins use to talk to each other.
///
/// # Reply aggregation
///
/// [`EventBus::request`] awaits exactly one value. When several listeners
/// reply to the same request, implementations must fold the defined
/// replies into a single JSON array, in subscription order. Consumers that
/// expect contributions from several installed plugins therefore see one
/// level of nesting per listener.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Register a listener. Listeners for one event run in subscription order.
    fn subscribe(&self, event: &str, handler: Arc<dyn EventHandler>);

    /// Fire-and-forget notification.
    ///
    /// Every listener runs; replies are discarded and failures are logged
    /// rather than returned.
    async fn publish(&self, event: &str, payload: Value);

    /// Trigger the event and await one reply.
    ///
    /// Returns `Ok(None)` when no listener produced a value.
    async fn request(&self, event: &str, payload: Value) -> BusResult<Option<Value>>;
}

/// Adapter that turns an async closure into an [`EventHandler`].
pub struct FnHandler<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> EventHandler for FnHandler<F>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = BusResult<Option<Value>>> + Send + 'static,
{
    async fn handle(&self, payload: Value) -> BusResult<Option<Value>> {
        (self.f)(payload).await
    }
}

/// Build a shareable listener from an async closure.
///
/// ```ignore
/// bus.subscribe("theme:resources", handler_fn(|_| async {
///     Ok(Some(json!({ "copy": [] })))
/// }));
/// ```
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn EventHandler>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = BusResult<Option<Value>>> + Send + 'static,
{
    Arc::new(FnHandler { f })
}

/*
 * operations.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The six theme operations and their bus bindings.
 */

//! The theme operations interface and its bus registration.
//!
//! | Event | Payload | Reply |
//! |---|---|---|
//! | `create` | creation options | none |
//! | `css:append` | fragment request | none |
//! | `css:append:all` | array of fragment requests | none |
//! | `css:prepend` | fragment request | none |
//! | `css:prepend:all` | array of fragment requests | none |
//! | `finalize` | `{ silent }` | `{ css, copy }` |
//!
//! Event names are contract identifiers: other plugins bind to them by
//! string.

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;

use themekit_bus::{BusError, BusResult, EventBus, EventHandler};

use crate::config::ThemeConfig;
use crate::error::{Result, ThemeError};
use crate::options::CreateThemeOptions;
use crate::types::{CssAction, FinalizeOptions, FinalizedTheme, FragmentRequest};

/// The operations a theme orchestrator exposes.
#[async_trait]
pub trait ThemeOperations: Send + Sync {
    /// Register one engine target per file name.
    async fn create_theme(&self, options: CreateThemeOptions) -> Result<()>;

    async fn css_append(&self, request: FragmentRequest) -> Result<()>;

    async fn css_prepend(&self, request: FragmentRequest) -> Result<()>;

    /// Append a batch concurrently; completes when every member has.
    async fn css_append_all(&self, requests: Vec<FragmentRequest>) -> Result<()>;

    /// Prepend a batch concurrently; completes when every member has.
    async fn css_prepend_all(&self, requests: Vec<FragmentRequest>) -> Result<()>;

    /// Pull theme resources, finalize every target and collect files to copy.
    async fn finalize_theme(&self, options: FinalizeOptions) -> Result<FinalizedTheme>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    CssAppend,
    CssAppendAll,
    CssPrepend,
    CssPrependAll,
    Finalize,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Create,
        Operation::CssAppend,
        Operation::CssAppendAll,
        Operation::CssPrepend,
        Operation::CssPrependAll,
        Operation::Finalize,
    ];

    /// Contract name, without namespace.
    pub fn event_name(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::CssAppend => "css:append",
            Operation::CssAppendAll => "css:append:all",
            Operation::CssPrepend => "css:prepend",
            Operation::CssPrependAll => "css:prepend:all",
            Operation::Finalize => "finalize",
        }
    }
}

/// Subscribe every operation on the bus.
///
/// Payloads are decoded into typed requests; a payload of the wrong shape
/// fails with [`ThemeError::InvalidArgument`]. Batch members are decoded
/// one by one inside the fan-out, so a malformed member fails like an
/// invalid one and its siblings still run. Failures reach the caller as
/// [`BusError::Handler`] with the [`ThemeError`] as source.
pub fn register(operations: Arc<dyn ThemeOperations>, bus: &dyn EventBus, config: &ThemeConfig) {
    for operation in Operation::ALL {
        let event = config.event_name(operation);
        tracing::debug!(event = %event, "Registering theme operation");
        bus.subscribe(
            &event,
            Arc::new(OperationHandler {
                operation,
                event: event.clone(),
                operations: Arc::clone(&operations),
            }),
        );
    }
}

struct OperationHandler {
    operation: Operation,
    event: String,
    operations: Arc<dyn ThemeOperations>,
}

impl OperationHandler {
    async fn dispatch(&self, payload: Value) -> Result<Option<Value>> {
        match self.operation {
            Operation::Create => {
                let options = CreateThemeOptions::from_value(&payload)?;
                self.operations.create_theme(options).await?;
                Ok(None)
            }
            Operation::CssAppend => {
                let request = FragmentRequest::from_value(&payload)?;
                self.operations.css_append(request).await?;
                Ok(None)
            }
            Operation::CssPrepend => {
                let request = FragmentRequest::from_value(&payload)?;
                self.operations.css_prepend(request).await?;
                Ok(None)
            }
            Operation::CssAppendAll => {
                self.add_all(CssAction::Append, &payload).await?;
                Ok(None)
            }
            Operation::CssPrependAll => {
                self.add_all(CssAction::Prepend, &payload).await?;
                Ok(None)
            }
            Operation::Finalize => {
                let options = FinalizeOptions::from_value(&payload)?;
                let theme = self.operations.finalize_theme(options).await?;
                let reply = serde_json::to_value(theme)
                    .map_err(|e| BusError::encode(self.event.clone(), e))?;
                Ok(Some(reply))
            }
        }
    }

    /// Decode and add every member concurrently; the first error in batch
    /// order is returned once all members are done.
    async fn add_all(&self, action: CssAction, payload: &Value) -> Result<()> {
        let items = batch_items(payload)?;
        tracing::debug!(event = %self.event, count = items.len(), "Dispatching CSS fragment batch");

        let results = join_all(items.iter().map(|item| async move {
            let request = FragmentRequest::from_value(item)?;
            match action {
                CssAction::Append => self.operations.css_append(request).await,
                CssAction::Prepend => self.operations.css_prepend(request).await,
            }
        }))
        .await;
        results.into_iter().collect()
    }
}

#[async_trait]
impl EventHandler for OperationHandler {
    async fn handle(&self, payload: Value) -> BusResult<Option<Value>> {
        self.dispatch(payload).await.map_err(|e| {
            tracing::debug!(event = %self.event, error = %e, "Theme operation failed");
            BusError::handler(self.event.clone(), e)
        })
    }
}

fn batch_items(payload: &Value) -> Result<&[Value]> {
    payload.as_array().map(Vec::as_slice).ok_or_else(|| {
        ThemeError::invalid_argument("batch payload must be an array of fragment requests")
    })
}

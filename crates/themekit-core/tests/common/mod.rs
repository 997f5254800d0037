/*
 * common/mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Shared fixtures for orchestrator integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use themekit_bus::{EventBus, LocalBus, handler_fn};
use themekit_core::{
    CssEngine, CssFragment, CssOutput, EngineError, EngineResult, FinalizeOptions,
    ThemeOrchestrator, TargetSpec,
};

/// One call the engine accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Create(TargetSpec),
    Append(CssFragment),
    Prepend(CssFragment),
    FinalizeAll(FinalizeOptions),
}

/// Engine that records accepted calls and renders each target as the list
/// of its fragment paths.
#[derive(Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<EngineCall>>,
    targets: Mutex<HashMap<String, Vec<String>>>,
    order: Mutex<Vec<String>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    /// File paths of every append/prepend call, in call order.
    pub fn fragment_paths(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EngineCall::Append(f) | EngineCall::Prepend(f) => Some(f.file_path),
                _ => None,
            })
            .collect()
    }

    pub fn created(&self) -> Vec<TargetSpec> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EngineCall::Create(spec) => Some(spec),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn add(&self, fragment: &CssFragment, front: bool) -> EngineResult<()> {
        let mut targets = self.targets.lock().unwrap();
        let Some(entries) = targets.get_mut(&fragment.name) else {
            return Err(EngineError::UnknownTarget(fragment.name.clone()));
        };
        let line = fragment.path().display().to_string();
        if front {
            entries.insert(0, line);
        } else {
            entries.push(line);
        }
        Ok(())
    }
}

#[async_trait]
impl CssEngine for RecordingEngine {
    async fn create(&self, target: TargetSpec) -> EngineResult<()> {
        self.targets
            .lock()
            .unwrap()
            .insert(target.name.clone(), Vec::new());
        self.order.lock().unwrap().push(target.name.clone());
        self.record(EngineCall::Create(target));
        Ok(())
    }

    async fn append(&self, fragment: CssFragment) -> EngineResult<()> {
        self.add(&fragment, false)?;
        self.record(EngineCall::Append(fragment));
        Ok(())
    }

    async fn prepend(&self, fragment: CssFragment) -> EngineResult<()> {
        self.add(&fragment, true)?;
        self.record(EngineCall::Prepend(fragment));
        Ok(())
    }

    async fn finalize_all(&self, options: FinalizeOptions) -> EngineResult<Vec<CssOutput>> {
        self.record(EngineCall::FinalizeAll(options));
        let targets = self.targets.lock().unwrap();
        Ok(self
            .order
            .lock()
            .unwrap()
            .iter()
            .map(|name| CssOutput {
                name: name.clone(),
                css: targets[name].join("\n"),
                map: None,
            })
            .collect())
    }
}

/// A wired orchestrator with a recording engine and an in-process bus.
pub struct Fixture {
    pub engine: Arc<RecordingEngine>,
    pub bus: Arc<LocalBus>,
    pub orchestrator: ThemeOrchestrator,
}

pub fn fixture() -> Fixture {
    let engine = Arc::new(RecordingEngine::new());
    let bus = Arc::new(LocalBus::new());
    let orchestrator = ThemeOrchestrator::new(engine.clone(), bus.clone());
    Fixture {
        engine,
        bus,
        orchestrator,
    }
}

/// Wire form of a fragment descriptor in the default target.
pub fn fragment_json(dir: &str, file: &str) -> Value {
    json!({ "name": "theme.css", "dirName": dir, "filePath": file })
}

/// Subscribe a listener that always replies with `reply`.
pub fn reply_with(bus: &LocalBus, event: &str, reply: Option<Value>) {
    bus.subscribe(event, handler_fn(move |_| {
        let reply = reply.clone();
        async move { Ok(reply) }
    }));
}

/// Subscribe a listener that records payloads and replies with nothing.
pub fn capture(bus: &LocalBus, event: &str) -> Arc<Mutex<Vec<Value>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    bus.subscribe(event, handler_fn(move |payload| {
        let sink = Arc::clone(&sink);
        async move {
            sink.lock().unwrap().push(payload);
            Ok(None)
        }
    }));
    seen
}

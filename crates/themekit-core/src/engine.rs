/*
 * engine.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * CssEngine trait: the external CSS pipeline the orchestrator drives.
 */

//! The CSS engine seam.
//!
//! Parsing, transformation, source maps and minification all live behind
//! [`CssEngine`]. The orchestrator only registers targets, feeds them
//! fragments and asks for the finished CSS. Each target moves through
//! created, then mutated by append/prepend, then finalized; that
//! lifecycle is the engine's to enforce.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{CssFragment, CssOutput, FinalizeOptions, TargetSpec};

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors reported by a CSS engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A fragment referenced a target that was never created.
    #[error("Unknown CSS target: {0}")]
    UnknownTarget(String),

    /// A processor stage failed while finalizing a target.
    #[error("Processor '{processor}' failed for target '{target}': {message}")]
    Processor {
        target: String,
        processor: String,
        message: String,
    },

    /// Reading a fragment or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// A CSS pipeline holding one accumulating stylesheet per target.
///
/// Implementations are shared between concurrent operations and must do
/// their own synchronization.
#[async_trait]
pub trait CssEngine: Send + Sync {
    /// Register a new target with its processor pipeline.
    async fn create(&self, target: TargetSpec) -> EngineResult<()>;

    /// Add a fragment after the target's existing content.
    async fn append(&self, fragment: CssFragment) -> EngineResult<()>;

    /// Add a fragment before the target's existing content.
    async fn prepend(&self, fragment: CssFragment) -> EngineResult<()>;

    /// Run every target through its processors and return the results.
    async fn finalize_all(&self, options: FinalizeOptions) -> EngineResult<Vec<CssOutput>>;
}

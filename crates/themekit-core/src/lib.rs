//! Theme orchestration for CSS pipelines.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A theme is assembled in three steps, each exposed as an operation on a
//! plugin event bus:
//!
//! 1. `create` registers one CSS target per output file with the engine,
//!    together with its processor pipeline.
//! 2. `css:append` / `css:prepend` (and their `:all` batch forms) add
//!    fragments to a target and pull matching content from installed
//!    themes.
//! 3. `finalize` collects every theme's resource bundle, runs the engine
//!    and returns the CSS plus the list of files to copy.
//!
//! The crate contains no CSS machinery. The engine is injected as a
//! [`CssEngine`], other plugins are reached through an
//! [`EventBus`](themekit_bus::EventBus), and fragment paths are rendered
//! by a [`TemplateRenderer`](themekit_template::TemplateRenderer).
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use themekit_bus::LocalBus;
//! use themekit_core::{ThemeConfig, ThemeOrchestrator, register};
//!
//! let bus = Arc::new(LocalBus::new());
//! let orchestrator = ThemeOrchestrator::new(engine, bus.clone());
//! register(Arc::new(orchestrator), bus.as_ref(), &ThemeConfig::default());
//!
//! bus.request("create", serde_json::json!({ "files": "site.css" })).await?;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod operations;
pub mod options;
pub mod orchestrator;
pub mod pipeline;
pub mod reply;
pub mod types;

pub use config::{CollaboratorEvents, ThemeConfig};
pub use engine::{CssEngine, EngineError, EngineResult};
pub use error::{ConfigError, Result, ThemeError};
pub use operations::{Operation, ThemeOperations, register};
pub use options::{CreateThemeOptions, TargetFiles};
pub use orchestrator::ThemeOrchestrator;
pub use reply::ReplyDiagnostic;
pub use types::{
    CssAction, CssFragment, CssOutput, DEFAULT_TARGET, FinalizeOptions, FinalizedTheme,
    FragmentRequest, ProcessorConfig, ResourceFile, TargetSpec, ThemeResources,
};

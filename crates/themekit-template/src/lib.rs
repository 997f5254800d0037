/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! File-path template rendering for themekit.
//!
//! Theme fragments are referenced by paths that may embed theme-specific
//! values, for example `css/$scheme$/colors.css`. This crate provides the
//! [`TemplateRenderer`] seam the orchestrator renders those paths through,
//! and [`PathTemplate`], the default renderer.
//!
//! # Syntax
//!
//! The interpolation subset of Pandoc's doctemplates:
//!
//! - Variable interpolation: `$variable$` or `${variable}`
//! - Nested field access: `$scheme.name$`
//! - Literal dollar sign: `$$`
//!
//! Conditionals, loops, partials and pipes are not supported; paths have
//! no use for them.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use themekit_template::{PathTemplate, TemplateRenderer};
//!
//! let data = json!({ "scheme": "dark" });
//! let path = PathTemplate
//!     .render("css/$scheme$/colors.css", data.as_object().unwrap())
//!     .unwrap();
//! assert_eq!(path, "css/dark/colors.css");
//! ```

pub mod error;
pub mod path;

pub use error::{TemplateError, TemplateResult};
pub use path::{PathTemplate, render_value};

use serde_json::{Map, Value};

/// Renders a template string against a map of substitution variables.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, data: &Map<String, Value>) -> TemplateResult<String>;
}

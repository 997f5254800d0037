/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for template rendering.

use thiserror::Error;

/// Errors that can occur while rendering a template.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// A `$` opened a variable that is never closed.
    #[error("Unterminated variable at byte {position} in template '{template}'")]
    Unterminated { template: String, position: usize },
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

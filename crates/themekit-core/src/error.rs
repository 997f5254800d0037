/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for themekit-core

use themekit_bus::BusError;
use themekit_template::TemplateError;
use thiserror::Error;

use crate::engine::EngineError;

/// Errors returned by theme operations.
///
/// Validation failures (`InvalidArgument`, `InvalidOperation`) are raised
/// before the operation touches the engine or the bus. Failures from
/// collaborators are passed through unchanged.
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Bus(#[from] BusError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl ThemeError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ThemeError>;

/// Errors loading a [`ThemeConfig`](crate::ThemeConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read theme config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse theme config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
